use anyhow::anyhow;
use anyhow::Result;
use web_sys::Window;

use super::js_error;
use super::json_to_js;
use crate::domain::models::ChildMessage;
use crate::domain::models::Transport;

/// Posts to `window.parent`, restricted to this page's own origin.
pub struct BrowserTransport {
    window: Window,
}

impl BrowserTransport {
    pub fn new() -> Result<BrowserTransport> {
        let window = web_sys::window().ok_or_else(|| return anyhow!("No global window exists"))?;
        return Ok(BrowserTransport { window });
    }
}

impl Transport for BrowserTransport {
    fn origin(&self) -> String {
        return self.window.location().origin().unwrap_or_default();
    }

    fn post(&self, message: &ChildMessage) -> Result<()> {
        let parent = self
            .window
            .parent()
            .map_err(js_error)?
            .ok_or_else(|| return anyhow!("Page has no parent window"))?;

        parent
            .post_message(&json_to_js(message)?, &self.origin())
            .map_err(js_error)?;

        return Ok(());
    }
}
