use std::io;
use std::io::Write;

use anyhow::Result;

use crate::domain::models::ChildMessage;
use crate::domain::models::Transport;

/// Writes every posted message as one JSON line on stdout.
pub struct StdoutTransport {
    origin: String,
}

impl StdoutTransport {
    pub fn new(origin: &str) -> StdoutTransport {
        return StdoutTransport {
            origin: origin.to_string(),
        };
    }
}

impl Transport for StdoutTransport {
    fn origin(&self) -> String {
        return self.origin.to_string();
    }

    fn post(&self, message: &ChildMessage) -> Result<()> {
        let line = serde_json::to_string(message)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()?;

        return Ok(());
    }
}
