#[cfg(test)]
#[path = "channel_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::ChildMessage;
use crate::domain::models::Transport;

/// Hands posted messages to an in-process receiver standing in for the
/// editor window.
pub struct ChannelTransport {
    origin: String,
    tx: mpsc::UnboundedSender<ChildMessage>,
}

impl ChannelTransport {
    pub fn new(origin: &str, tx: mpsc::UnboundedSender<ChildMessage>) -> ChannelTransport {
        return ChannelTransport {
            origin: origin.to_string(),
            tx,
        };
    }
}

impl Transport for ChannelTransport {
    fn origin(&self) -> String {
        return self.origin.to_string();
    }

    fn post(&self, message: &ChildMessage) -> Result<()> {
        self.tx.send(message.clone())?;
        return Ok(());
    }
}
