use std::rc::Rc;

use anyhow::Result;

use super::ChildMessage;

/// Cross-window messaging towards the editor (parent) frame.
pub trait Transport {
    /// Origin messages are delivered to, and the only origin inbound messages
    /// are accepted from.
    fn origin(&self) -> String;

    /// Posts a message to the parent window. Delivery is fire-and-forget, an
    /// `Ok` only means the message was handed to the underlying channel.
    fn post(&self, message: &ChildMessage) -> Result<()>;

    /// Posts and logs failures instead of surfacing them. There is no retry.
    fn send(&self, message: &ChildMessage) {
        if let Err(err) = self.post(message) {
            tracing::warn!(err = ?err, kind = message.kind(), "Failed to post message to editor");
        }
    }
}

pub type TransportHandle = Rc<dyn Transport>;
