#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::EditSession;
use super::SessionId;

/// Messages posted from the hosted page to the editor window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChildMessage {
    #[serde(rename = "open")]
    Open {
        query: String,
        variables: Value,
        data: Value,
        id: SessionId,
    },
    #[serde(rename = "close")]
    Close { id: SessionId },
    /// Tells the editor whether any field markers exist on the page.
    #[serde(rename = "quick-edit")]
    QuickEdit { value: bool },
    #[serde(rename = "field:selected")]
    FieldSelected {
        #[serde(rename = "fieldName")]
        field_name: String,
    },
}

impl ChildMessage {
    pub fn open(session: &EditSession) -> ChildMessage {
        return ChildMessage::Open {
            query: session.query.to_string(),
            variables: session.variables.clone(),
            data: session.data.clone(),
            id: session.id.clone(),
        };
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChildMessage::Open { .. } => return "open",
            ChildMessage::Close { .. } => return "close",
            ChildMessage::QuickEdit { .. } => return "quick-edit",
            ChildMessage::FieldSelected { .. } => return "field:selected",
        }
    }
}

/// Messages posted from the editor window to the hosted page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParentMessage {
    #[serde(rename = "quickEditEnabled")]
    QuickEditEnabled { value: bool },
    #[serde(rename = "updateData")]
    UpdateData { id: SessionId, data: Value },
}

/// A cross-window message as it arrives, before its shape is trusted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub origin: String,
    pub data: Value,
}

impl InboundMessage {
    pub fn new(origin: &str, data: Value) -> InboundMessage {
        return InboundMessage {
            origin: origin.to_string(),
            data,
        };
    }

    /// Returns the parent message carried by this envelope, or `None` when it
    /// comes from a foreign origin or has an unknown shape.
    pub fn parse(&self, expected_origin: &str) -> Option<ParentMessage> {
        if self.origin != expected_origin {
            tracing::debug!(
                origin = %self.origin,
                expected = expected_origin,
                "Ignoring message from foreign origin"
            );
            return None;
        }

        match serde_json::from_value::<ParentMessage>(self.data.clone()) {
            Ok(message) => return Some(message),
            Err(err) => {
                tracing::debug!(err = ?err, data = ?self.data, "Ignoring malformed message");
                return None;
            }
        }
    }
}
