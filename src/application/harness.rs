#[cfg(test)]
#[path = "harness_test.rs"]
mod tests;

use std::rc::Rc;

use anyhow::Result;
use quickedit::domain::models::EditProps;
use quickedit::domain::models::InboundMessage;
use quickedit::domain::models::QuickEditOptions;
use quickedit::domain::models::TransportHandle;
use quickedit::domain::services::Session;
use quickedit::infrastructure::documents::VirtualDocument;
use serde::Deserialize;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;

/// One line of harness input, standing in for what a browser would deliver
/// to the page.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HarnessInput {
    /// A cross-window message. The origin defaults to the editor's origin.
    Message {
        #[serde(default)]
        origin: Option<String>,
        data: Value,
    },
    Click {
        target: String,
    },
    Unmount,
}

pub fn parse_line(line: &str) -> Option<HarnessInput> {
    if line.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<HarnessInput>(line) {
        Ok(input) => return Some(input),
        Err(err) => {
            tracing::warn!(err = ?err, line = line, "Skipping unreadable input line");
            return None;
        }
    }
}

/// Loads the page description, or an empty body when no page is configured.
pub async fn load_page(page_path: &str) -> Result<VirtualDocument> {
    if page_path.is_empty() {
        return Ok(VirtualDocument::default());
    }

    let json = fs::read_to_string(page_path).await?;
    return VirtualDocument::from_json(&json);
}

/// Feeds stdin lines to the session loop until EOF.
pub async fn read_stdin(tx: mpsc::UnboundedSender<HarnessInput>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(input) = parse_line(&line) {
            if tx.send(input).is_err() {
                break;
            }
        }
    }

    return Ok(());
}

pub async fn start(
    props: EditProps,
    transport: TransportHandle,
    document: Rc<VirtualDocument>,
    options: QuickEditOptions,
    rx: &mut mpsc::UnboundedReceiver<HarnessInput>,
) -> Result<()> {
    let default_origin = transport.origin();
    let mut session = Session::mount(props, transport, document.clone(), options)?;

    while let Some(input) = rx.recv().await {
        match input {
            HarnessInput::Message { origin, data } => {
                let origin = origin.unwrap_or_else(|| return default_origin.to_string());
                session.handle_message(&InboundMessage::new(&origin, data));
            }
            HarnessInput::Click { target } => match document.click(&target) {
                Ok(Some(event)) => {
                    let outcome = session.handle_click(&event);
                    tracing::debug!(
                        element = target,
                        cancelled = outcome.cancelled,
                        selected = outcome.selected,
                        "click"
                    );
                }
                Ok(None) => {
                    tracing::debug!(element = target, "Click passed through to the page");
                }
                Err(err) => {
                    tracing::warn!(err = ?err, "Ignoring click");
                }
            },
            HarnessInput::Unmount => {
                break;
            }
        }
    }

    session.unmount();
    return Ok(());
}
