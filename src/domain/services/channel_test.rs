use std::rc::Rc;

use anyhow::bail;
use anyhow::Result;
use serde_json::json;
use test_utils::page_fixture;
use test_utils::unmarked_page_fixture;
use test_utils::ORIGIN;
use tokio::sync::mpsc;

use super::SyncChannel;
use crate::domain::models::ChildMessage;
use crate::domain::models::EditProps;
use crate::domain::models::EditSession;
use crate::domain::models::InboundMessage;
use crate::domain::models::SessionId;
use crate::infrastructure::documents::VirtualDocument;
use crate::infrastructure::transports::ChannelTransport;

fn open_channel(page: &str) -> Result<(SyncChannel, mpsc::UnboundedReceiver<ChildMessage>)> {
    let (tx, rx) = mpsc::unbounded_channel::<ChildMessage>();
    let props = EditProps::from_json("{a}", "{}", r#"{"x":1}"#)?;
    let channel = SyncChannel::open(
        EditSession::new(SessionId::new("snfhx2"), props),
        Rc::new(ChannelTransport::new(ORIGIN, tx)),
        Rc::new(VirtualDocument::from_json(page)?),
        "data-tina-field",
    );

    return Ok((channel, rx));
}

fn update_data(id: &str, data: serde_json::Value) -> InboundMessage {
    return InboundMessage::new(ORIGIN, json!({"type": "updateData", "id": id, "data": data}));
}

#[test]
fn it_announces_itself_once_on_open() -> Result<()> {
    let (channel, mut rx) = open_channel(page_fixture())?;

    match rx.try_recv()? {
        ChildMessage::Open { id, data, .. } => {
            assert_eq!(id, SessionId::new("snfhx2"));
            assert_eq!(data["x"], 1);
        }
        _ => bail!("Wrong enum"),
    }
    assert!(rx.try_recv().is_err());
    assert!(channel.state().is_client);
    return Ok(());
}

#[test]
fn it_applies_updates_for_its_own_id() -> Result<()> {
    let (channel, mut rx) = open_channel(page_fixture())?;
    rx.try_recv()?;

    assert!(channel.handle_message(&update_data("snfhx2", json!({"x": 2}))));

    let state = channel.state();
    assert_eq!(state.data, json!({"x": 2}));
    assert!(state.is_in_editor_frame);
    assert_eq!(rx.try_recv()?, ChildMessage::QuickEdit { value: true });
    return Ok(());
}

#[test]
fn it_ignores_updates_for_other_ids() -> Result<()> {
    let (channel, mut rx) = open_channel(page_fixture())?;
    rx.try_recv()?;

    assert!(!channel.handle_message(&update_data("other", json!({"x": 2}))));

    let state = channel.state();
    assert_eq!(state.data, json!({"x": 1}));
    assert!(!state.is_in_editor_frame);
    assert!(rx.try_recv().is_err());
    return Ok(());
}

#[test]
fn it_reports_pages_without_markers() -> Result<()> {
    let (channel, mut rx) = open_channel(unmarked_page_fixture())?;
    rx.try_recv()?;

    channel.handle_message(&update_data("snfhx2", json!({})));

    assert_eq!(rx.try_recv()?, ChildMessage::QuickEdit { value: false });
    return Ok(());
}

#[test]
fn it_mirrors_quick_edit_toggles() -> Result<()> {
    let (channel, _rx) = open_channel(page_fixture())?;

    channel.handle_message(&InboundMessage::new(
        ORIGIN,
        json!({"type": "quickEditEnabled", "value": true}),
    ));
    assert!(channel.state().quick_edit_enabled);

    channel.handle_message(&InboundMessage::new(
        ORIGIN,
        json!({"type": "quickEditEnabled", "value": false}),
    ));
    assert!(!channel.state().quick_edit_enabled);
    return Ok(());
}

#[test]
fn it_ignores_foreign_and_malformed_messages() -> Result<()> {
    let (channel, mut rx) = open_channel(page_fixture())?;
    rx.try_recv()?;
    let before = channel.state();

    channel.handle_message(&InboundMessage::new(
        "https://evil.example",
        json!({"type": "updateData", "id": "snfhx2", "data": {"x": 9}}),
    ));
    channel.handle_message(&InboundMessage::new(ORIGIN, json!({"type": "updateData"})));
    channel.handle_message(&InboundMessage::new(ORIGIN, json!(42)));

    assert_eq!(channel.state(), before);
    assert!(rx.try_recv().is_err());
    return Ok(());
}

#[test]
fn it_closes_once_and_stops_listening() -> Result<()> {
    let (mut channel, mut rx) = open_channel(page_fixture())?;
    rx.try_recv()?;

    channel.close();
    channel.close();

    assert!(!channel.is_open());
    assert_eq!(
        rx.try_recv()?,
        ChildMessage::Close {
            id: SessionId::new("snfhx2")
        }
    );
    assert!(rx.try_recv().is_err());

    assert!(!channel.handle_message(&update_data("snfhx2", json!({"x": 2}))));
    assert_eq!(channel.state().data, json!({"x": 1}));
    return Ok(());
}
