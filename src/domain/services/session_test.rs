use std::rc::Rc;

use anyhow::bail;
use anyhow::Result;
use serde_json::json;
use test_utils::page_fixture;
use test_utils::ORIGIN;
use tokio::sync::mpsc;

use super::Session;
use crate::domain::models::ChildMessage;
use crate::domain::models::EditProps;
use crate::domain::models::InboundMessage;
use crate::domain::models::QuickEditOptions;
use crate::domain::services::identity::compute_session_id;
use crate::infrastructure::documents::VirtualDocument;
use crate::infrastructure::transports::ChannelTransport;

struct Fixture {
    session: Session,
    document: Rc<VirtualDocument>,
    rx: mpsc::UnboundedReceiver<ChildMessage>,
}

fn mount() -> Result<Fixture> {
    let (tx, rx) = mpsc::unbounded_channel::<ChildMessage>();
    let document = Rc::new(VirtualDocument::from_json(page_fixture())?);
    let session = Session::mount(
        EditProps::from_json("{a}", "{}", r#"{"x":1}"#)?,
        Rc::new(ChannelTransport::new(ORIGIN, tx)),
        document.clone(),
        QuickEditOptions::default(),
    )?;

    return Ok(Fixture {
        session,
        document,
        rx,
    });
}

fn quick_edit(value: bool) -> InboundMessage {
    return InboundMessage::new(ORIGIN, json!({"type": "quickEditEnabled", "value": value}));
}

fn drain(rx: &mut mpsc::UnboundedReceiver<ChildMessage>) -> Vec<ChildMessage> {
    let mut messages = vec![];
    while let Ok(message) = rx.try_recv() {
        messages.push(message);
    }
    return messages;
}

#[test]
fn it_mounts_with_one_open_message() -> Result<()> {
    let mut fixture = mount()?;
    let expected_id = compute_session_id("{a}", &json!({}))?;

    let messages = drain(&mut fixture.rx);
    assert_eq!(messages.len(), 1);
    match &messages[0] {
        ChildMessage::Open {
            id, data, query, ..
        } => {
            assert_eq!(*id, expected_id);
            assert_eq!(query, "{a}");
            assert_eq!(data["x"], 1);
        }
        _ => bail!("Wrong enum"),
    }

    let state = fixture.session.state();
    assert_eq!(fixture.session.id(), &expected_id);
    assert_eq!(state.data["x"], 1);
    assert!(state.is_client);
    return Ok(());
}

#[test]
fn it_updates_data_for_its_own_id_only() -> Result<()> {
    let mut fixture = mount()?;
    let id = fixture.session.id().to_string();

    fixture.session.handle_message(&InboundMessage::new(
        ORIGIN,
        json!({"type": "updateData", "id": "not-it", "data": {"x": 3}}),
    ));
    assert_eq!(fixture.session.state().data["x"], 1);

    fixture.session.handle_message(&InboundMessage::new(
        ORIGIN,
        json!({"type": "updateData", "id": id, "data": {"x": 2}}),
    ));
    assert_eq!(fixture.session.state().data["x"], 2);

    let messages = drain(&mut fixture.rx);
    assert_eq!(messages.last(), Some(&ChildMessage::QuickEdit { value: true }));
    return Ok(());
}

#[test]
fn it_notifies_subscribers_of_updates() -> Result<()> {
    let mut fixture = mount()?;
    let mut rx = fixture.session.subscribe();

    fixture.session.handle_message(&quick_edit(true));

    assert!(rx.has_changed()?);
    assert!(rx.borrow_and_update().quick_edit_enabled);
    return Ok(());
}

#[test]
fn it_installs_the_overlay_once() -> Result<()> {
    let mut fixture = mount()?;

    fixture.session.handle_message(&quick_edit(true));
    fixture.session.handle_message(&quick_edit(true));

    assert!(fixture.session.is_overlay_active());
    assert_eq!(fixture.document.head_styles().len(), 1);
    assert_eq!(fixture.document.body_classes().len(), 1);
    assert_eq!(fixture.document.click_listeners(), 1);
    return Ok(());
}

#[test]
fn it_removes_the_overlay_when_quick_edit_turns_off() -> Result<()> {
    let mut fixture = mount()?;

    fixture.session.handle_message(&quick_edit(true));
    fixture.session.handle_message(&quick_edit(false));

    assert!(!fixture.session.is_overlay_active());
    assert!(fixture.document.head_styles().is_empty());
    assert!(fixture.document.body_classes().is_empty());
    assert_eq!(fixture.document.click_listeners(), 0);
    return Ok(());
}

#[test]
fn it_ignores_quick_edit_from_foreign_origins() -> Result<()> {
    let mut fixture = mount()?;

    fixture.session.handle_message(&InboundMessage::new(
        "https://evil.example",
        json!({"type": "quickEditEnabled", "value": true}),
    ));

    assert!(!fixture.session.is_overlay_active());
    assert!(fixture.document.head_styles().is_empty());
    return Ok(());
}

#[test]
fn it_selects_fields_once_inside_the_editor() -> Result<()> {
    let mut fixture = mount()?;
    let id = fixture.session.id().to_string();
    fixture.session.handle_message(&quick_edit(true));

    let event = fixture.document.click("title")?.unwrap();
    let outcome = fixture.session.handle_click(&event);
    assert!(outcome.cancelled);
    assert!(!outcome.selected);

    fixture.session.handle_message(&InboundMessage::new(
        ORIGIN,
        json!({"type": "updateData", "id": id, "data": {"x": 1}}),
    ));
    drain(&mut fixture.rx);

    let outcome = fixture.session.handle_click(&event);
    assert!(outcome.cancelled);
    assert!(outcome.selected);
    assert_eq!(
        drain(&mut fixture.rx),
        vec![ChildMessage::FieldSelected {
            field_name: "blocks.0.title".to_string()
        }]
    );
    return Ok(());
}

#[test]
fn it_cleans_up_on_unmount() -> Result<()> {
    let mut fixture = mount()?;
    let id = fixture.session.id().clone();
    fixture.session.handle_message(&quick_edit(true));
    drain(&mut fixture.rx);

    fixture.session.unmount();
    fixture.session.unmount();

    assert!(!fixture.session.is_mounted());
    assert!(fixture.document.head_styles().is_empty());
    assert!(fixture.document.body_classes().is_empty());
    assert!(fixture.document.click("title")?.is_none());
    assert_eq!(drain(&mut fixture.rx), vec![ChildMessage::Close { id }]);

    fixture.session.handle_message(&quick_edit(true));
    assert!(!fixture.session.is_overlay_active());
    return Ok(());
}

#[test]
fn it_unmounts_on_drop() -> Result<()> {
    let Fixture {
        mut session,
        document,
        mut rx,
    } = mount()?;
    session.handle_message(&quick_edit(true));
    drain(&mut rx);

    drop(session);

    assert!(document.head_styles().is_empty());
    assert_eq!(document.click_listeners(), 0);
    assert_eq!(drain(&mut rx).len(), 1);
    return Ok(());
}

#[test]
fn it_survives_repeated_mount_cycles() -> Result<()> {
    let document = Rc::new(VirtualDocument::from_json(page_fixture())?);

    for _ in 0..3 {
        let (tx, _rx) = mpsc::unbounded_channel::<ChildMessage>();
        let mut session = Session::mount(
            EditProps::from_json("{a}", "{}", "{}")?,
            Rc::new(ChannelTransport::new(ORIGIN, tx)),
            document.clone(),
            QuickEditOptions::default(),
        )?;
        session.handle_message(&quick_edit(true));
        assert_eq!(document.click_listeners(), 1);
        session.unmount();
    }

    assert_eq!(document.click_listeners(), 0);
    assert!(document.head_styles().is_empty());
    return Ok(());
}
