use std::rc::Rc;

use anyhow::Result;
use quickedit::domain::models::ChildMessage;
use quickedit::domain::models::EditProps;
use quickedit::domain::models::QuickEditOptions;
use quickedit::domain::services::identity::compute_session_id;
use quickedit::infrastructure::documents::VirtualDocument;
use quickedit::infrastructure::transports::ChannelTransport;
use serde_json::json;
use test_utils::page_fixture;
use test_utils::ORIGIN;
use tokio::sync::mpsc;

use super::parse_line;
use super::start;
use super::HarnessInput;

fn drain(rx: &mut mpsc::UnboundedReceiver<ChildMessage>) -> Vec<ChildMessage> {
    let mut messages = vec![];
    while let Ok(message) = rx.try_recv() {
        messages.push(message);
    }
    return messages;
}

#[test]
fn it_parses_input_lines() {
    assert_eq!(
        parse_line(r#"{"kind":"click","target":"title"}"#),
        Some(HarnessInput::Click {
            target: "title".to_string()
        })
    );
    assert_eq!(
        parse_line(r#"{"kind":"message","data":{"type":"quickEditEnabled","value":true}}"#),
        Some(HarnessInput::Message {
            origin: None,
            data: json!({"type": "quickEditEnabled", "value": true}),
        })
    );
    assert_eq!(parse_line(r#"{"kind":"unmount"}"#), Some(HarnessInput::Unmount));
    assert_eq!(parse_line("   "), None);
    assert_eq!(parse_line("not json"), None);
}

#[tokio::test]
async fn it_runs_an_editing_session() -> Result<()> {
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ChildMessage>();
    let (in_tx, mut in_rx) = mpsc::unbounded_channel::<HarnessInput>();
    let document = Rc::new(VirtualDocument::from_json(page_fixture())?);
    let id = compute_session_id("{a}", &json!({}))?;

    let inputs = vec![
        r#"{"kind":"message","data":{"type":"quickEditEnabled","value":true}}"#.to_string(),
        format!(
            r#"{{"kind":"message","data":{{"type":"updateData","id":"{id}","data":{{"x":2}}}}}}"#
        ),
        r#"{"kind":"click","target":"title-em"}"#.to_string(),
        r#"{"kind":"click","target":"footer"}"#.to_string(),
        r#"{"kind":"message","origin":"https://evil.example","data":{"type":"quickEditEnabled","value":false}}"#.to_string(),
        r#"{"kind":"unmount"}"#.to_string(),
    ];
    for line in inputs {
        in_tx.send(parse_line(&line).unwrap())?;
    }

    start(
        EditProps::from_json("{a}", "{}", r#"{"x":1}"#)?,
        Rc::new(ChannelTransport::new(ORIGIN, out_tx)),
        document.clone(),
        QuickEditOptions::default(),
        &mut in_rx,
    )
    .await?;

    let messages = drain(&mut out_rx);
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].kind(), "open");
    assert_eq!(messages[1], ChildMessage::QuickEdit { value: true });
    assert_eq!(
        messages[2],
        ChildMessage::FieldSelected {
            field_name: "blocks.0.title".to_string()
        }
    );
    assert_eq!(messages[3], ChildMessage::Close { id });

    assert!(document.head_styles().is_empty());
    assert!(document.body_classes().is_empty());
    assert_eq!(document.click_listeners(), 0);
    return Ok(());
}

#[tokio::test]
async fn it_unmounts_when_input_ends() -> Result<()> {
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ChildMessage>();
    let (in_tx, mut in_rx) = mpsc::unbounded_channel::<HarnessInput>();
    drop(in_tx);

    start(
        EditProps::from_json("{a}", "{}", "{}")?,
        Rc::new(ChannelTransport::new(ORIGIN, out_tx)),
        Rc::new(VirtualDocument::default()),
        QuickEditOptions::default(),
        &mut in_rx,
    )
    .await?;

    let kinds = drain(&mut out_rx)
        .iter()
        .map(|message| return message.kind())
        .collect::<Vec<_>>();
    assert_eq!(kinds, vec!["open", "close"]);
    return Ok(());
}
