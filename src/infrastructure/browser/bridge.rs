use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::MessageEvent;
use web_sys::Window;

use super::js_to_json;
use super::json_to_js;
use super::BrowserPresentation;
use super::BrowserTransport;
use crate::domain::models::ClickEvent;
use crate::domain::models::ClickOutcome;
use crate::domain::models::EditProps;
use crate::domain::models::InboundMessage;
use crate::domain::models::QuickEditOptions;
use crate::domain::services::Session;

fn to_js_error(err: anyhow::Error) -> JsValue {
    return JsValue::from_str(&err.to_string());
}

/// Quick-edit session bound to the current window, exported to JavaScript.
/// Call `unmount` (or `free`) when the owning view goes away.
#[wasm_bindgen]
pub struct QuickEditBridge {
    window: Window,
    session: Rc<RefCell<Session>>,
    message_listener: Option<Closure<dyn FnMut(MessageEvent)>>,
}

#[wasm_bindgen]
impl QuickEditBridge {
    #[wasm_bindgen(constructor)]
    pub fn new(query: &str, variables: JsValue, data: JsValue) -> Result<QuickEditBridge, JsValue> {
        let window = web_sys::window().ok_or_else(|| return JsValue::from_str("No global window exists"))?;
        let props = EditProps {
            query: query.to_string(),
            variables: js_to_json(&variables).map_err(to_js_error)?,
            data: js_to_json(&data).map_err(to_js_error)?,
        };

        let presentation = Rc::new(BrowserPresentation::new().map_err(to_js_error)?);
        let transport = Rc::new(BrowserTransport::new().map_err(to_js_error)?);
        let session = Session::mount(
            props,
            transport,
            presentation.clone(),
            QuickEditOptions::default(),
        )
        .map_err(to_js_error)?;
        let session = Rc::new(RefCell::new(session));

        let weak_session = Rc::downgrade(&session);
        presentation.set_click_handler(Box::new(move |click: &ClickEvent| {
            let session = match weak_session.upgrade() {
                Some(session) => session,
                None => return ClickOutcome::ignored(),
            };
            let outcome = match session.try_borrow() {
                Ok(session) => session.handle_click(click),
                Err(_) => ClickOutcome::ignored(),
            };
            return outcome;
        }));

        let listener_session = Rc::downgrade(&session);
        let message_listener = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let data = match js_to_json(&event.data()) {
                Ok(data) => data,
                Err(err) => {
                    tracing::debug!(err = ?err, "Ignoring message without a JSON form");
                    return;
                }
            };

            if let Some(session) = listener_session.upgrade() {
                if let Ok(mut session) = session.try_borrow_mut() {
                    session.handle_message(&InboundMessage::new(&event.origin(), data));
                }
            }
        });
        window
            .add_event_listener_with_callback("message", message_listener.as_ref().unchecked_ref())?;

        return Ok(QuickEditBridge {
            window,
            session,
            message_listener: Some(message_listener),
        });
    }

    pub fn id(&self) -> String {
        return self.session.borrow().id().to_string();
    }

    /// Latest data: the initial prop, or the last `updateData` payload.
    pub fn data(&self) -> Result<JsValue, JsValue> {
        let state = self.session.borrow().state();
        return json_to_js(&state.data).map_err(to_js_error);
    }

    #[wasm_bindgen(js_name = isClient)]
    pub fn is_client(&self) -> bool {
        return self.session.borrow().state().is_client;
    }

    #[wasm_bindgen(js_name = isQuickEditEnabled)]
    pub fn is_quick_edit_enabled(&self) -> bool {
        return self.session.borrow().state().quick_edit_enabled;
    }

    pub fn unmount(&mut self) {
        if let Some(listener) = self.message_listener.take() {
            let res = self.window.remove_event_listener_with_callback(
                "message",
                listener.as_ref().unchecked_ref(),
            );
            if let Err(err) = res {
                tracing::warn!(err = ?err, "Failed to remove message listener");
            }
        }

        if let Ok(mut session) = self.session.try_borrow_mut() {
            session.unmount();
        }
    }
}

impl Drop for QuickEditBridge {
    fn drop(&mut self) {
        self.unmount();
    }
}
