#[cfg(all(test, target_arch = "wasm32"))]
#[path = "presentation_test.rs"]
mod tests;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;
use anyhow::Result;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Document;
use web_sys::Element;
use web_sys::Event;

use super::js_error;
use crate::domain::models::ClickEvent;
use crate::domain::models::ClickOutcome;
use crate::domain::models::ElementSnapshot;
use crate::domain::models::Presentation;

pub type ClickHandler = Box<dyn Fn(&ClickEvent) -> ClickOutcome>;

fn snapshot(element: &Element) -> ElementSnapshot {
    let attributes = element
        .get_attribute_names()
        .iter()
        .filter_map(|name| return name.as_string())
        .map(|name| {
            let value = element.get_attribute(&name).unwrap_or_default();
            return (name, value);
        })
        .collect();

    return ElementSnapshot { attributes };
}

fn click_event(event: &Event) -> Option<ClickEvent> {
    let mut current = event.target()?.dyn_into::<Element>().ok();
    let mut path = vec![];
    while let Some(element) = current {
        path.push(snapshot(&element));
        current = element.parent_element();
    }

    return Some(ClickEvent::new(path));
}

/// Applies quick-edit side effects to the live DOM.
pub struct BrowserPresentation {
    document: Document,
    style: RefCell<Option<Element>>,
    listener: RefCell<Option<Closure<dyn FnMut(Event)>>>,
    handler: Rc<RefCell<Option<ClickHandler>>>,
}

impl BrowserPresentation {
    pub fn new() -> Result<BrowserPresentation> {
        let document = web_sys::window()
            .and_then(|window| return window.document())
            .ok_or_else(|| return anyhow!("No document exists"))?;

        return Ok(BrowserPresentation {
            document,
            style: RefCell::new(None),
            listener: RefCell::new(None),
            handler: Rc::new(RefCell::new(None)),
        });
    }

    /// Receives every click caught by the capturing listener.
    pub fn set_click_handler(&self, handler: ClickHandler) {
        *self.handler.borrow_mut() = Some(handler);
    }
}

impl Presentation for BrowserPresentation {
    fn inject_style(&self, css: &str) -> Result<()> {
        let style = self.document.create_element("style").map_err(js_error)?;
        style.set_attribute("type", "text/css").map_err(js_error)?;
        style.set_text_content(Some(css));

        let head = self
            .document
            .head()
            .ok_or_else(|| return anyhow!("Document has no head"))?;
        head.append_child(&style).map_err(js_error)?;

        if let Some(previous) = self.style.replace(Some(style)) {
            previous.remove();
        }
        return Ok(());
    }

    fn remove_style(&self) -> Result<()> {
        if let Some(style) = self.style.take() {
            style.remove();
        }
        return Ok(());
    }

    fn add_body_class(&self, class: &str) -> Result<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| return anyhow!("Document has no body"))?;
        body.class_list().add_1(class).map_err(js_error)?;
        return Ok(());
    }

    fn remove_body_class(&self, class: &str) -> Result<()> {
        if let Some(body) = self.document.body() {
            body.class_list().remove_1(class).map_err(js_error)?;
        }
        return Ok(());
    }

    fn intercept_clicks(&self) -> Result<()> {
        if self.listener.borrow().is_some() {
            return Ok(());
        }

        let handler = self.handler.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let click = match click_event(&event) {
                Some(click) => click,
                None => return,
            };

            let outcome = match handler.borrow().as_ref() {
                Some(handler) => handler(&click),
                None => return,
            };

            if outcome.cancelled {
                event.prevent_default();
                event.stop_propagation();
            }
        });

        self.document
            .add_event_listener_with_callback_and_bool(
                "click",
                closure.as_ref().unchecked_ref(),
                true,
            )
            .map_err(js_error)?;
        *self.listener.borrow_mut() = Some(closure);

        return Ok(());
    }

    fn release_clicks(&self) -> Result<()> {
        if let Some(closure) = self.listener.take() {
            self.document
                .remove_event_listener_with_callback_and_bool(
                    "click",
                    closure.as_ref().unchecked_ref(),
                    true,
                )
                .map_err(js_error)?;
        }
        return Ok(());
    }

    fn has_element_with_attribute(&self, attribute: &str) -> bool {
        return matches!(
            self.document.query_selector(&format!("[{attribute}]")),
            Ok(Some(_))
        );
    }
}
