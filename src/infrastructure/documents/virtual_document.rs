#[cfg(test)]
#[path = "virtual_document_test.rs"]
mod tests;

use std::cell::RefCell;

use anyhow::bail;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::models::ClickEvent;
use crate::domain::models::ElementSnapshot;
use crate::domain::models::Presentation;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualElement {
    pub id: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub attributes: Vec<(String, String)>,
    #[serde(default)]
    pub children: Vec<VirtualElement>,
}

impl VirtualElement {
    fn snapshot(&self) -> ElementSnapshot {
        return ElementSnapshot {
            attributes: self.attributes.clone(),
        };
    }

    fn has_attribute(&self, name: &str) -> bool {
        return self.attributes.iter().any(|(key, _)| return key == name);
    }

    fn any(&self, predicate: &dyn Fn(&VirtualElement) -> bool) -> bool {
        if predicate(self) {
            return true;
        }

        return self.children.iter().any(|child| return child.any(predicate));
    }

    /// Elements from the root down to the element with `id`.
    fn path_to<'a>(&'a self, id: &str, path: &mut Vec<&'a VirtualElement>) -> bool {
        path.push(self);
        if self.id == id {
            return true;
        }

        for child in &self.children {
            if child.path_to(id, path) {
                return true;
            }
        }

        path.pop();
        return false;
    }
}

#[derive(Default)]
struct DocumentState {
    head_styles: Vec<String>,
    body_classes: Vec<String>,
    click_listeners: usize,
}

/// In-memory document used by the headless harness and tests. Records every
/// side effect quick-edit mode installs.
#[derive(Default)]
pub struct VirtualDocument {
    body: VirtualElement,
    state: RefCell<DocumentState>,
}

impl VirtualDocument {
    pub fn new(body: VirtualElement) -> VirtualDocument {
        return VirtualDocument {
            body,
            state: RefCell::new(DocumentState::default()),
        };
    }

    pub fn from_json(json: &str) -> Result<VirtualDocument> {
        let body: VirtualElement = serde_json::from_str(json)?;
        return Ok(VirtualDocument::new(body));
    }

    pub fn head_styles(&self) -> Vec<String> {
        return self.state.borrow().head_styles.clone();
    }

    pub fn body_classes(&self) -> Vec<String> {
        return self.state.borrow().body_classes.clone();
    }

    pub fn click_listeners(&self) -> usize {
        return self.state.borrow().click_listeners;
    }

    /// Dispatches a click on the element with `target_id`. Returns the event
    /// the capturing listener sees, or `None` when nothing is listening and
    /// the click goes straight to the page.
    pub fn click(&self, target_id: &str) -> Result<Option<ClickEvent>> {
        let mut path = vec![];
        if !self.body.path_to(target_id, &mut path) {
            bail!(format!("No element with id '{target_id}'"));
        }

        if self.click_listeners() == 0 {
            return Ok(None);
        }

        let snapshots = path
            .iter()
            .rev()
            .map(|element| return element.snapshot())
            .collect::<Vec<ElementSnapshot>>();

        return Ok(Some(ClickEvent::new(snapshots)));
    }
}

impl Presentation for VirtualDocument {
    fn inject_style(&self, css: &str) -> Result<()> {
        self.state.borrow_mut().head_styles.push(css.to_string());
        return Ok(());
    }

    fn remove_style(&self) -> Result<()> {
        self.state.borrow_mut().head_styles.pop();
        return Ok(());
    }

    fn add_body_class(&self, class: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.body_classes.iter().any(|e| return e == class) {
            state.body_classes.push(class.to_string());
        }
        return Ok(());
    }

    fn remove_body_class(&self, class: &str) -> Result<()> {
        self.state
            .borrow_mut()
            .body_classes
            .retain(|e| return e != class);
        return Ok(());
    }

    fn intercept_clicks(&self) -> Result<()> {
        self.state.borrow_mut().click_listeners += 1;
        return Ok(());
    }

    fn release_clicks(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.click_listeners = state.click_listeners.saturating_sub(1);
        return Ok(());
    }

    fn has_element_with_attribute(&self, attribute: &str) -> bool {
        return self
            .body
            .any(&|element| return element.has_attribute(attribute));
    }
}
