use std::rc::Rc;

use anyhow::Result;

/// Document-level side effects of quick-edit mode. Implementations track what
/// they installed so every call here can be undone by its counterpart.
pub trait Presentation {
    /// Appends a style element to the document head.
    fn inject_style(&self, css: &str) -> Result<()>;

    /// Removes the style element added by `inject_style`, if any.
    fn remove_style(&self) -> Result<()>;

    fn add_body_class(&self, class: &str) -> Result<()>;

    fn remove_body_class(&self, class: &str) -> Result<()>;

    /// Starts routing clicks through a capturing document listener.
    fn intercept_clicks(&self) -> Result<()>;

    /// Removes the listener installed by `intercept_clicks`, if any.
    fn release_clicks(&self) -> Result<()>;

    /// Whether any element in the document carries exactly this attribute.
    fn has_element_with_attribute(&self, attribute: &str) -> bool;
}

pub type PresentationHandle = Rc<dyn Presentation>;
