use serde::Deserialize;
use serde::Serialize;

/// Attributes of one element on a click's propagation path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Attribute name/value pairs in document order.
    pub attributes: Vec<(String, String)>,
}

impl ElementSnapshot {
    pub fn new(attributes: Vec<(&str, &str)>) -> ElementSnapshot {
        return ElementSnapshot {
            attributes: attributes
                .into_iter()
                .map(|(name, value)| return (name.to_string(), value.to_string()))
                .collect(),
        };
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        return self.attributes.iter().any(|(key, _)| return key == name);
    }

    /// First attribute whose name starts with `prefix`.
    pub fn find_attribute_with_prefix(&self, prefix: &str) -> Option<(&str, &str)> {
        return self
            .attributes
            .iter()
            .find(|(key, _)| return key.starts_with(prefix))
            .map(|(key, value)| return (key.as_str(), value.as_str()));
    }
}

/// A click as seen by the document-level capturing listener. `path[0]` is the
/// target, followed by its ancestors up to the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub path: Vec<ElementSnapshot>,
}

impl ClickEvent {
    pub fn new(path: Vec<ElementSnapshot>) -> ClickEvent {
        return ClickEvent { path };
    }

    pub fn target(&self) -> Option<&ElementSnapshot> {
        return self.path.first();
    }

    pub fn ancestors(&self) -> impl Iterator<Item = &ElementSnapshot> {
        return self.path.iter().skip(1);
    }
}

/// Field name read off a marker attribute at click time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldReference {
    pub attribute: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Default action and further propagation must be suppressed.
    pub cancelled: bool,
    pub field: Option<FieldReference>,
    /// A `field:selected` message was posted to the editor.
    pub selected: bool,
}

impl ClickOutcome {
    pub fn ignored() -> ClickOutcome {
        return ClickOutcome::default();
    }
}
