pub const DEFAULT_FIELD_ATTRIBUTE: &str = "data-tina-field";
pub const DEFAULT_BODY_CLASS: &str = "__tina-quick-editing-enabled";
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuickEditOptions {
    /// Attribute marking an element as a field. Any attribute starting with
    /// this name is treated as a marker when it sits on the click target.
    pub field_attribute: String,
    /// Class added to the body while quick-edit is on.
    pub body_class: String,
    /// RGB triple used for outlines and hover tint.
    pub highlight_rgb: (u8, u8, u8),
    pub transition_ms: u32,
}

impl Default for QuickEditOptions {
    fn default() -> QuickEditOptions {
        return QuickEditOptions {
            field_attribute: DEFAULT_FIELD_ATTRIBUTE.to_string(),
            body_class: DEFAULT_BODY_CLASS.to_string(),
            highlight_rgb: (34, 150, 254),
            transition_ms: 150,
        };
    }
}

impl QuickEditOptions {
    /// Marker used on non-leaf containers, which get a tinted overlay instead
    /// of an inset shadow.
    pub fn overlay_attribute(&self) -> String {
        return format!("{}-overlay", self.field_attribute);
    }
}
