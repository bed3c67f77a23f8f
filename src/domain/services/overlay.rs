#[cfg(test)]
#[path = "overlay_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::ChildMessage;
use crate::domain::models::ClickEvent;
use crate::domain::models::ClickOutcome;
use crate::domain::models::FieldReference;
use crate::domain::models::PresentationHandle;
use crate::domain::models::QuickEditOptions;
use crate::domain::models::TransportHandle;

/// Outline and hover styling for both marker conventions.
pub fn stylesheet(options: &QuickEditOptions) -> String {
    let field = &options.field_attribute;
    let overlay = options.overlay_attribute();
    let (r, g, b) = options.highlight_rgb;
    let ms = options.transition_ms;

    return format!(
        r#"
[{field}] {{
  outline: 2px dashed rgba({r},{g},{b},0.5);
  transition: box-shadow ease-out {ms}ms;
}}
[{field}]:hover {{
  box-shadow: inset 100vi 100vh rgba({r},{g},{b},0.3);
  outline: 2px solid rgba({r},{g},{b},1);
  cursor: pointer;
}}
[{overlay}] {{
  outline: 2px dashed rgba({r},{g},{b},0.5);
  position: relative;
}}
[{overlay}]:hover {{
  cursor: pointer;
  outline: 2px solid rgba({r},{g},{b},1);
}}
[{overlay}]::after {{
  content: '';
  position: absolute;
  inset: 0;
  z-index: 20;
  transition: opacity ease-out {ms}ms;
  background-color: rgba({r},{g},{b},0.3);
  opacity: 0;
}}
[{overlay}]:hover::after {{
  opacity: 1;
}}
"#
    )
    .trim()
    .to_string();
}

/// Resolves the field a click targets. The target itself counts when any of
/// its attributes starts with the marker prefix; otherwise the nearest
/// ancestor carrying exactly the direct or overlay marker is used.
pub fn resolve_field(event: &ClickEvent, options: &QuickEditOptions) -> Option<FieldReference> {
    let prefix = &options.field_attribute;
    let overlay = options.overlay_attribute();
    let target = event.target()?;

    let element = if target.find_attribute_with_prefix(prefix).is_some() {
        target
    } else {
        event.ancestors().find(|ancestor| {
            return ancestor.has_attribute(prefix) || ancestor.has_attribute(&overlay);
        })?
    };

    return element
        .find_attribute_with_prefix(prefix)
        .map(|(attribute, name)| {
            return FieldReference {
                attribute: attribute.to_string(),
                name: name.to_string(),
            };
        });
}

/// Installs quick-edit affordances on the document and turns clicks on marked
/// elements into `field:selected` messages.
pub struct OverlayManager {
    presentation: PresentationHandle,
    transport: TransportHandle,
    options: QuickEditOptions,
    active: bool,
}

impl OverlayManager {
    pub fn new(
        presentation: PresentationHandle,
        transport: TransportHandle,
        options: QuickEditOptions,
    ) -> OverlayManager {
        return OverlayManager {
            presentation,
            transport,
            options,
            active: false,
        };
    }

    pub fn is_active(&self) -> bool {
        return self.active;
    }

    /// Installs the style element, body class, and click interception once.
    /// A partial install is rolled back before the error is returned.
    pub fn activate(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }

        let res = self.install();
        self.active = true;
        if let Err(err) = res {
            self.deactivate();
            return Err(err);
        }

        tracing::debug!("Quick-edit overlay activated");
        return Ok(());
    }

    fn install(&self) -> Result<()> {
        self.presentation.inject_style(&stylesheet(&self.options))?;
        self.presentation.add_body_class(&self.options.body_class)?;
        self.presentation.intercept_clicks()?;

        return Ok(());
    }

    /// Removes everything `activate` installed. Every step runs even if an
    /// earlier one fails.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        if let Err(err) = self.presentation.release_clicks() {
            tracing::warn!(err = ?err, "Failed to release click listener");
        }
        if let Err(err) = self
            .presentation
            .remove_body_class(&self.options.body_class)
        {
            tracing::warn!(err = ?err, "Failed to remove quick-edit body class");
        }
        if let Err(err) = self.presentation.remove_style() {
            tracing::warn!(err = ?err, "Failed to remove quick-edit styles");
        }

        tracing::debug!("Quick-edit overlay deactivated");
    }

    /// Handles a click seen by the capturing listener. Clicks on marked
    /// elements are always cancelled, but the selection is only reported when
    /// the page is known to be inside an editor frame.
    pub fn handle_click(&self, event: &ClickEvent, in_editor_frame: bool) -> ClickOutcome {
        if !self.active {
            return ClickOutcome::ignored();
        }

        let field = match resolve_field(event, &self.options) {
            Some(field) => field,
            None => return ClickOutcome::ignored(),
        };

        let mut selected = false;
        if !field.name.is_empty() {
            if in_editor_frame {
                self.transport.send(&ChildMessage::FieldSelected {
                    field_name: field.name.to_string(),
                });
                selected = true;
            } else {
                tracing::debug!(field = field.name, "Swallowing field selection outside an editor frame");
            }
        }

        return ClickOutcome {
            cancelled: true,
            field: Some(field),
            selected,
        };
    }
}
