#[cfg(test)]
#[path = "router_test.rs"]
mod tests;

use std::collections::HashMap;

use anyhow::bail;
use anyhow::Result;

use super::identity::compute_session_id;
use super::OverlayManager;
use super::SyncChannel;
use crate::domain::models::ClickEvent;
use crate::domain::models::ClickOutcome;
use crate::domain::models::EditProps;
use crate::domain::models::EditSession;
use crate::domain::models::InboundMessage;
use crate::domain::models::ParentMessage;
use crate::domain::models::PresentationHandle;
use crate::domain::models::QuickEditOptions;
use crate::domain::models::SessionId;
use crate::domain::models::TransportHandle;
use crate::domain::models::ViewState;

/// Hosts several sessions in one window. A single message listener and a
/// single document overlay are shared, and inbound messages are keyed on the
/// session id instead of being seen by every listener.
pub struct SessionRouter {
    transport: TransportHandle,
    presentation: PresentationHandle,
    options: QuickEditOptions,
    channels: HashMap<SessionId, SyncChannel>,
    overlay: OverlayManager,
}

impl SessionRouter {
    pub fn new(
        transport: TransportHandle,
        presentation: PresentationHandle,
        options: QuickEditOptions,
    ) -> SessionRouter {
        let overlay = OverlayManager::new(presentation.clone(), transport.clone(), options.clone());

        return SessionRouter {
            transport,
            presentation,
            options,
            channels: HashMap::new(),
            overlay,
        };
    }

    pub fn mount(&mut self, props: EditProps) -> Result<SessionId> {
        let id = compute_session_id(&props.query, &props.variables)?;
        if self.channels.contains_key(&id) {
            bail!(format!("A session with id {id} is already mounted"));
        }

        let channel = SyncChannel::open(
            EditSession::new(id.clone(), props),
            self.transport.clone(),
            self.presentation.clone(),
            &self.options.field_attribute,
        );
        self.channels.insert(id.clone(), channel);

        return Ok(id);
    }

    pub fn len(&self) -> usize {
        return self.channels.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.channels.is_empty();
    }

    pub fn state(&self, id: &SessionId) -> Option<ViewState> {
        return self.channels.get(id).map(|channel| return channel.state());
    }

    pub fn is_overlay_active(&self) -> bool {
        return self.overlay.is_active();
    }

    pub fn handle_message(&mut self, message: &InboundMessage) {
        let parent_message = match message.parse(&self.transport.origin()) {
            Some(parent_message) => parent_message,
            None => return,
        };

        match &parent_message {
            ParentMessage::UpdateData { id, .. } => {
                if let Some(channel) = self.channels.get(id) {
                    channel.apply(&parent_message);
                } else {
                    tracing::debug!(id = %id, "Ignoring update for unknown session");
                }
            }
            ParentMessage::QuickEditEnabled { .. } => {
                for channel in self.channels.values() {
                    channel.apply(&parent_message);
                }
            }
        }

        self.sync_overlay();
    }

    /// Resolves a click through the shared overlay. The selection is reported
    /// once if any mounted session is inside an editor frame.
    pub fn handle_click(&self, event: &ClickEvent) -> ClickOutcome {
        let in_editor_frame = self
            .channels
            .values()
            .any(|channel| return channel.state().is_in_editor_frame);

        return self.overlay.handle_click(event, in_editor_frame);
    }

    /// Closes one session. The overlay is torn down once no remaining session
    /// wants it.
    pub fn unmount(&mut self, id: &SessionId) -> bool {
        let mut channel = match self.channels.remove(id) {
            Some(channel) => channel,
            None => return false,
        };

        channel.close();
        self.sync_overlay();
        return true;
    }

    pub fn unmount_all(&mut self) {
        let ids = self.channels.keys().cloned().collect::<Vec<SessionId>>();
        for id in ids {
            self.unmount(&id);
        }
    }

    fn sync_overlay(&mut self) {
        let wanted = self
            .channels
            .values()
            .any(|channel| return channel.state().quick_edit_enabled);

        if !wanted {
            self.overlay.deactivate();
            return;
        }

        if let Err(err) = self.overlay.activate() {
            tracing::warn!(err = ?err, "Failed to activate quick-edit overlay");
        }
    }
}

impl Drop for SessionRouter {
    fn drop(&mut self) {
        self.unmount_all();
    }
}
