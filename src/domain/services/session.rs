#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::watch;

use super::identity::compute_session_id;
use super::OverlayManager;
use super::SyncChannel;
use crate::domain::models::ClickEvent;
use crate::domain::models::ClickOutcome;
use crate::domain::models::EditProps;
use crate::domain::models::EditSession;
use crate::domain::models::InboundMessage;
use crate::domain::models::PresentationHandle;
use crate::domain::models::QuickEditOptions;
use crate::domain::models::SessionId;
use crate::domain::models::TransportHandle;
use crate::domain::models::ViewState;

/// One mounted view: its synchronization channel plus the document overlay.
/// Dropping the session unmounts it.
pub struct Session {
    channel: SyncChannel,
    overlay: OverlayManager,
}

impl Session {
    pub fn mount(
        props: EditProps,
        transport: TransportHandle,
        presentation: PresentationHandle,
        options: QuickEditOptions,
    ) -> Result<Session> {
        let id = compute_session_id(&props.query, &props.variables)?;
        let channel = SyncChannel::open(
            EditSession::new(id, props),
            transport.clone(),
            presentation.clone(),
            &options.field_attribute,
        );

        return Ok(Session {
            channel,
            overlay: OverlayManager::new(presentation, transport, options),
        });
    }

    pub fn id(&self) -> &SessionId {
        return self.channel.id();
    }

    pub fn state(&self) -> ViewState {
        return self.channel.state();
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        return self.channel.store().subscribe();
    }

    pub fn is_mounted(&self) -> bool {
        return self.channel.is_open();
    }

    pub fn is_overlay_active(&self) -> bool {
        return self.overlay.is_active();
    }

    pub fn handle_message(&mut self, message: &InboundMessage) {
        if !self.channel.handle_message(message) {
            return;
        }

        self.sync_overlay();
    }

    pub fn handle_click(&self, event: &ClickEvent) -> ClickOutcome {
        let in_editor_frame = self.channel.state().is_in_editor_frame;
        return self.overlay.handle_click(event, in_editor_frame);
    }

    /// Tears down the overlay and tells the editor the view is gone. Safe to
    /// call more than once.
    pub fn unmount(&mut self) {
        self.overlay.deactivate();
        self.channel.close();
    }

    fn sync_overlay(&mut self) {
        if !self.channel.state().quick_edit_enabled {
            self.overlay.deactivate();
            return;
        }

        if let Err(err) = self.overlay.activate() {
            tracing::warn!(err = ?err, id = %self.id(), "Failed to activate quick-edit overlay");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.unmount();
    }
}
