#[cfg(test)]
#[path = "channel_test.rs"]
mod tests;

use super::ViewStore;
use crate::domain::models::ChildMessage;
use crate::domain::models::EditSession;
use crate::domain::models::InboundMessage;
use crate::domain::models::ParentMessage;
use crate::domain::models::PresentationHandle;
use crate::domain::models::SessionId;
use crate::domain::models::TransportHandle;
use crate::domain::models::ViewState;

/// Child side of the synchronization protocol for one mounted view.
pub struct SyncChannel {
    session: EditSession,
    store: ViewStore,
    transport: TransportHandle,
    presentation: PresentationHandle,
    field_attribute: String,
    open: bool,
}

impl SyncChannel {
    /// Bootstraps the view state and announces the session to the editor.
    pub fn open(
        session: EditSession,
        transport: TransportHandle,
        presentation: PresentationHandle,
        field_attribute: &str,
    ) -> SyncChannel {
        let store = ViewStore::new(session.data.clone());
        store.bootstrap(session.data.clone());

        transport.send(&ChildMessage::open(&session));
        tracing::info!(id = %session.id, "Opened quick-edit session");

        return SyncChannel {
            session,
            store,
            transport,
            presentation,
            field_attribute: field_attribute.to_string(),
            open: true,
        };
    }

    pub fn id(&self) -> &SessionId {
        return &self.session.id;
    }

    pub fn is_open(&self) -> bool {
        return self.open;
    }

    pub fn store(&self) -> &ViewStore {
        return &self.store;
    }

    pub fn state(&self) -> ViewState {
        return self.store.snapshot();
    }

    /// Parses an inbound envelope if this channel is still listening.
    pub fn receive(&self, message: &InboundMessage) -> Option<ParentMessage> {
        if !self.open {
            return None;
        }

        return message.parse(&self.transport.origin());
    }

    /// Applies a parent message to the view state. Returns whether the
    /// message was meant for this session.
    pub fn apply(&self, message: &ParentMessage) -> bool {
        if !self.open {
            return false;
        }

        match message {
            ParentMessage::QuickEditEnabled { value } => {
                let value = *value;
                self.store.update(|state| {
                    state.quick_edit_enabled = value;
                });
                return true;
            }
            ParentMessage::UpdateData { id, data } => {
                if *id != self.session.id {
                    tracing::debug!(id = %id, session = %self.session.id, "Ignoring update for another session");
                    return false;
                }

                self.store.update(|state| {
                    state.data = data.clone();
                    state.is_in_editor_frame = true;
                });

                let has_fields = self
                    .presentation
                    .has_element_with_attribute(&self.field_attribute);
                self.transport
                    .send(&ChildMessage::QuickEdit { value: has_fields });

                return true;
            }
        }
    }

    pub fn handle_message(&self, message: &InboundMessage) -> bool {
        if let Some(parent_message) = self.receive(message) {
            return self.apply(&parent_message);
        }

        return false;
    }

    /// Tells the editor the view is gone and stops accepting messages. Only
    /// the first call posts.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }

        self.open = false;
        self.transport.send(&ChildMessage::Close {
            id: self.session.id.clone(),
        });
        tracing::info!(id = %self.session.id, "Closed quick-edit session");
    }
}
