#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use serde_json::Value;
use tokio::sync::watch;

use crate::domain::models::ViewState;

/// Holds the current `ViewState`. Every change replaces the snapshot and is
/// visible to subscribers before `update` returns.
pub struct ViewStore {
    tx: watch::Sender<ViewState>,
}

impl ViewStore {
    pub fn new(data: Value) -> ViewStore {
        let (tx, _rx) = watch::channel(ViewState::new(data));
        return ViewStore { tx };
    }

    pub fn snapshot(&self) -> ViewState {
        return self.tx.borrow().clone();
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        return self.tx.subscribe();
    }

    /// Applies `f` to a copy of the current state and publishes the result.
    /// Subscribers are only notified when something actually changed.
    pub fn update<F: FnOnce(&mut ViewState)>(&self, f: F) -> ViewState {
        self.tx.send_if_modified(|state| {
            let mut next = state.clone();
            f(&mut next);
            if next == *state {
                return false;
            }

            *state = next;
            return true;
        });

        return self.snapshot();
    }

    /// First effect after mount: marks the view as running client side and
    /// (re)seeds it with the host's data.
    pub fn bootstrap(&self, data: Value) -> ViewState {
        return self.update(|state| {
            state.is_client = true;
            state.data = data;
        });
    }
}
