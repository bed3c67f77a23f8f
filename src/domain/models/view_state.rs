use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Snapshot of what the consuming view renders from.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub data: Value,
    pub is_client: bool,
    pub quick_edit_enabled: bool,
    pub is_in_editor_frame: bool,
}

impl ViewState {
    pub fn new(data: Value) -> ViewState {
        return ViewState {
            data,
            ..ViewState::default()
        };
    }

    /// Reads the current data back into the host's own type.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        return Ok(serde_json::from_value(self.data.clone())?);
    }
}
