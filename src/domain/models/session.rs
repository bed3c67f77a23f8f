#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::fmt;

use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Identifier correlating a child frame's content view with the editor state
/// held by the parent window.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: &str) -> SessionId {
        return SessionId(id.to_string());
    }

    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

/// Props supplied by the hosting view at mount time. Values are held as JSON
/// so they can be posted to the parent as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditProps {
    pub query: String,
    pub variables: Value,
    pub data: Value,
}

impl EditProps {
    /// Clones the host's values into JSON. Anything that can't be represented
    /// as JSON fails the whole conversion rather than being dropped.
    pub fn new<V: Serialize, D: Serialize>(query: &str, variables: &V, data: &D) -> Result<EditProps> {
        let variables = serde_json::to_value(variables)
            .context("Variables can not be represented as JSON")?;
        let data = serde_json::to_value(data).context("Data can not be represented as JSON")?;

        return Ok(EditProps {
            query: query.to_string(),
            variables,
            data,
        });
    }

    pub fn from_json(query: &str, variables: &str, data: &str) -> Result<EditProps> {
        let variables: Value =
            serde_json::from_str(variables).context("Variables are not valid JSON")?;
        let data: Value = serde_json::from_str(data).context("Data is not valid JSON")?;

        return Ok(EditProps {
            query: query.to_string(),
            variables,
            data,
        });
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditSession {
    pub id: SessionId,
    pub query: String,
    pub variables: Value,
    pub data: Value,
}

impl EditSession {
    pub fn new(id: SessionId, props: EditProps) -> EditSession {
        return EditSession {
            id,
            query: props.query,
            variables: props.variables,
            data: props.data,
        };
    }
}
