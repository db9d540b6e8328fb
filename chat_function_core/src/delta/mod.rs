//! Streamed partial updates of a function descriptor.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One streamed chunk of a function descriptor.
///
/// `name` and `description` are whole values that replace earlier ones;
/// `arguments` and `parameters` are fragments of JSON text that only become
/// parseable once every fragment has been appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FunctionDelta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "fragment")]
    pub parameters: Option<String>,
    #[serde(default, deserialize_with = "fragment")]
    pub arguments: Option<String>,
}

impl FunctionDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parameters(mut self, fragment: impl Into<String>) -> Self {
        self.parameters = Some(fragment.into());
        self
    }

    pub fn with_arguments(mut self, fragment: impl Into<String>) -> Self {
        self.arguments = Some(fragment.into());
        self
    }
}

// Streams normally carry the fragment as a JSON string. Anything else is a
// complete value sent inline, so its compact text stands in for the fragment.
fn fragment<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}
