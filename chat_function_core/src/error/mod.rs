//! error.rs – Error types for function descriptors

use serde_json::Error as JsonError;
use thiserror::Error;

/*───────────────────────────────────────────────────────────────────────────*/

/// Which JSON-valued field of a [`Function`](crate::Function) failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonField {
    Parameters,
    Arguments,
}

impl std::fmt::Display for JsonField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonField::Parameters => f.write_str("parameters"),
            JsonField::Arguments => f.write_str("arguments"),
        }
    }
}

/// The accumulated text of a field is not (yet) a valid JSON document.
///
/// Expected while a stream is still delivering fragments; carries the full
/// `serde_json::Error` so callers can inspect line/column information.
#[derive(Debug, Error)]
#[error("Failed to parse accumulated {field} text: {source}")]
pub struct ParseError {
    pub field: JsonField,
    #[source]
    pub source: JsonError,
}

/// Typed‑argument deserialisation failed (JSON → `T`).
#[derive(Debug, Error)]
#[error(transparent)]
pub struct DeserializationError(#[from] pub JsonError);

/*───────────────────────────────────────────────────────────────────────────*/

/// All the ways reading or resolving a [`Function`](crate::Function) can fail.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FunctionError {
    /// No delta has supplied a name yet.
    #[error("Function has no name")]
    MissingName,

    /// The name breaks the documented `[A-Za-z0-9_-]{1,64}` contract.
    #[error("Invalid function name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Deserialize(#[from] DeserializationError),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] JsonError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_the_field() {
        let source = serde_json::from_str::<serde_json::Value>("{\"loc").unwrap_err();
        let err = FunctionError::from(ParseError {
            field: JsonField::Arguments,
            source,
        });

        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse accumulated arguments text"));
        assert!(matches!(
            err,
            FunctionError::Parse(ParseError {
                field: JsonField::Arguments,
                ..
            })
        ));
    }
}
