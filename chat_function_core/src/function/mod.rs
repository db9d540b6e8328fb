//! The function descriptor exchanged with a chat-completion API.
//!
//! A [`Function`] is either built in one shot (a declaration sent with a
//! request, or a finished call) or assembled in place from a stream of
//! [`FunctionDelta`]s. The JSON-valued fields are parsed on first read only,
//! because intermediate fragments are not valid JSON on their own.

use serde::{Deserialize, Serialize, Serializer, de::DeserializeOwned, ser::SerializeStruct};
use serde_json::Value;

use crate::delta::FunctionDelta;
use crate::error::{DeserializationError, FunctionError, JsonField, ParseError};
use crate::lazy::LazyJson;

/// Longest name accepted by [`Function::validate_name`].
pub const MAX_NAME_LEN: usize = 64;

/// A call resolved from a [`Function`]: its name and fully parsed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Value,
}

impl TryFrom<Function> for FunctionCall {
    type Error = FunctionError;

    fn try_from(function: Function) -> Result<Self, Self::Error> {
        function.into_call()
    }
}

/// <https://platform.openai.com/docs/guides/function-calling>
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Function {
    name: Option<String>,
    description: Option<String>,
    parameters: LazyJson,
    arguments: LazyJson,
}

impl Function {
    /// Creates a finished descriptor.
    ///
    /// `name` may contain `a-z`, `A-Z`, `0-9`, underscores and dashes, up to
    /// 64 characters. This is not checked here; see [`Function::validate_name`].
    /// `parameters` is a JSON Schema (json-schema.org) describing the
    /// arguments the model should generate.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        parameters: Option<Value>,
        arguments: Option<Value>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description,
            parameters: parameters.map(LazyJson::from).unwrap_or_default(),
            arguments: arguments.map(LazyJson::from).unwrap_or_default(),
        }
    }

    /// Declaration whose parameters schema is generated from `T`.
    #[cfg(feature = "schema")]
    pub fn from_schema<T: schemars::JsonSchema>(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, FunctionError> {
        let schema = serde_json::to_value(schemars::schema_for!(T))?;
        Ok(Self::new(name, Some(description.into()), Some(schema), None))
    }

    /// `None` until a delta has supplied a non-blank name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// JSON Schema of the parameters, parsed on first read.
    pub fn parameters(&self) -> Result<Option<&Value>, FunctionError> {
        read(&self.parameters, JsonField::Parameters)
    }

    /// Call-time arguments, parsed on first read.
    ///
    /// Fails while the streamed text is still incomplete; the failure is not
    /// remembered, so reading again after further merges re-parses.
    pub fn arguments(&self) -> Result<Option<&Value>, FunctionError> {
        read(&self.arguments, JsonField::Arguments)
    }

    /// Deserializes the arguments into `T`; absent arguments read as `null`.
    pub fn arguments_as<T: DeserializeOwned>(&self) -> Result<T, FunctionError> {
        let args = self.arguments()?.cloned().unwrap_or(Value::Null);
        Ok(serde_json::from_value(args).map_err(DeserializationError::from)?)
    }

    /// Consumes the descriptor into a resolved call; absent arguments become `null`.
    pub fn into_call(self) -> Result<FunctionCall, FunctionError> {
        let name = self.name.ok_or(FunctionError::MissingName)?;
        let arguments = self
            .arguments
            .into_value()
            .map_err(|source| ParseError {
                field: JsonField::Arguments,
                source,
            })?
            .unwrap_or(Value::Null);
        Ok(FunctionCall { name, arguments })
    }

    /// Raw accumulated parameters text.
    pub fn parameters_text(&self) -> &str {
        self.parameters.text()
    }

    /// Raw accumulated arguments text.
    pub fn arguments_text(&self) -> &str {
        self.arguments.text()
    }

    /// Applies one streamed chunk.
    ///
    /// Non-blank `name`/`description` replace the current ones; `arguments`
    /// and `parameters` fragments are appended, dropping any cached parse.
    ///
    /// A value passed to [`Function::new`] lives only in that cache, so the
    /// first non-empty fragment replaces it: from then on the field is
    /// whatever the appended text parses to.
    pub fn merge(&mut self, delta: &FunctionDelta) {
        if let Some(name) = non_blank(&delta.name) {
            self.name = Some(name.to_owned());
        }
        if let Some(description) = non_blank(&delta.description) {
            self.description = Some(description.to_owned());
        }
        if let Some(fragment) = &delta.arguments {
            self.arguments.push_str(fragment);
        }
        if let Some(fragment) = &delta.parameters {
            self.parameters.push_str(fragment);
        }

        tracing::trace!(
            name = ?self.name,
            arguments_len = self.arguments.text().len(),
            parameters_len = self.parameters.text().len(),
            "merged function delta"
        );
    }

    /// Checks the documented naming contract. Never called implicitly.
    pub fn validate_name(&self) -> Result<(), FunctionError> {
        let name = self.name.as_deref().ok_or(FunctionError::MissingName)?;
        let invalid = |reason| FunctionError::InvalidName {
            name: name.to_owned(),
            reason,
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(invalid(
                "name may only contain a-z, A-Z, 0-9, underscores and dashes",
            ));
        }
        // ASCII only past this point, so bytes are characters.
        if name.len() > MAX_NAME_LEN {
            return Err(invalid("name is longer than 64 characters"));
        }
        Ok(())
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn read(lazy: &LazyJson, field: JsonField) -> Result<Option<&Value>, FunctionError> {
    lazy.get().map_err(|source| {
        tracing::debug!(
            %field,
            len = lazy.text().len(),
            error = %source,
            "accumulated text is not valid JSON yet"
        );
        FunctionError::from(ParseError { field, source })
    })
}

impl From<FunctionDelta> for Function {
    fn from(delta: FunctionDelta) -> Self {
        let mut function = Self::default();
        function.merge(&delta);
        function
    }
}

impl From<&FunctionDelta> for Function {
    fn from(delta: &FunctionDelta) -> Self {
        let mut function = Self::default();
        function.merge(delta);
        function
    }
}

impl Extend<FunctionDelta> for Function {
    fn extend<I: IntoIterator<Item = FunctionDelta>>(&mut self, deltas: I) {
        for delta in deltas {
            self.merge(&delta);
        }
    }
}

impl FromIterator<FunctionDelta> for Function {
    fn from_iter<I: IntoIterator<Item = FunctionDelta>>(deltas: I) -> Self {
        let mut function = Self::default();
        function.extend(deltas);
        function
    }
}

/*───────────────────────────────────────────────────────────────────────────*/

impl Serialize for Function {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = usize::from(self.name.is_some())
            + usize::from(self.description.is_some())
            + usize::from(!self.parameters.is_blank())
            + usize::from(!self.arguments.is_blank());

        let mut state = serializer.serialize_struct("Function", len)?;
        if let Some(name) = &self.name {
            state.serialize_field("name", name)?;
        }
        if let Some(description) = &self.description {
            state.serialize_field("description", description)?;
        }
        if !self.parameters.is_blank() {
            state.serialize_field("parameters", &self.parameters)?;
        }
        if !self.arguments.is_blank() {
            state.serialize_field("arguments", &self.arguments)?;
        }
        state.end()
    }
}
