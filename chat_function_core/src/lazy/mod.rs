//! Deferred JSON parsing for text that arrives in fragments.
//!
//! A [`LazyJson`] holds the raw text accumulated so far together with a
//! memoized parse of that text. The cache, when present, is always the parse
//! of the current text: appending a fragment clears it, and a failed parse is
//! never stored, so the next read after more fragments arrive tries again.

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::Error as _};
use serde_json::{Error as JsonError, Value};

#[derive(Debug, Clone, Default)]
pub struct LazyJson {
    text: String,
    parsed: OnceCell<Value>,
}

impl LazyJson {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-parsed value. Reading it back performs no parsing.
    pub fn from_value(value: Value) -> Self {
        Self {
            text: String::new(),
            parsed: OnceCell::from(value),
        }
    }

    /// Raw text accumulated from fragments so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// `true` while there is neither a value nor any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.parsed.get().is_none() && self.text.trim().is_empty()
    }

    /// `true` once a value is cached for the current text.
    pub fn is_parsed(&self) -> bool {
        self.parsed.get().is_some()
    }

    /// Appends a fragment. Any cached value is dropped so the next read
    /// re-parses the longer text; an empty fragment leaves the state alone.
    pub fn push_str(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        self.text.push_str(fragment);
        self.parsed.take();
    }

    /// Returns the cached value, parsing the accumulated text on first use.
    ///
    /// Blank text yields `Ok(None)` without a parse attempt.
    pub fn get(&self) -> Result<Option<&Value>, JsonError> {
        if let Some(value) = self.parsed.get() {
            return Ok(Some(value));
        }
        if self.text.trim().is_empty() {
            return Ok(None);
        }
        self.parsed
            .get_or_try_init(|| serde_json::from_str(&self.text))
            .map(Some)
    }

    pub fn into_value(self) -> Result<Option<Value>, JsonError> {
        if let Some(value) = self.parsed.into_inner() {
            return Ok(Some(value));
        }
        if self.text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.text).map(Some)
    }
}

impl From<Value> for LazyJson {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl Serialize for LazyJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.get() {
            Ok(Some(value)) => value.serialize(serializer),
            Ok(None) => serializer.serialize_none(),
            Err(e) => Err(S::Error::custom(e)),
        }
    }
}

impl<'de> Deserialize<'de> for LazyJson {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::new()),
            value => Ok(Self::from_value(value)),
        }
    }
}
