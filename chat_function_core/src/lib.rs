#![deny(unsafe_code)]

#[cfg(feature = "schema")]
extern crate schemars;

pub mod delta;
pub mod error;
pub mod function;
pub mod lazy;

pub use delta::FunctionDelta;
pub use error::{DeserializationError, FunctionError, JsonField, ParseError};
pub use function::{Function, FunctionCall, MAX_NAME_LEN};
pub use lazy::LazyJson;
