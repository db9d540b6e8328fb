//! Function descriptors for chat-completion function calling.
//!
//! A [`Function`] names a callable, optionally describes it, carries the JSON
//! Schema of its parameters and, on the response side, the arguments the
//! model chose. Streamed responses deliver those arguments as text fragments;
//! merge each [`FunctionDelta`] as it arrives and read the parsed value once
//! the stream is done:
//!
//! ```rust
//! use chat_function::prelude::*;
//!
//! let mut function = Function::from(FunctionDelta::new().with_name("get_weather"));
//! function.merge(&FunctionDelta::new().with_arguments("{\"loc"));
//! function.merge(&FunctionDelta::new().with_arguments("ation\":\"NYC\"}"));
//!
//! assert_eq!(function.name(), Some("get_weather"));
//! assert_eq!(function.arguments().unwrap(), Some(&json!({ "location": "NYC" })));
//! ```
#![deny(unsafe_code)]

pub mod prelude;

pub use chat_function_core::{
    DeserializationError, Function, FunctionCall, FunctionDelta, FunctionError, JsonField,
    LazyJson, MAX_NAME_LEN, ParseError,
};
