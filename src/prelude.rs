//! Convenient re-exports for common usage patterns.
//!
//! ```rust
//! use chat_function::prelude::*;
//! ```

// Essential types
pub use crate::{Function, FunctionCall, FunctionDelta, FunctionError};

// Commonly used external types
pub use serde_json::{Value, json};

pub use serde::{Deserialize, Serialize};
