//! Control-plane envelope messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the `errors` / `messages` arrays in a control-plane envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiMessage {
    /// Numeric error code assigned by the API
    #[serde(default)]
    pub code: u32,
    /// Human readable message
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [code: {}]", self.message, self.code)
    }
}

/// Join a list of messages for single-line display.
pub fn join_messages(messages: &[ApiMessage]) -> String {
    messages.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
