//! Error types for the preview client.

use edgeworker_types::error::join_messages;
use edgeworker_types::{ApiMessage, ConfigError};
use thiserror::Error;

/// Errors that can occur while negotiating a preview.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed before a response was received.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Control plane answered with an unsuccessful envelope.
    #[error("API request failed ({status}): {}", join_messages(.errors))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Errors reported in the envelope.
        errors: Vec<ApiMessage>,
    },

    /// Control plane returned a body that is not a valid envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The exchange endpoint did not return a usable session.
    #[error("Could not create remote preview session on {target}.")]
    SessionCreation {
        /// "host `h` on zone `z`" or "your account".
        target: String,
    },

    /// A URL issued by the platform could not be parsed or rewritten.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The caller cancelled the operation.
    #[error("Operation cancelled")]
    Cancelled,

    /// Access token for an SSO-gated host could not be obtained.
    #[error("Access authentication failed for {host}: {message}")]
    Access {
        /// Host the token was requested for.
        host: String,
        /// What went wrong.
        message: String,
    },

    /// Client configuration is incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Whether this error is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
