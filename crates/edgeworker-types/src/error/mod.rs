//! Typed error definitions shared across the workspace.
//!
//! Transport failures live in `edgeworker-client`; this module only holds the
//! errors that are plain data and can be serialized back out (for `--json`
//! output or logging).

mod api;
mod config;

pub use api::{join_messages, ApiMessage};
pub use config::ConfigError;
