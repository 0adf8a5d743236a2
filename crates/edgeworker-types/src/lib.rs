//! # Edgeworker Types
//!
//! Core types, models, and error definitions shared by the Edgeworker
//! preview SDK and CLI.
//!
//! - **`error`** - Typed errors for configuration and control-plane envelopes
//! - **`models`** - Domain models (Account, PreviewContext, PreviewSession, PreviewToken, WorkerBundle)
//!
//! ## Architecture Role
//!
//! `edgeworker-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!          edgeworker-types (this crate)
//!                  │
//!                  ▼
//!          edgeworker-client
//!                  │
//!                  ▼
//!           edgeworker-cli
//! ```
//!
//! Everything here is plain data: no I/O, no async.

pub mod error;
pub mod models;

pub use error::{ApiMessage, ConfigError};

pub use models::{
    Account, ApiCredentials, Binding, ModuleType, PreviewContext, PreviewMode, PreviewRouting,
    PreviewSession, PreviewToken, Route, RouteConfig, WorkerBundle, WorkerModule,
};
