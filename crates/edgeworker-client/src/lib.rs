#![doc = include_str!("../README.md")]

mod access;
mod api;
mod cancel;
mod client;
mod config;
mod error;
mod headers;
mod host;
mod logger;
mod prewarm;
mod sanitize;
mod session;
mod token;
mod upload_form;

pub use access::{AccessTokenResolver, CloudflaredAccess, NoAccess, StaticAccess};
pub use api::ApiClient;
pub use client::PreviewClient;
pub use config::{account_from_env, account_from_lookup, ClientConfig, ComplianceRegion};
pub use error::{ClientError, ClientResult};
pub use headers::*;
pub use host::switch_host;
pub use sanitize::redact;
pub use upload_form::{create_worker_upload_form, worker_metadata};

pub use edgeworker_types as types;
pub use tokio_util::sync::CancellationToken;
