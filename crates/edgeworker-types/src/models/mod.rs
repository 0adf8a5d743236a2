//! Domain models for preview negotiation.

pub mod account;
pub mod context;
pub mod preview;
pub mod worker;

pub use account::{Account, ApiCredentials};
pub use context::{PreviewContext, Route, RouteConfig};
pub use preview::{PreviewMode, PreviewRouting, PreviewSession, PreviewToken};
pub use worker::{Binding, ModuleType, WorkerBundle, WorkerModule};
