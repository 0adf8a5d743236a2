//! Preview session, preview token and routing mode.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use url::Url;

use super::context::PreviewContext;

/// Catch-all pattern used for zone previews without configured routes.
pub const CATCH_ALL_ROUTE: &str = "*/*";

/// Result of the session exchange. Consumed once by the token request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewSession {
    /// Locally generated session id
    pub id: String,
    /// Redemption value, presented when uploading a worker under this session
    pub value: String,
    /// Host where the session is available
    pub host: String,
    /// DevTools inspector websocket, already carrying the session token
    pub inspector_url: Url,
    /// URL to prewarm the preview
    pub prewarm_url: Url,
}

/// A worker-specific preview token.
///
/// `value` goes into the `cf-workers-preview-token` header of every request
/// sent to `host`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewToken {
    /// Header value required to reach the preview
    pub value: String,
    /// Host where the preview is available
    pub host: String,
    /// DevTools inspector websocket
    pub inspector_url: Url,
    /// URL to prewarm the preview
    pub prewarm_url: Url,
}

/// Where a preview receives traffic. Exactly one mode per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewRouting {
    /// The account's `workers.dev` subdomain
    WorkersDev,
    /// A list of route patterns under a single zone
    Routes(Vec<String>),
}

/// Session configuration sent as the `wrangler-session-config` form part.
///
/// Serializes to `{"workers_dev":true}` or `{"routes":[...]}`, plus
/// `"minimal_mode"` when it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewMode {
    pub routing: PreviewRouting,
    /// Ask the API for "raw" mode bindings
    pub minimal_mode: Option<bool>,
}

impl PreviewMode {
    /// Derive the mode for a preview context.
    pub fn for_context(ctx: &PreviewContext, minimal_mode: Option<bool>) -> Self {
        let routing = if ctx.is_zone_preview() {
            let routes: Vec<String> = if ctx.routes.is_empty() {
                vec![CATCH_ALL_ROUTE.to_string()]
            } else {
                ctx.routes.iter().map(|route| route.preview_pattern()).collect()
            };
            PreviewRouting::Routes(routes)
        } else {
            PreviewRouting::WorkersDev
        };
        Self { routing, minimal_mode }
    }
}

impl Serialize for PreviewMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.minimal_mode.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        match &self.routing {
            PreviewRouting::WorkersDev => map.serialize_entry("workers_dev", &true)?,
            PreviewRouting::Routes(routes) => map.serialize_entry("routes", routes)?,
        }
        if let Some(minimal) = self.minimal_mode {
            map.serialize_entry("minimal_mode", &minimal)?;
        }
        map.end()
    }
}
