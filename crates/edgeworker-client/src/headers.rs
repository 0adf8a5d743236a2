// Wire names shared with the edge preview service.

/// Authenticates the preview upload with the session's redemption value.
pub const UPLOAD_CONFIG_TOKEN_HEADER: &str = "cf-preview-upload-config-token";
/// Carries the preview token on every request to the preview host.
pub const PREVIEW_TOKEN_HEADER: &str = "cf-workers-preview-token";
/// Query parameter carrying the session token on the inspector URL.
pub const INSPECTOR_TOKEN_PARAM: &str = "cf_workers_preview_token";
/// Form part holding the JSON-encoded routing mode.
pub const SESSION_CONFIG_PART: &str = "wrangler-session-config";
/// Cookie name for SSO-gated preview hosts.
pub const ACCESS_COOKIE_NAME: &str = "CF_Authorization";
