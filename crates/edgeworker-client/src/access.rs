//! Access tokens for SSO-gated preview hosts.
//!
//! Some preview hosts sit behind an identity proxy. Requests to them need a
//! `CF_Authorization` cookie, obtained through `cloudflared access login`.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::header::LOCATION;
use reqwest::{redirect, Client};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

const ACCESS_LOGIN_DOMAIN: &str = "cloudflareaccess.com";
const TOKEN_MARKER: &str = "fetched your token:";

/// Resolves an optional access token for a hostname.
#[async_trait]
pub trait AccessTokenResolver: Send + Sync {
    /// `Ok(None)` when the host does not require access authentication.
    async fn access_token(&self, hostname: &str) -> ClientResult<Option<String>>;
}

/// Never returns a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAccess;

#[async_trait]
impl AccessTokenResolver for NoAccess {
    async fn access_token(&self, _hostname: &str) -> ClientResult<Option<String>> {
        Ok(None)
    }
}

/// Returns a fixed token, optionally only for hosts under `host_suffix`.
#[derive(Debug, Clone)]
pub struct StaticAccess {
    token: String,
    host_suffix: Option<String>,
}

impl StaticAccess {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), host_suffix: None }
    }

    pub fn for_hosts_ending_with(mut self, suffix: impl Into<String>) -> Self {
        self.host_suffix = Some(suffix.into());
        self
    }
}

#[async_trait]
impl AccessTokenResolver for StaticAccess {
    async fn access_token(&self, hostname: &str) -> ClientResult<Option<String>> {
        match &self.host_suffix {
            Some(suffix) if !hostname.ends_with(suffix.as_str()) => Ok(None),
            _ => Ok(Some(self.token.clone())),
        }
    }
}

/// Detects identity-proxied hosts and logs in through `cloudflared`.
///
/// Tokens are cached per host for the lifetime of the resolver.
pub struct CloudflaredAccess {
    probe: Client,
    binary: PathBuf,
    cache: DashMap<String, String>,
}

impl CloudflaredAccess {
    pub fn new() -> ClientResult<Self> {
        let probe = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { probe, binary: PathBuf::from("cloudflared"), cache: DashMap::new() })
    }

    /// Use a specific `cloudflared` executable.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// A host uses access when it redirects to the access login domain.
    async fn uses_access(&self, hostname: &str) -> bool {
        let resp = match self.probe.get(format!("https://{}", hostname)).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!("Access probe for {} failed: {}", hostname, e);
                return false;
            },
        };
        resp.status().is_redirection()
            && resp
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|location| location.contains(ACCESS_LOGIN_DOMAIN))
    }

    async fn login(&self, hostname: &str) -> ClientResult<String> {
        let output = tokio::process::Command::new(&self.binary)
            .args(["access", "login", hostname])
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ClientError::Access {
                host: hostname.to_string(),
                message: format!(
                    "could not run `{}` ({}); install cloudflared to preview on access-protected hosts",
                    self.binary.display(),
                    e
                ),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_login_output(&stdout) {
            Some(token) if output.status.success() => Ok(token),
            _ => Err(ClientError::Access {
                host: hostname.to_string(),
                message: format!("cloudflared exited with {} without a token", output.status),
            }),
        }
    }
}

#[async_trait]
impl AccessTokenResolver for CloudflaredAccess {
    async fn access_token(&self, hostname: &str) -> ClientResult<Option<String>> {
        if let Some(token) = self.cache.get(hostname) {
            return Ok(Some(token.clone()));
        }
        if !self.uses_access(hostname).await {
            return Ok(None);
        }
        let token = self.login(hostname).await?;
        self.cache.insert(hostname.to_string(), token.clone());
        Ok(Some(token))
    }
}

/// Extract the token printed after "fetched your token:".
fn parse_login_output(stdout: &str) -> Option<String> {
    let (_, after) = stdout.split_once(TOKEN_MARKER)?;
    after.lines().map(str::trim).find(|line| !line.is_empty()).map(str::to_string)
}
