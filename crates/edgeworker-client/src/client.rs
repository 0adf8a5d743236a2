use std::sync::Arc;
use std::time::Duration;

use edgeworker_types::{Account, PreviewContext, PreviewSession, PreviewToken, WorkerBundle};
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::access::{AccessTokenResolver, NoAccess};
use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::{prewarm, session, token};

/// Negotiates preview sessions and tokens for edge workers.
///
/// Stateless between calls apart from the HTTP connection pool; concurrent
/// previews can share one client.
pub struct PreviewClient {
    http: Client,
    api: ApiClient,
    access: Arc<dyn AccessTokenResolver>,
    config: ClientConfig,
}

impl PreviewClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::with_http_client(http, config))
    }

    /// Use a pre-built `reqwest::Client` (custom proxy, TLS or retry middleware).
    pub fn with_http_client(http: Client, config: ClientConfig) -> Self {
        let api = ApiClient::new(http.clone(), &config);
        Self { http, api, access: Arc::new(NoAccess), config }
    }

    /// Resolve access cookies for SSO-gated prewarm hosts with `resolver`.
    pub fn with_access_resolver(mut self, resolver: Arc<dyn AccessTokenResolver>) -> Self {
        self.access = resolver;
        self
    }

    /// Open a preview session for the account's subdomain or the context's zone.
    ///
    /// Fails with [`crate::ClientError::SessionCreation`] when the exchange
    /// endpoint answers with something other than a session, and with
    /// [`crate::ClientError::Cancelled`] when `cancel` fires mid-flight.
    pub async fn create_preview_session(
        &self,
        account: &Account,
        ctx: &PreviewContext,
        cancel: &CancellationToken,
    ) -> ClientResult<PreviewSession> {
        let session = session::create_preview_session(
            &self.api,
            &self.http,
            self.config.log_sanitize,
            account,
            ctx,
            cancel,
        )
        .await?;
        info!("Preview session {} ready on {}", session.id, session.host);
        Ok(session)
    }

    /// Upload `worker` under `session` and return its preview token.
    ///
    /// Kicks off a background prewarm before returning; its failures are
    /// logged and never returned.
    pub async fn create_worker_preview(
        &self,
        account: &Account,
        worker: &WorkerBundle,
        ctx: &PreviewContext,
        session: &PreviewSession,
        cancel: &CancellationToken,
        minimal_mode: Option<bool>,
    ) -> ClientResult<PreviewToken> {
        let token = token::create_preview_token(
            &self.api,
            account,
            worker,
            ctx,
            session,
            cancel,
            minimal_mode,
        )
        .await?;

        let access_token = prewarm::prewarm_access_token(self.access.as_ref(), &token, cancel).await;
        // Dropping the handle detaches the task.
        drop(prewarm::spawn_prewarm(self.http.clone(), &token, access_token, cancel.clone()));

        info!("Preview token issued for {}", token.host);
        Ok(token)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
