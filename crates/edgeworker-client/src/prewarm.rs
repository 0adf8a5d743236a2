//! Best-effort prewarm of a freshly created preview.
//!
//! The POST runs on a detached task: the caller gets its token without
//! waiting, and nothing joins the task. Its outcome only reaches the log.
//! A process that exits right after creating a preview may kill the task
//! before it sends anything; prewarming is a latency hint, so that is fine.

use edgeworker_types::PreviewToken;
use reqwest::header::COOKIE;
use reqwest::{Client, StatusCode};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::access::AccessTokenResolver;
use crate::cancel::cancellable;
use crate::headers::{ACCESS_COOKIE_NAME, PREVIEW_TOKEN_HEADER};

/// How a prewarm attempt ended.
#[derive(Debug)]
pub(crate) enum PrewarmOutcome {
    Warmed,
    Rejected(StatusCode),
    Failed(reqwest::Error),
    Cancelled,
}

/// Resolve the access cookie for the prewarm host. Failures only warn.
///
/// A cancelled lookup yields no cookie; the prewarm task sees the same
/// cancelled token and never sends.
pub(crate) async fn prewarm_access_token(
    access: &dyn AccessTokenResolver,
    token: &PreviewToken,
    cancel: &CancellationToken,
) -> Option<String> {
    let hostname = token.prewarm_url.host_str()?;
    match cancellable(cancel, access.access_token(hostname)).await {
        Ok(access_token) => access_token,
        Err(e) if e.is_cancelled() => {
            debug!("Access token lookup for {} cancelled", hostname);
            None
        },
        Err(e) => {
            warn!("Could not resolve access token for {}: {}", hostname, e);
            None
        },
    }
}

/// Fire the prewarm request on a detached task.
pub(crate) fn spawn_prewarm(
    http: Client,
    token: &PreviewToken,
    access_token: Option<String>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let mut request = http
        .post(token.prewarm_url.clone())
        .header(PREVIEW_TOKEN_HEADER, token.value.clone());
    if let Some(access_token) = access_token {
        request = request.header(COOKIE, format!("{}={}", ACCESS_COOKIE_NAME, access_token));
    }

    tokio::spawn(async move {
        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => PrewarmOutcome::Cancelled,
            result = request.send() => match result {
                Ok(resp) if resp.status().is_success() => PrewarmOutcome::Warmed,
                Ok(resp) => PrewarmOutcome::Rejected(resp.status()),
                Err(e) => PrewarmOutcome::Failed(e),
            },
        };
        log_outcome(&outcome);
    })
}

fn log_outcome(outcome: &PrewarmOutcome) {
    match outcome {
        PrewarmOutcome::Warmed => debug!("Worker prewarmed"),
        PrewarmOutcome::Rejected(status) => {
            warn!("worker failed to prewarm: {}", status.canonical_reason().unwrap_or(status.as_str()))
        },
        PrewarmOutcome::Failed(e) => warn!("worker failed to prewarm: {}", e),
        PrewarmOutcome::Cancelled => warn!("worker failed to prewarm: request cancelled"),
    }
}
