//! Preview token: upload the worker under a session.

use edgeworker_types::{Account, PreviewContext, PreviewMode, PreviewSession, PreviewToken, WorkerBundle};
use reqwest::Method;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::headers::{SESSION_CONFIG_PART, UPLOAD_CONFIG_TOKEN_HEADER};
use crate::upload_form::create_worker_upload_form;

#[derive(Debug, Deserialize)]
struct TokenResult {
    preview_token: String,
}

/// Upload endpoint for the worker, per environment style.
pub(crate) fn preview_upload_path(
    account: &Account,
    worker: &WorkerBundle,
    ctx: &PreviewContext,
) -> String {
    match ctx.service_environment() {
        Some(env) => format!(
            "/accounts/{}/workers/services/{}/environments/{}/edge-preview",
            account.account_id, worker.name, env
        ),
        None => format!(
            "/accounts/{}/workers/scripts/{}/edge-preview",
            account.account_id, worker.name
        ),
    }
}

/// Host where the preview is reachable.
///
/// An explicit host wins; otherwise the worker name replaces the first label
/// of the session host. Environments are not prefixed onto the host, the
/// edge does not serve `env.worker.subdomain` previews.
pub(crate) fn resolve_preview_host(
    ctx: &PreviewContext,
    worker_name: Option<&str>,
    session_host: &str,
) -> String {
    if let Some(host) = &ctx.host {
        return host.clone();
    }
    match worker_name {
        Some(name) => {
            let parent = session_host.split_once('.').map(|(_, rest)| rest).unwrap_or("");
            format!("{}.{}", name, parent)
        },
        None => session_host.to_string(),
    }
}

pub(crate) async fn create_preview_token(
    api: &ApiClient,
    account: &Account,
    worker: &WorkerBundle,
    ctx: &PreviewContext,
    session: &PreviewSession,
    cancel: &CancellationToken,
    minimal_mode: Option<bool>,
) -> ClientResult<PreviewToken> {
    let path = preview_upload_path(account, worker, ctx);
    let mode = PreviewMode::for_context(ctx, minimal_mode);
    let mode_json = serde_json::to_string(&mode)
        .map_err(|e| ClientError::InvalidResponse(format!("session config: {}", e)))?;

    let form = create_worker_upload_form(worker)?.text(SESSION_CONFIG_PART, mode_json);

    let TokenResult { preview_token } = api
        .fetch_result(
            &account.credentials,
            Method::POST,
            &path,
            Some(form),
            &[(UPLOAD_CONFIG_TOKEN_HEADER, session.value.as_str())],
            cancel,
        )
        .await?;

    Ok(PreviewToken {
        value: preview_token,
        host: resolve_preview_host(ctx, worker.name(), &session.host),
        inspector_url: session.inspector_url.clone(),
        prewarm_url: session.prewarm_url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeworker_types::{ModuleType, WorkerModule};

    fn worker(name: &str) -> WorkerBundle {
        WorkerBundle::new(name, WorkerModule::new("index.js", "export default {}", ModuleType::Esm))
    }

    #[test]
    fn test_upload_path_for_service_environment() {
        let account = Account::with_api_token("acc", "t");
        let ctx = PreviewContext { env: Some("staging".to_string()), ..Default::default() };
        assert_eq!(
            preview_upload_path(&account, &worker("foo"), &ctx),
            "/accounts/acc/workers/services/foo/environments/staging/edge-preview"
        );
    }

    #[test]
    fn test_upload_path_for_legacy_or_no_environment() {
        let account = Account::with_api_token("acc", "t");
        let legacy = PreviewContext {
            env: Some("staging".to_string()),
            legacy_env: true,
            ..Default::default()
        };
        assert_eq!(
            preview_upload_path(&account, &worker("foo-staging"), &legacy),
            "/accounts/acc/workers/scripts/foo-staging/edge-preview"
        );
        assert_eq!(
            preview_upload_path(&account, &worker("foo"), &PreviewContext::default()),
            "/accounts/acc/workers/scripts/foo/edge-preview"
        );
    }

    #[test]
    fn test_host_from_worker_name() {
        let ctx = PreviewContext::default();
        assert_eq!(
            resolve_preview_host(&ctx, Some("foo"), "bar.example.workers.dev"),
            "foo.example.workers.dev"
        );
    }

    #[test]
    fn test_host_ignores_environment() {
        let ctx = PreviewContext { env: Some("staging".to_string()), ..Default::default() };
        assert_eq!(
            resolve_preview_host(&ctx, Some("foo"), "bar.example.workers.dev"),
            "foo.example.workers.dev"
        );
    }

    #[test]
    fn test_explicit_host_wins() {
        let ctx = PreviewContext {
            zone: Some("z".to_string()),
            host: Some("shop.example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_preview_host(&ctx, Some("foo"), "bar.example.workers.dev"),
            "shop.example.com"
        );
    }

    #[test]
    fn test_anonymous_worker_keeps_session_host() {
        assert_eq!(
            resolve_preview_host(&PreviewContext::default(), None, "bar.example.workers.dev"),
            "bar.example.workers.dev"
        );
    }
}
