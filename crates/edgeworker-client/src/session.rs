//! Preview session: init call on the control plane, then the exchange GET.

use edgeworker_types::{Account, PreviewContext, PreviewSession};
use reqwest::{Client, Method};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::ApiClient;
use crate::cancel::cancellable;
use crate::error::{ClientError, ClientResult};
use crate::headers::INSPECTOR_TOKEN_PARAM;
use crate::host::{host_with_port, switch_host};
use crate::logger::debug_with_sanitization;

#[derive(Debug, Deserialize)]
struct ExchangeInit {
    exchange_url: String,
}

/// Body returned by the exchange URL.
#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    inspector_websocket: String,
    token: String,
    prewarm: String,
}

/// Control-plane path that issues an exchange URL for this context.
pub(crate) fn session_init_path(account: &Account, ctx: &PreviewContext) -> String {
    match &ctx.zone {
        Some(zone) => format!("/zones/{}/workers/edge-preview", zone),
        None => format!("/accounts/{}/workers/subdomain/edge-preview", account.account_id),
    }
}

/// User-facing description of where the session was requested.
pub(crate) fn session_target(ctx: &PreviewContext) -> String {
    match &ctx.zone {
        Some(zone) => format!(
            "host `{}` on zone `{}`",
            ctx.host.as_deref().unwrap_or("<default>"),
            zone
        ),
        None => "your account".to_string(),
    }
}

pub(crate) async fn create_preview_session(
    api: &ApiClient,
    http: &Client,
    log_sanitize: bool,
    account: &Account,
    ctx: &PreviewContext,
    cancel: &CancellationToken,
) -> ClientResult<PreviewSession> {
    let init_path = session_init_path(account, ctx);
    let ExchangeInit { exchange_url } = api
        .fetch_result(&account.credentials, Method::GET, &init_path, None, &[], cancel)
        .await?;

    let zone_preview = ctx.is_zone_preview();
    let host_override = ctx.host.as_deref();
    let switched_exchange_url = switch_host(&exchange_url, host_override, zone_preview)?;

    debug_with_sanitization(
        log_sanitize,
        "-- START EXCHANGE API REQUEST:",
        &format!(" GET {}", switched_exchange_url),
    );
    debug!("-- END EXCHANGE API REQUEST");

    let request = http.get(switched_exchange_url);
    let (status, headers, body) = cancellable(cancel, async move {
        let resp = request.send().await?;
        let status = resp.status();
        let headers = format!("{:?}", resp.headers());
        let body = resp.text().await?;
        Ok::<_, ClientError>((status, headers, body))
    })
    .await?;

    debug!("-- START EXCHANGE API RESPONSE: {}", status);
    debug_with_sanitization(log_sanitize, "HEADERS:", &headers);
    debug_with_sanitization(log_sanitize, "RESPONSE:", &body);
    debug!("-- END EXCHANGE API RESPONSE");

    let exchange: ExchangeResponse = serde_json::from_str(&body).map_err(|e| {
        debug!("Exchange response did not parse: {}", e);
        ClientError::SessionCreation { target: session_target(ctx) }
    })?;

    let mut inspector = url::Url::parse(&exchange.inspector_websocket)?;
    inspector.query_pairs_mut().append_pair(INSPECTOR_TOKEN_PARAM, &exchange.token);

    let host = match host_override {
        Some(host) => host.to_string(),
        None => host_with_port(&inspector),
    };

    Ok(PreviewSession {
        id: uuid::Uuid::new_v4().to_string(),
        value: exchange.token,
        host,
        inspector_url: switch_host(inspector.as_str(), host_override, zone_preview)?,
        prewarm_url: switch_host(&exchange.prewarm, host_override, zone_preview)?,
    })
}
