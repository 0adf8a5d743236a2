//! Authenticated control-plane calls returning the standard result envelope.

use edgeworker_types::{ApiCredentials, ApiMessage};
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cancel::cancellable;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::logger::debug_with_sanitization;

/// `{ success, errors, messages, result }` wrapper around every API response.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    #[serde(default)]
    messages: Vec<ApiMessage>,
    #[serde(default)]
    result: Option<serde_json::Value>,
}

/// Client for the control-plane REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    user_agent: String,
    log_sanitize: bool,
}

impl ApiClient {
    pub fn new(http: Client, config: &ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            log_sanitize: config.log_sanitize,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call `path` (relative to the base URL) and unwrap the envelope's `result`.
    ///
    /// Non-2xx statuses and `success: false` envelopes become
    /// [`ClientError::Api`]. The request is dropped when `cancel` fires.
    pub async fn fetch_result<T: DeserializeOwned>(
        &self,
        credentials: &ApiCredentials,
        method: Method,
        path: &str,
        form: Option<Form>,
        headers: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug_with_sanitization(
            self.log_sanitize,
            "-- START API REQUEST:",
            &format!("{} {}", method, url),
        );

        let mut request = self.http.request(method, &url).header(USER_AGENT, &self.user_agent);
        request = match credentials {
            ApiCredentials::ApiToken { token } => {
                request.header(AUTHORIZATION, format!("Bearer {}", token))
            },
            ApiCredentials::GlobalKey { email, key } => {
                request.header("X-Auth-Email", email).header("X-Auth-Key", key)
            },
        };
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(form) = form {
            request = request.multipart(form);
        }

        let (status, body) = cancellable(cancel, async move {
            let resp = request.send().await?;
            let status = resp.status();
            let body = resp.text().await?;
            Ok::<_, ClientError>((status, body))
        })
        .await?;

        debug!("-- START API RESPONSE: {} {}", status, url);
        debug_with_sanitization(self.log_sanitize, "RESPONSE:", &body);
        debug!("-- END API RESPONSE");

        parse_envelope(status.as_u16(), &body)
    }
}

fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> ClientResult<T> {
    let is_success_status = (200..300).contains(&status);

    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if is_success_status => {
            return Err(ClientError::InvalidResponse(format!(
                "response body is not a valid API envelope: {}",
                e
            )))
        },
        Err(_) => {
            let message: String = body.chars().take(200).collect();
            return Err(ClientError::Api { status, errors: vec![ApiMessage { code: 0, message }] });
        },
    };

    if !is_success_status || !envelope.success {
        return Err(ClientError::Api { status, errors: envelope.errors });
    }
    for message in &envelope.messages {
        debug!("API message: {}", message);
    }

    let result = envelope.result.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(result)
        .map_err(|e| ClientError::InvalidResponse(format!("unexpected result shape: {}", e)))
}
