//! Account and credential models.

use serde::{Deserialize, Serialize};

/// Credentials used to authenticate against the control-plane API.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiCredentials {
    /// Scoped API token, sent as `Authorization: Bearer <token>`
    ApiToken { token: String },
    /// Legacy global API key, sent as `X-Auth-Email` / `X-Auth-Key`
    GlobalKey { email: String, key: String },
}

// Secrets never reach Debug output.
impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiToken { .. } => f.debug_struct("ApiToken").finish_non_exhaustive(),
            Self::GlobalKey { email, .. } => {
                f.debug_struct("GlobalKey").field("email", email).finish_non_exhaustive()
            },
        }
    }
}

/// A tenant on the platform. Immutable for the lifetime of a preview session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Credentials for the control-plane API
    pub credentials: ApiCredentials,
    /// Account identifier
    pub account_id: String,
}

impl Account {
    /// Create an account authenticated with an API token.
    pub fn with_api_token(account_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            credentials: ApiCredentials::ApiToken { token: token.into() },
            account_id: account_id.into(),
        }
    }
}
