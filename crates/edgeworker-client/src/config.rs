//! Client configuration, resolved from defaults and the environment.

use edgeworker_types::{Account, ApiCredentials, ConfigError};

const PUBLIC_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
const FEDRAMP_HIGH_API_BASE_URL: &str = "https://api.fed.cloudflare.com/client/v4";

/// Which control plane the account lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComplianceRegion {
    #[default]
    Public,
    FedrampHigh,
}

impl ComplianceRegion {
    /// Default control-plane base URL for this region.
    pub fn api_base_url(self) -> &'static str {
        match self {
            Self::Public => PUBLIC_API_BASE_URL,
            Self::FedrampHigh => FEDRAMP_HIGH_API_BASE_URL,
        }
    }
}

impl std::str::FromStr for ComplianceRegion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "public" => Ok(Self::Public),
            "fedramp_high" | "fedramp-high" => Ok(Self::FedrampHigh),
            other => Err(ConfigError::invalid(
                "compliance_region",
                format!("expected `public` or `fedramp_high`, got `{}`", other),
            )),
        }
    }
}

/// Configuration for the preview client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Control-plane base URL; overrides the region default when set.
    pub api_base_url: Option<String>,
    pub compliance_region: ComplianceRegion,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Redact secrets in debug logs.
    pub log_sanitize: bool,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            compliance_region: ComplianceRegion::Public,
            timeout_secs: 60,
            log_sanitize: true,
            user_agent: format!("edgeworker/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Build a config from `EDGEWORKER_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config using `lookup` to read settings.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = non_empty(lookup("EDGEWORKER_API_BASE_URL")) {
            url::Url::parse(&url)
                .map_err(|e| ConfigError::invalid("EDGEWORKER_API_BASE_URL", e.to_string()))?;
            config.api_base_url = Some(url.trim_end_matches('/').to_string());
        }
        if let Some(region) = non_empty(lookup("EDGEWORKER_COMPLIANCE_REGION")) {
            config.compliance_region = region.parse()?;
        }
        if let Some(timeout) = non_empty(lookup("EDGEWORKER_API_TIMEOUT")) {
            config.timeout_secs = timeout.parse().map_err(|_| {
                ConfigError::invalid("EDGEWORKER_API_TIMEOUT", format!("not a number: {}", timeout))
            })?;
        }
        if let Some(sanitize) = non_empty(lookup("EDGEWORKER_LOG_SANITIZE")) {
            config.log_sanitize = parse_bool(&sanitize).ok_or_else(|| {
                ConfigError::invalid("EDGEWORKER_LOG_SANITIZE", format!("not a boolean: {}", sanitize))
            })?;
        }

        Ok(config)
    }

    /// Effective control-plane base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or_else(|| self.compliance_region.api_base_url())
    }
}

/// Read account id and credentials from `EDGEWORKER_*` environment variables.
pub fn account_from_env() -> Result<Account, ConfigError> {
    account_from_lookup(|key| std::env::var(key).ok())
}

/// Read account id and credentials using `lookup`.
///
/// An API token wins over a global key when both are present.
pub fn account_from_lookup<F>(lookup: F) -> Result<Account, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let account_id = non_empty(lookup("EDGEWORKER_ACCOUNT_ID"))
        .ok_or_else(|| ConfigError::MissingValue { key: "EDGEWORKER_ACCOUNT_ID".to_string() })?;

    let credentials = if let Some(token) = non_empty(lookup("EDGEWORKER_API_TOKEN")) {
        ApiCredentials::ApiToken { token }
    } else {
        match (non_empty(lookup("EDGEWORKER_API_KEY")), non_empty(lookup("EDGEWORKER_EMAIL"))) {
            (Some(key), Some(email)) => ApiCredentials::GlobalKey { email, key },
            (Some(_), None) => {
                return Err(ConfigError::MissingValue { key: "EDGEWORKER_EMAIL".to_string() })
            },
            _ => return Err(ConfigError::MissingValue { key: "EDGEWORKER_API_TOKEN".to_string() }),
        }
    };

    Ok(Account { credentials, account_id })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
