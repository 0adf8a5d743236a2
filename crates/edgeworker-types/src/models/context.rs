//! Routing and environment parameters for a single preview attempt.

use serde::{Deserialize, Serialize};

/// Structured route definition, as written in a project config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RouteConfig {
    /// Route pattern, e.g. `example.com/api/*`
    pub pattern: String,
    /// Zone the route belongs to, by id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    /// Zone the route belongs to, by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    /// Whether the pattern is a custom domain rather than a route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<bool>,
}

/// A route is either a bare pattern string or a structured definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Route {
    Pattern(String),
    Structured(RouteConfig),
}

impl Route {
    /// Pattern sent to the preview API for this route.
    ///
    /// Custom domains cover every path on the host, so they get a `/*` suffix.
    pub fn preview_pattern(&self) -> String {
        match self {
            Self::Pattern(pattern) => pattern.clone(),
            Self::Structured(RouteConfig { pattern, custom_domain: Some(true), .. }) => {
                format!("{}/*", pattern)
            },
            Self::Structured(RouteConfig { pattern, .. }) => pattern.clone(),
        }
    }
}

impl From<&str> for Route {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.to_string())
    }
}

/// Parameters for one preview request. Read-only once constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PreviewContext {
    /// Zone id; when set the preview runs on the zone's routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// Explicit host override for zone previews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Named environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    /// Legacy environments are separate scripts rather than service environments
    #[serde(default)]
    pub legacy_env: bool,
    /// Route patterns for zone previews
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl PreviewContext {
    /// Whether this is a zone (route) preview rather than a `workers.dev` one.
    pub fn is_zone_preview(&self) -> bool {
        self.zone.is_some()
    }

    /// Service environment to target, ignoring legacy environments.
    pub fn service_environment(&self) -> Option<&str> {
        if self.legacy_env {
            return None;
        }
        self.env.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_domain_gets_wildcard_suffix() {
        let route = Route::Structured(RouteConfig {
            pattern: "example.com".to_string(),
            custom_domain: Some(true),
            ..Default::default()
        });
        assert_eq!(route.preview_pattern(), "example.com/*");
    }

    #[test]
    fn test_plain_routes_keep_pattern() {
        assert_eq!(Route::from("example.com/api/*").preview_pattern(), "example.com/api/*");

        let route = Route::Structured(RouteConfig {
            pattern: "shop.example.com/*".to_string(),
            zone_name: Some("example.com".to_string()),
            custom_domain: Some(false),
            ..Default::default()
        });
        assert_eq!(route.preview_pattern(), "shop.example.com/*");
    }

    #[test]
    fn test_routes_deserialize_from_mixed_list() {
        let routes: Vec<Route> = serde_json::from_str(
            r#"["a.example.com/*", {"pattern": "b.example.com", "custom_domain": true}]"#,
        )
        .unwrap();
        assert_eq!(routes[0], Route::from("a.example.com/*"));
        assert_eq!(routes[1].preview_pattern(), "b.example.com/*");
    }

    #[test]
    fn test_legacy_env_hides_service_environment() {
        let mut ctx = PreviewContext { env: Some("staging".to_string()), ..Default::default() };
        assert_eq!(ctx.service_environment(), Some("staging"));
        ctx.legacy_env = true;
        assert_eq!(ctx.service_environment(), None);
    }
}
