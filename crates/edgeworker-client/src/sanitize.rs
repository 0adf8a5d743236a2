//! Secret redaction for debug logs.
//!
//! Exchange URLs, exchange responses and request headers all carry bearer
//! material. Debug logging goes through [`redact`] unless sanitization is
//! switched off in [`crate::ClientConfig`].

use regex::Regex;
use std::sync::LazyLock;

const REDACTED: &str = "[REDACTED]";

static QUERY_SECRET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([?&](?:cf_workers_preview_token|token|access_token|key)=)[^&\s#]+")
        .expect("Query redaction regex is valid")
});

static JSON_SECRET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)("(?:token|preview_token|value|api_token|api_key|access_token)"\s*:\s*")[^"]*(")"#)
        .expect("JSON redaction regex is valid")
});

static HEADER_SECRET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)((?:authorization:\s*bearer|cf-workers-preview-token:|cf-preview-upload-config-token:|x-auth-key:|cf_authorization=)\s*)[^\s;,]+",
    )
    .expect("Header redaction regex is valid")
});

/// Replace secrets in `text` with `[REDACTED]`.
///
/// Covers token-bearing query parameters, JSON string fields named like
/// tokens, and authentication headers / cookies.
pub fn redact(text: &str) -> String {
    let text = QUERY_SECRET.replace_all(text, format!("${{1}}{}", REDACTED).as_str());
    let text = JSON_SECRET.replace_all(&text, format!("${{1}}{}${{2}}", REDACTED).as_str());
    let text = HEADER_SECRET.replace_all(&text, format!("${{1}}{}", REDACTED).as_str());
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_exchange_url_token() {
        let raw = "GET https://example.workers.dev/exchange?token=abc.def-123&other=1";
        let result = redact(raw);
        assert_eq!(result, "GET https://example.workers.dev/exchange?token=[REDACTED]&other=1");
    }

    #[test]
    fn test_redacts_exchange_response_body() {
        let raw = r#"{"inspector_websocket":"wss://i.example.com/ws","token":"s3cr3t","prewarm":"https://p.example.com"}"#;
        let result = redact(raw);
        assert!(!result.contains("s3cr3t"));
        assert!(result.contains(r#""token":"[REDACTED]""#));
        assert!(result.contains("wss://i.example.com/ws"));
    }

    #[test]
    fn test_redacts_inspector_query_param() {
        let raw = "wss://i.example.com/ws?cf_workers_preview_token=s3cr3t";
        assert_eq!(redact(raw), "wss://i.example.com/ws?cf_workers_preview_token=[REDACTED]");
    }

    #[test]
    fn test_redacts_headers_and_cookies() {
        let raw = "authorization: Bearer abc123\ncf-workers-preview-token: tok\ncookie: CF_Authorization=jwt.value";
        let result = redact(raw);
        assert!(!result.contains("abc123"));
        assert!(!result.contains("tok\n"));
        assert!(!result.contains("jwt.value"));
    }

    #[test]
    fn test_leaves_plain_text_alone() {
        let raw = "-- END EXCHANGE API REQUEST";
        assert_eq!(redact(raw), raw);
    }
}
