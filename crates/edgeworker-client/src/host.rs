//! Host switching between control-plane and execution-plane URLs.
//!
//! URLs issued by the control plane are scoped to the zone's default host.
//! That host may be grey-clouded, so zone previews are sent through the
//! worker route host instead. `workers.dev` previews keep the issued host.

use url::Url;

/// Parse `original_url` and, for zone previews with a host override, replace
/// its hostname. Scheme, path and query are kept. An override written as
/// `host:port` replaces the port too; otherwise the port is kept.
pub fn switch_host(
    original_url: &str,
    host: Option<&str>,
    zone_preview: bool,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(original_url)?;
    if zone_preview {
        if let Some(host) = host {
            let (hostname, port) = split_port(host)?;
            url.set_host(Some(hostname))?;
            if let Some(port) = port {
                url.set_port(Some(port)).map_err(|()| url::ParseError::InvalidPort)?;
            }
        }
    }
    Ok(url)
}

/// Split `host[:port]`. Bracketed IPv6 literals keep their colons.
fn split_port(host: &str) -> Result<(&str, Option<u16>), url::ParseError> {
    match host.rsplit_once(':') {
        Some((hostname, port)) if !hostname.contains(':') || hostname.ends_with(']') => {
            let port = port.parse().map_err(|_| url::ParseError::InvalidPort)?;
            Ok((hostname, Some(port)))
        },
        _ => Ok((host, None)),
    }
}

/// `host[:port]` of a URL, the form used for preview hosts.
pub(crate) fn host_with_port(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const URLS: &[&str] = &[
        "https://preview.example.workers.dev/exchange?token=abc",
        "wss://inspect.example.com:8443/ws/session-1?x=1&y=2",
        "http://127.0.0.1:8787/cdn-cgi/prewarm",
        "https://zone.example.com/",
    ];

    #[test]
    fn test_subdomain_preview_keeps_host() {
        for original in URLS {
            let before = Url::parse(original).unwrap();
            for host in [None, Some("route.example.org")] {
                let switched = switch_host(original, host, false).unwrap();
                assert_eq!(switched.host_str(), before.host_str(), "{original}");
                assert_eq!(switched, before);
            }
        }
    }

    #[test]
    fn test_zone_preview_swaps_only_hostname() {
        for original in URLS {
            let before = Url::parse(original).unwrap();
            let switched = switch_host(original, Some("route.example.org"), true).unwrap();
            assert_eq!(switched.host_str(), Some("route.example.org"));
            assert_eq!(switched.scheme(), before.scheme());
            assert_eq!(switched.port(), before.port());
            assert_eq!(switched.path(), before.path());
            assert_eq!(switched.query(), before.query());
        }
    }

    #[test]
    fn test_zone_preview_without_override_keeps_host() {
        let switched = switch_host(URLS[0], None, true).unwrap();
        assert_eq!(switched.host_str(), Some("preview.example.workers.dev"));
    }

    #[test]
    fn test_zone_preview_override_with_port() {
        let switched = switch_host("https://a.example.com/x?y=1", Some("localhost:8787"), true).unwrap();
        assert_eq!(switched.host_str(), Some("localhost"));
        assert_eq!(switched.port(), Some(8787));
        assert_eq!(switched.path(), "/x");
        assert_eq!(host_with_port(&switched), "localhost:8787");

        let switched = switch_host("http://127.0.0.1:9000/x", Some("[::1]:8787"), true).unwrap();
        assert_eq!(switched.host_str(), Some("[::1]"));
        assert_eq!(switched.port(), Some(8787));

        let switched = switch_host("http://127.0.0.1:9000/x", Some("[::1]"), true).unwrap();
        assert_eq!(switched.port(), Some(9000));
    }

    #[test]
    fn test_zone_preview_override_with_bad_port_is_an_error() {
        assert!(switch_host(URLS[0], Some("localhost:http"), true).is_err());
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        assert!(switch_host("not a url", Some("x.example.com"), true).is_err());
    }

    #[test]
    fn test_host_with_port() {
        assert_eq!(host_with_port(&Url::parse("wss://a.example.com/ws").unwrap()), "a.example.com");
        assert_eq!(
            host_with_port(&Url::parse("http://127.0.0.1:9000/x").unwrap()),
            "127.0.0.1:9000"
        );
    }
}
