//! Public origin of the running site.
//!
//! Used as the base URL for warm-up requests and webhook redirects. A
//! configured `public_origin` wins; otherwise the origin is rebuilt from the
//! proxy headers the request arrived with.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::state::AppState;

/// `scheme://host[:port]` without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin(pub String);

impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(origin) = &state.config.public_origin {
            return Ok(RequestOrigin(origin.trim_end_matches('/').to_string()));
        }
        Ok(RequestOrigin(origin_from_headers(
            &parts.headers,
            bind_port(&state.config.bind_addr),
        )))
    }
}

/// Rebuild the origin from `X-Forwarded-Proto` and `X-Forwarded-Host`/`Host`.
pub fn origin_from_headers(headers: &HeaderMap, port: u16) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            // Proxy chains append values; the first one is the client-facing hop.
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let scheme = header("x-forwarded-proto").unwrap_or("http");
    match header("x-forwarded-host").or_else(|| header("host")) {
        Some(host) => format!("{scheme}://{host}"),
        None => format!("http://localhost:{port}"),
    }
}

fn bind_port(bind_addr: &str) -> u16 {
    bind_addr
        .parse::<SocketAddr>()
        .map(|addr| addr.port())
        .unwrap_or(3000)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_origin_from_host() {
        let map = headers(&[("host", "site.dev:8080")]);
        assert_eq!(origin_from_headers(&map, 3000), "http://site.dev:8080");
    }

    #[test]
    fn test_origin_prefers_forwarded_headers() {
        let map = headers(&[
            ("host", "internal:3000"),
            ("x-forwarded-host", "www.site.dev, edge.cdn"),
            ("x-forwarded-proto", "https"),
        ]);
        assert_eq!(origin_from_headers(&map, 3000), "https://www.site.dev");
    }

    #[test]
    fn test_origin_without_host_uses_localhost() {
        assert_eq!(origin_from_headers(&HeaderMap::new(), 4000), "http://localhost:4000");
    }

    #[test]
    fn test_bind_port() {
        assert_eq!(bind_port("0.0.0.0:8081"), 8081);
        assert_eq!(bind_port("not-an-addr"), 3000);
    }
}
