//! Request context extracted from inbound HTTP requests.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, Uri, request::Parts},
};

use gateways_types::RequestContext;

/// Scheme and host the client used to reach us.
///
/// Honors `X-Forwarded-Proto` / `X-Forwarded-Host` so callback URLs point
/// at the public address when running behind a proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequestContext {
    scheme: String,
    host: String,
}

impl HttpRequestContext {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    pub fn from_parts(headers: &HeaderMap, uri: &Uri) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let scheme = header("x-forwarded-proto")
            .or_else(|| uri.scheme_str().map(str::to_string))
            .unwrap_or_else(|| "http".to_string());

        let host = header("x-forwarded-host")
            .or_else(|| header("host"))
            .or_else(|| uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());

        Self { scheme, host }
    }
}

impl RequestContext for HttpRequestContext {
    fn build_absolute_uri(&self, location: &str) -> String {
        if location.starts_with("http://") || location.starts_with("https://") {
            return location.to_string();
        }
        let sep = if location.starts_with('/') { "" } else { "/" };
        format!("{}://{}{}{}", self.scheme, self.host, sep, location)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for HttpRequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(&parts.headers, &parts.uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_uses_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("shop.example:8080"));

        let ctx = HttpRequestContext::from_parts(&headers, &Uri::from_static("/api/gateways"));
        assert_eq!(
            ctx.build_absolute_uri("/bankgateways/callback/"),
            "http://shop.example:8080/bankgateways/callback/"
        );
    }

    #[test]
    fn test_forwarded_headers_win() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("10.0.0.5"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("pay.example, proxy"));

        let ctx = HttpRequestContext::from_parts(&headers, &Uri::from_static("/"));
        assert_eq!(ctx, HttpRequestContext::new("https", "pay.example"));
    }

    #[test]
    fn test_defaults_without_headers() {
        let ctx = HttpRequestContext::from_parts(&HeaderMap::new(), &Uri::from_static("/"));
        assert_eq!(ctx.build_absolute_uri("cb"), "http://localhost/cb");
    }

    #[test]
    fn test_absolute_location_kept() {
        let ctx = HttpRequestContext::new("http", "a");
        assert_eq!(
            ctx.build_absolute_uri("https://b.example/x"),
            "https://b.example/x"
        );
    }
}
