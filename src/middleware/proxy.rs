// SPDX-License-Identifier: MIT

//! Reverse-proxy header derivation.
//!
//! The service runs behind Cloudflare or an ALB, so the peer address
//! is the proxy. Real client IP, scheme and host come from forwarded
//! headers; the scheme/host header names are configurable.

use axum::http::HeaderMap;

use crate::config::Config;

/// Client details derived from proxy headers for one request.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub ip: String,
    pub scheme: String,
    pub host: String,
}

impl ClientInfo {
    pub fn from_headers(headers: &HeaderMap, config: &Config) -> Self {
        Self {
            ip: real_ip(headers),
            scheme: real_scheme(headers, config),
            host: real_host(headers, config),
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Real client IP: Cloudflare header first, then the standard ones.
pub fn real_ip(headers: &HeaderMap) -> String {
    if let Some(ip) = header_str(headers, "CF-Connecting-IP") {
        return ip.to_string();
    }
    if let Some(ip) = header_str(headers, "X-Real-IP") {
        return ip.to_string();
    }
    if let Some(forwarded) = header_str(headers, "X-Forwarded-For") {
        if let Some(first) = forwarded.split(',').next() {
            return first.trim().to_string();
        }
    }
    "0.0.0.0".to_string()
}

/// Original request scheme from CF-Visitor or the configured header.
pub fn real_scheme(headers: &HeaderMap, config: &Config) -> String {
    if let Some(visitor) = header_str(headers, "CF-Visitor") {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(visitor) {
            if let Some(scheme) = value.get("scheme").and_then(|s| s.as_str()) {
                return scheme.to_string();
            }
        }
    }
    if let Some(proto) = header_str(headers, &config.proxy_header_proto) {
        return proto.to_lowercase();
    }
    "http".to_string()
}

/// Original request host from the configured header, then Host.
pub fn real_host(headers: &HeaderMap, config: &Config) -> String {
    if let Some(host) = header_str(headers, &config.proxy_header_host) {
        return host.to_string();
    }
    header_str(headers, "Host")
        .unwrap_or("localhost")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_real_ip_prefers_cloudflare() {
        let map = headers(&[
            ("CF-Connecting-IP", "203.0.113.9"),
            ("X-Forwarded-For", "10.0.0.1, 10.0.0.2"),
        ]);
        assert_eq!(real_ip(&map), "203.0.113.9");
    }

    #[test]
    fn test_real_ip_first_forwarded_entry() {
        let map = headers(&[("X-Forwarded-For", "198.51.100.7, 10.0.0.2")]);
        assert_eq!(real_ip(&map), "198.51.100.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        assert_eq!(real_ip(&HeaderMap::new()), "0.0.0.0");
    }

    #[test]
    fn test_real_scheme_cf_visitor() {
        let map = headers(&[("CF-Visitor", r#"{"scheme":"https"}"#)]);
        assert_eq!(real_scheme(&map, &Config::default()), "https");
    }

    #[test]
    fn test_real_scheme_configured_header() {
        let map = headers(&[("X-Forwarded-Proto", "HTTPS")]);
        assert_eq!(real_scheme(&map, &Config::default()), "https");
    }

    #[test]
    fn test_real_host_configured_header() {
        let map = headers(&[
            ("X-Forwarded-Host", "oauth.example.com"),
            ("Host", "internal:8443"),
        ]);
        assert_eq!(real_host(&map, &Config::default()), "oauth.example.com");
    }
}
