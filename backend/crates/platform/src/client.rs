//! Client identification utilities
//!
//! Pulls the caller's IP address and User-Agent out of a request so that
//! sessions can record where they were opened from.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Longest User-Agent we keep; anything beyond is truncated.
pub const MAX_USER_AGENT_LEN: usize = 512;

/// Who is calling, as far as the request headers can tell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    pub fn from_headers(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Self {
        Self {
            ip: extract_client_ip(headers, direct_ip),
            user_agent: extract_user_agent(headers),
        }
    }

    /// IP as string (for database storage)
    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For first (reverse proxy setups), then falls back to
/// the direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}

/// User-Agent header, trimmed and capped at [`MAX_USER_AGENT_LEN`] bytes
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    let ua = headers.get(header::USER_AGENT)?.to_str().ok()?.trim();
    if ua.is_empty() {
        return None;
    }

    let mut end = ua.len().min(MAX_USER_AGENT_LEN);
    while !ua.is_char_boundary(end) {
        end -= 1;
    }
    Some(ua[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, Some("127.0.0.1".parse().unwrap()));
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
        assert_eq!(extract_client_ip(&headers, None), None);
    }

    #[test]
    fn test_garbage_xff_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("unknown"));
        let direct: IpAddr = "10.1.2.3".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }

    #[test]
    fn test_user_agent() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_user_agent(&headers), None);

        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 Test Browser"),
        );
        let info = ClientInfo::from_headers(&headers, None);
        assert_eq!(info.user_agent.as_deref(), Some("Mozilla/5.0 Test Browser"));
        assert_eq!(info.ip_string(), None);
    }

    #[test]
    fn test_user_agent_truncated() {
        let mut headers = HeaderMap::new();
        let long = "x".repeat(MAX_USER_AGENT_LEN + 100);
        headers.insert(header::USER_AGENT, HeaderValue::from_str(&long).unwrap());

        assert_eq!(extract_user_agent(&headers).unwrap().len(), MAX_USER_AGENT_LEN);
    }
}
