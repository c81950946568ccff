//! Client IP extraction from HTTP headers
//!
//! Resolution order:
//! - first entry of `X-Forwarded-For`
//! - `X-Real-IP`
//! - the socket remote address
//! - the literal `"Unknown"`
//!
//! Values are taken as-is; no IP format validation is performed, so a
//! malformed forwarded value is recorded verbatim.

use axum::http::HeaderMap;
use std::net::IpAddr;

pub const UNKNOWN_IP: &str = "Unknown";

/// Extract the client IP address as it will be recorded
pub fn extract_client_ip(headers: &HeaderMap, socket_ip: Option<IpAddr>) -> String {
    if let Some(ip) = extract_from_x_forwarded_for(headers) {
        return ip;
    }

    if let Some(ip) = header_value(headers, "x-real-ip") {
        return ip.to_string();
    }

    socket_ip
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

/// Leftmost X-Forwarded-For entry (the originating client)
fn extract_from_x_forwarded_for(headers: &HeaderMap) -> Option<String> {
    let xff = header_value(headers, "x-forwarded-for")?;
    xff.split(',')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_socket_address_without_headers() {
        let headers = HeaderMap::new();
        let socket_ip: IpAddr = "192.168.1.1".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(socket_ip)), "192.168.1.1");
    }

    #[test]
    fn test_unknown_without_any_source() {
        let headers = HeaderMap::new();
        assert_eq!(extract_client_ip(&headers, None), UNKNOWN_IP);
    }

    #[test]
    fn test_x_forwarded_for_returns_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.1, 198.51.100.1, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.7"));
        let socket_ip: IpAddr = "192.168.1.1".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(socket_ip)), "203.0.113.1");
    }

    #[test]
    fn test_x_real_ip_used_when_no_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.7"));
        let socket_ip: IpAddr = "192.168.1.1".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(socket_ip)), "198.51.100.7");
    }

    #[test]
    fn test_forwarded_value_is_not_validated() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip, 10.0.0.1"));

        assert_eq!(extract_client_ip(&headers, None), "not-an-ip");
    }

    #[test]
    fn test_empty_forwarded_for_is_skipped() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.7"));

        assert_eq!(extract_client_ip(&headers, None), "198.51.100.7");
    }
}
