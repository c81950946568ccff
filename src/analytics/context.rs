//! Per-request context captured once by the tracking middleware

use axum::http::{header, HeaderMap, Method, Uri};
use std::net::IpAddr;

use super::ip_extractor::extract_client_ip;

/// Everything the visit logger needs to know about the current request.
///
/// Built by the middleware and handed to handlers as a request extension.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub session_id: String,
    pub client_ip: String,
    pub user_agent: String,
    pub referrer: Option<String>,
    pub host: Option<String>,
    pub method: String,
    pub path: String,
}

impl RequestContext {
    pub fn from_parts(
        session_id: String,
        headers: &HeaderMap,
        method: &Method,
        uri: &Uri,
        socket_ip: Option<IpAddr>,
    ) -> Self {
        let host = header_string(headers, header::HOST)
            .or_else(|| uri.authority().map(|a| a.to_string()));

        Self {
            session_id,
            client_ip: extract_client_ip(headers, socket_ip),
            user_agent: header_string(headers, header::USER_AGENT).unwrap_or_default(),
            referrer: header_string(headers, header::REFERER),
            host,
            method: method.to_string(),
            path: uri.path().to_string(),
        }
    }
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
