use anyhow::{anyhow, Result};
use axum::http::{header, HeaderMap, HeaderValue};
use base64::prelude::*;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Data carried in the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: String,
}

impl SessionData {
    pub fn generate() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Session resolved for one request
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub data: SessionData,
    /// True when the cookie was absent or invalid and a new session was issued
    pub is_new: bool,
}

/// Issues and verifies HMAC-signed session cookies
pub struct SessionManager {
    key: Vec<u8>,
    cookie_name: String,
}

impl SessionManager {
    pub fn new(secret: &str, cookie_name: impl Into<String>) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Sign session data as `payload.signature`
    pub fn sign(&self, data: &SessionData) -> Result<String> {
        let json = serde_json::to_string(data)?;
        let payload = BASE64_URL_SAFE_NO_PAD.encode(json.as_bytes());

        let signature = self.mac(&payload)?.finalize().into_bytes();
        let signature_b64 = BASE64_URL_SAFE_NO_PAD.encode(signature);

        Ok(format!("{}.{}", payload, signature_b64))
    }

    /// Verify and decode a signed cookie value
    pub fn verify(&self, token: &str) -> Result<SessionData> {
        let (payload, signature_b64) = token
            .split_once('.')
            .ok_or_else(|| anyhow!("Invalid session format"))?;
        if signature_b64.contains('.') {
            return Err(anyhow!("Invalid session format"));
        }

        let expected = self.mac(payload)?.finalize().into_bytes();
        let provided = BASE64_URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| anyhow!("Invalid session signature encoding"))?;

        if !bool::from(expected.ct_eq(&provided[..])) {
            return Err(anyhow!("Session signature verification failed"));
        }

        let json_bytes = BASE64_URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| anyhow!("Invalid session payload encoding"))?;
        serde_json::from_slice(&json_bytes).map_err(|_| anyhow!("Invalid session data"))
    }

    /// Read the session cookie, issuing a fresh session when it is missing or invalid
    pub fn resolve(&self, headers: &HeaderMap) -> ResolvedSession {
        let existing = cookie_value(headers, &self.cookie_name).and_then(|token| {
            self.verify(token)
                .map_err(|e| tracing::debug!(error = %e, "discarding session cookie"))
                .ok()
        });

        match existing {
            Some(data) => ResolvedSession {
                data,
                is_new: false,
            },
            None => ResolvedSession {
                data: SessionData::generate(),
                is_new: true,
            },
        }
    }

    /// `Set-Cookie` value for a session
    pub fn set_cookie_header(&self, data: &SessionData) -> Result<HeaderValue> {
        let value = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name,
            self.sign(data)?
        );
        Ok(HeaderValue::from_str(&value)?)
    }

    fn mac(&self, payload: &str) -> Result<Hmac<Sha256>> {
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.key)
            .map_err(|e| anyhow!("Failed to create HMAC: {}", e))?;
        mac.update(payload.as_bytes());
        Ok(mac)
    }
}

/// Find a cookie by name across all `Cookie` headers
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
