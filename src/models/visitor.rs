use serde::Serialize;
use sqlx::FromRow;

/// One logged request. Rows are append-only.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Visitor {
    pub id: i64,
    pub session_id: String,
    pub ip_address: String,
    pub user_agent: Option<String>,
    #[serde(serialize_with = "super::serialize_timestamp")]
    pub timestamp: i64,
    pub page: String,
    pub action: String,
    pub referrer: Option<String>,
    pub host: Option<String>,
    pub method: Option<String>,
    pub platform: Option<String>,
    pub browser: Option<String>,
    /// Reserved for geolocation, never populated.
    pub country: Option<String>,
    /// Reserved for geolocation, never populated.
    pub city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewVisitor {
    pub session_id: String,
    pub ip_address: String,
    pub user_agent: String,
    pub timestamp: i64,
    pub page: String,
    pub action: String,
    pub referrer: Option<String>,
    pub host: Option<String>,
    pub method: Option<String>,
    pub platform: Option<String>,
    pub browser: Option<String>,
}
