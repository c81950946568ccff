//! Aggregate rows and admin response payloads

use serde::Serialize;

use crate::models::{format_timestamp, ContactMessage, Visitor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PageCount {
    pub page: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct BrowserCount {
    pub browser: Option<String>,
    pub count: i64,
}

/// Visits bucketed by UTC hour of day (`"00"`..`"23"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct HourlyCount {
    pub hour: String,
    pub count: i64,
}

/// A visitor row as shown on the dashboard log table
#[derive(Debug, Clone, Serialize)]
pub struct VisitLogEntry {
    pub id: i64,
    pub session_id: String,
    pub ip: String,
    pub user_agent: Option<String>,
    pub timestamp: String,
    pub page: String,
    pub action: String,
    pub referrer: Option<String>,
    pub host: Option<String>,
    pub method: Option<String>,
    pub platform: Option<String>,
    pub browser: Option<String>,
}

impl From<Visitor> for VisitLogEntry {
    fn from(v: Visitor) -> Self {
        Self {
            id: v.id,
            session_id: v.session_id,
            ip: v.ip_address,
            user_agent: v.user_agent,
            timestamp: format_timestamp(v.timestamp),
            page: v.page,
            action: v.action,
            referrer: v.referrer,
            host: v.host,
            method: v.method,
            platform: v.platform,
            browser: v.browser,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentLogs {
    pub logs: Vec<VisitLogEntry>,
    pub total: i64,
    pub unique_visitors: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteStats {
    pub total_visits: i64,
    /// Distinct IP addresses, not distinct sessions
    pub unique_visitors: i64,
    pub total_messages: i64,
    pub top_pages: Vec<PageCount>,
    pub top_browsers: Vec<BrowserCount>,
    pub hourly_visits: Vec<HourlyCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageList {
    pub messages: Vec<ContactMessage>,
}

/// A rendered CSV export and its download name
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}
