//! Read-only queries behind the admin dashboard and CLI

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::csv::visitors_to_csv;
use super::models::{CsvExport, MessageList, RecentLogs, SiteStats, VisitLogEntry};
use crate::storage::{Storage, StorageResult};

pub const RECENT_LOG_LIMIT: i64 = 100;
pub const TOP_PAGES_LIMIT: i64 = 10;
pub const TOP_BROWSERS_LIMIT: i64 = 5;
pub const HOURLY_WINDOW_SECS: i64 = 24 * 60 * 60;

#[derive(Clone)]
pub struct QueryService {
    storage: Arc<dyn Storage>,
}

impl QueryService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn recent_logs(&self) -> StorageResult<RecentLogs> {
        let logs = self
            .storage
            .recent_visitors(RECENT_LOG_LIMIT)
            .await?
            .into_iter()
            .map(VisitLogEntry::from)
            .collect();

        Ok(RecentLogs {
            logs,
            total: self.storage.count_visitors().await?,
            unique_visitors: self.storage.count_unique_ips().await?,
        })
    }

    /// Dashboard statistics; the hourly histogram covers the 24 hours before `now`.
    ///
    /// Ties in the top-N lists are ordered by the grouped value ascending.
    pub async fn stats(&self, now: DateTime<Utc>) -> StorageResult<SiteStats> {
        let since = now.timestamp() - HOURLY_WINDOW_SECS;

        Ok(SiteStats {
            total_visits: self.storage.count_visitors().await?,
            unique_visitors: self.storage.count_unique_ips().await?,
            total_messages: self.storage.count_contact_messages().await?,
            top_pages: self.storage.top_pages(TOP_PAGES_LIMIT).await?,
            top_browsers: self.storage.top_browsers(TOP_BROWSERS_LIMIT).await?,
            hourly_visits: self.storage.hourly_visits(since).await?,
        })
    }

    pub async fn messages(&self) -> StorageResult<MessageList> {
        Ok(MessageList {
            messages: self.storage.list_contact_messages().await?,
        })
    }

    /// All visitor rows as CSV, named after `now`
    pub async fn export_csv(&self, now: DateTime<Utc>) -> StorageResult<CsvExport> {
        let visitors = self.storage.all_visitors().await?;

        Ok(CsvExport {
            filename: export_filename(now),
            body: visitors_to_csv(&visitors),
        })
    }
}

pub fn export_filename(now: DateTime<Utc>) -> String {
    now.format("visitor_logs_%Y%m%d_%H%M%S.csv").to_string()
}
