use crate::analytics::models::{BrowserCount, HourlyCount, PageCount};
use crate::models::{ContactMessage, NewContactMessage, NewVisitor, Visitor};
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Initialize the storage (create tables and indexes)
    async fn init(&self) -> Result<()>;

    /// Append a visitor row inside a transaction, returning its id
    async fn insert_visitor(&self, visitor: &NewVisitor) -> StorageResult<i64>;

    /// Persist a contact form submission, returning its id
    async fn insert_contact_message(&self, message: &NewContactMessage) -> StorageResult<i64>;

    /// Most recent visitor rows, newest first
    async fn recent_visitors(&self, limit: i64) -> StorageResult<Vec<Visitor>>;

    /// Every visitor row, newest first
    async fn all_visitors(&self) -> StorageResult<Vec<Visitor>>;

    async fn count_visitors(&self) -> StorageResult<i64>;

    /// Number of distinct IP addresses in the visitor table
    async fn count_unique_ips(&self) -> StorageResult<i64>;

    async fn count_contact_messages(&self) -> StorageResult<i64>;

    /// Pages by visit count descending, ties broken by page ascending
    async fn top_pages(&self, limit: i64) -> StorageResult<Vec<PageCount>>;

    /// Browsers by visit count descending, ties broken by browser ascending
    async fn top_browsers(&self, limit: i64) -> StorageResult<Vec<BrowserCount>>;

    /// Visits since `since` (Unix seconds) grouped by UTC hour of day, ordered by hour
    async fn hourly_visits(&self, since: i64) -> StorageResult<Vec<HourlyCount>>;

    /// Every contact message, newest first
    async fn list_contact_messages(&self) -> StorageResult<Vec<ContactMessage>>;
}
