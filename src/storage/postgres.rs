use crate::analytics::models::{BrowserCount, HourlyCount, PageCount};
use crate::models::{ContactMessage, NewContactMessage, NewVisitor, Visitor};
use crate::storage::{Storage, StorageResult};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

const VISITOR_COLUMNS: &str = "id, session_id, ip_address, user_agent, timestamp, page, action, \
     referrer, host, method, platform, browser, country, city";

pub struct PostgresStorage {
    pool: Arc<PgPool>,
}

impl PostgresStorage {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS visitor (
                id BIGSERIAL PRIMARY KEY,
                session_id TEXT NOT NULL,
                ip_address TEXT NOT NULL,
                user_agent TEXT,
                timestamp BIGINT NOT NULL,
                page TEXT NOT NULL,
                action TEXT NOT NULL DEFAULT 'VISIT',
                referrer TEXT,
                host TEXT,
                method TEXT,
                platform TEXT,
                browser TEXT,
                country TEXT,
                city TEXT
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_visitor_timestamp ON visitor(timestamp)")
            .execute(self.pool.as_ref())
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contact_message (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                ip_address TEXT NOT NULL,
                timestamp BIGINT NOT NULL,
                read BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn insert_visitor(&self, visitor: &NewVisitor) -> StorageResult<i64> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO visitor (
                session_id, ip_address, user_agent, timestamp, page, action,
                referrer, host, method, platform, browser
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&visitor.session_id)
        .bind(&visitor.ip_address)
        .bind(&visitor.user_agent)
        .bind(visitor.timestamp)
        .bind(&visitor.page)
        .bind(&visitor.action)
        .bind(&visitor.referrer)
        .bind(&visitor.host)
        .bind(&visitor.method)
        .bind(&visitor.platform)
        .bind(&visitor.browser)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn insert_contact_message(&self, message: &NewContactMessage) -> StorageResult<i64> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO contact_message (name, email, message, ip_address, timestamp, read)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING id
            "#,
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .bind(&message.ip_address)
        .bind(message.timestamp)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn recent_visitors(&self, limit: i64) -> StorageResult<Vec<Visitor>> {
        let query = format!(
            "SELECT {VISITOR_COLUMNS} FROM visitor ORDER BY timestamp DESC, id DESC LIMIT $1"
        );
        let visitors = sqlx::query_as::<_, Visitor>(&query)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(visitors)
    }

    async fn all_visitors(&self) -> StorageResult<Vec<Visitor>> {
        let query =
            format!("SELECT {VISITOR_COLUMNS} FROM visitor ORDER BY timestamp DESC, id DESC");
        let visitors = sqlx::query_as::<_, Visitor>(&query)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(visitors)
    }

    async fn count_visitors(&self) -> StorageResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visitor")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_unique_ips(&self) -> StorageResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT ip_address) FROM visitor")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_contact_messages(&self) -> StorageResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_message")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn top_pages(&self, limit: i64) -> StorageResult<Vec<PageCount>> {
        let pages = sqlx::query_as::<_, PageCount>(
            r#"
            SELECT page, COUNT(page) AS count
            FROM visitor
            GROUP BY page
            ORDER BY count DESC, page ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(pages)
    }

    async fn top_browsers(&self, limit: i64) -> StorageResult<Vec<BrowserCount>> {
        let browsers = sqlx::query_as::<_, BrowserCount>(
            r#"
            SELECT browser, COUNT(browser) AS count
            FROM visitor
            GROUP BY browser
            ORDER BY count DESC, browser ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(browsers)
    }

    async fn hourly_visits(&self, since: i64) -> StorageResult<Vec<HourlyCount>> {
        let hours = sqlx::query_as::<_, HourlyCount>(
            r#"
            SELECT to_char(to_timestamp(timestamp) AT TIME ZONE 'UTC', 'HH24') AS hour,
                   COUNT(*) AS count
            FROM visitor
            WHERE timestamp >= $1
            GROUP BY hour
            ORDER BY hour
            "#,
        )
        .bind(since)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(hours)
    }

    async fn list_contact_messages(&self) -> StorageResult<Vec<ContactMessage>> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, message, ip_address, timestamp, read
            FROM contact_message
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(messages)
    }
}
