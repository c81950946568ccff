//! Integration tests for the storage layer and the admin queries built on it
//!
//! Tests can be filtered by database backend using the DATABASE_BACKEND environment variable:
//! - `DATABASE_BACKEND=sqlite cargo test` - Run only SQLite tests
//! - `DATABASE_BACKEND=postgres cargo test` - Run only PostgreSQL tests (needs DATABASE_URL)
//! - By default, both backends are tested

use chrono::{TimeZone, Utc};
use folio::analytics::QueryService;
use folio::models::{NewContactMessage, NewVisitor};
use folio::storage::{PostgresStorage, SqliteStorage, Storage};
use std::sync::Arc;

/// Get the database backend to test from environment variable
fn should_test_backend(backend: &str) -> bool {
    match std::env::var("DATABASE_BACKEND") {
        Ok(val) => val.to_lowercase() == backend.to_lowercase(),
        Err(_) => true, // Test all backends if not specified
    }
}

/// Helper to create SQLite test storage
async fn create_sqlite_storage() -> Arc<dyn Storage> {
    let storage = SqliteStorage::new("sqlite::memory:", 1).await.unwrap();
    storage.init().await.unwrap();
    Arc::new(storage)
}

/// Helper to create PostgreSQL test storage
async fn create_postgres_storage() -> Option<Arc<dyn Storage>> {
    let db_url = std::env::var("DATABASE_URL").ok()?;
    let storage = PostgresStorage::new(&db_url, 5).await.ok()?;
    storage.init().await.ok()?;
    Some(Arc::new(storage))
}

fn visit(session_id: &str, ip: &str, page: &str, browser: &str, timestamp: i64) -> NewVisitor {
    NewVisitor {
        session_id: session_id.to_string(),
        ip_address: ip.to_string(),
        user_agent: String::new(),
        timestamp,
        page: page.to_string(),
        action: "VISIT".to_string(),
        referrer: None,
        host: Some("localhost".to_string()),
        method: Some("GET".to_string()),
        platform: Some("Unknown".to_string()),
        browser: Some(browser.to_string()),
    }
}

fn contact(name: &str, timestamp: i64) -> NewContactMessage {
    NewContactMessage {
        name: Some(name.to_string()),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        message: Some("Hello there".to_string()),
        ip_address: "10.0.0.1".to_string(),
        timestamp,
    }
}

#[tokio::test]
async fn test_insert_and_list_visitors_sqlite() {
    if !should_test_backend("sqlite") {
        return;
    }

    let storage = create_sqlite_storage().await;

    let first = storage
        .insert_visitor(&visit("s1", "10.0.0.1", "/", "Chrome", 1_000))
        .await
        .unwrap();
    let second = storage
        .insert_visitor(&visit("s1", "10.0.0.1", "/about", "Chrome", 2_000))
        .await
        .unwrap();
    assert!(second > first, "ids should increase");

    let visitors = storage.all_visitors().await.unwrap();
    assert_eq!(visitors.len(), 2);
    assert_eq!(visitors[0].page, "/about", "newest first");
    assert_eq!(visitors[1].page, "/");
    assert_eq!(visitors[0].action, "VISIT");
    assert!(visitors[0].country.is_none());
    assert!(visitors[0].city.is_none());
}

#[tokio::test]
async fn test_recent_visitors_limit_and_tie_order_sqlite() {
    if !should_test_backend("sqlite") {
        return;
    }

    let storage = create_sqlite_storage().await;

    // Same timestamp for all rows, so id decides the order
    for i in 0..5 {
        storage
            .insert_visitor(&visit("s1", "10.0.0.1", &format!("/p{}", i), "Chrome", 1_000))
            .await
            .unwrap();
    }

    let recent = storage.recent_visitors(3).await.unwrap();
    let pages: Vec<&str> = recent.iter().map(|v| v.page.as_str()).collect();
    assert_eq!(pages, vec!["/p4", "/p3", "/p2"]);
}

#[tokio::test]
async fn test_unique_visitors_count_ips_not_sessions_sqlite() {
    if !should_test_backend("sqlite") {
        return;
    }

    let storage = create_sqlite_storage().await;

    storage
        .insert_visitor(&visit("s1", "10.0.0.1", "/", "Chrome", 1))
        .await
        .unwrap();
    storage
        .insert_visitor(&visit("s2", "10.0.0.1", "/", "Chrome", 2))
        .await
        .unwrap();
    storage
        .insert_visitor(&visit("s3", "10.0.0.1", "/", "Chrome", 3))
        .await
        .unwrap();
    storage
        .insert_visitor(&visit("s3", "10.0.0.2", "/", "Chrome", 4))
        .await
        .unwrap();

    assert_eq!(storage.count_visitors().await.unwrap(), 4);
    assert_eq!(storage.count_unique_ips().await.unwrap(), 2);
}

#[tokio::test]
async fn test_top_pages_and_browsers_sqlite() {
    if !should_test_backend("sqlite") {
        return;
    }

    let storage = create_sqlite_storage().await;

    let rows = [
        ("/", "Chrome"),
        ("/", "Chrome"),
        ("/", "Firefox"),
        ("/contact", "Safari"),
        ("/contact", "Firefox"),
        ("/about", "Edge"),
        ("/portfolio", "Chrome"),
    ];
    for (i, (page, browser)) in rows.iter().enumerate() {
        storage
            .insert_visitor(&visit("s1", "10.0.0.1", page, browser, i as i64))
            .await
            .unwrap();
    }

    let pages = storage.top_pages(3).await.unwrap();
    assert_eq!(pages.len(), 3);
    assert_eq!((pages[0].page.as_str(), pages[0].count), ("/", 3));
    assert_eq!((pages[1].page.as_str(), pages[1].count), ("/contact", 2));
    // "/about" and "/portfolio" tie at 1; the page name breaks the tie
    assert_eq!((pages[2].page.as_str(), pages[2].count), ("/about", 1));

    let browsers = storage.top_browsers(5).await.unwrap();
    let browsers: Vec<(Option<&str>, i64)> = browsers
        .iter()
        .map(|b| (b.browser.as_deref(), b.count))
        .collect();
    assert_eq!(
        browsers,
        vec![
            (Some("Chrome"), 3),
            (Some("Firefox"), 2),
            (Some("Edge"), 1),
            (Some("Safari"), 1),
        ]
    );
}

#[tokio::test]
async fn test_hourly_visits_window_sqlite() {
    if !should_test_backend("sqlite") {
        return;
    }

    let storage = create_sqlite_storage().await;
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
    let ts = |h: u32, m: u32| {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, 0)
            .unwrap()
            .timestamp()
    };

    // Outside the 24h window
    let stale = now.timestamp() - 25 * 3600;
    storage
        .insert_visitor(&visit("s1", "10.0.0.1", "/", "Chrome", stale))
        .await
        .unwrap();

    storage
        .insert_visitor(&visit("s1", "10.0.0.1", "/", "Chrome", ts(9, 5)))
        .await
        .unwrap();
    storage
        .insert_visitor(&visit("s1", "10.0.0.1", "/", "Chrome", ts(9, 55)))
        .await
        .unwrap();
    storage
        .insert_visitor(&visit("s1", "10.0.0.1", "/", "Chrome", ts(12, 10)))
        .await
        .unwrap();

    let since = now.timestamp() - 24 * 3600;
    let hours = storage.hourly_visits(since).await.unwrap();
    let hours: Vec<(&str, i64)> = hours.iter().map(|h| (h.hour.as_str(), h.count)).collect();
    assert_eq!(hours, vec![("09", 2), ("12", 1)]);
}

#[tokio::test]
async fn test_contact_messages_sqlite() {
    if !should_test_backend("sqlite") {
        return;
    }

    let storage = create_sqlite_storage().await;

    storage
        .insert_contact_message(&contact("Ada", 100))
        .await
        .unwrap();
    storage
        .insert_contact_message(&contact("Grace", 200))
        .await
        .unwrap();

    assert_eq!(storage.count_contact_messages().await.unwrap(), 2);

    let messages = storage.list_contact_messages().await.unwrap();
    assert_eq!(messages[0].name, "Grace", "newest first");
    assert_eq!(messages[1].email, "ada@example.com");
    assert!(messages.iter().all(|m| !m.read));
}

#[tokio::test]
async fn test_contact_message_requires_fields_sqlite() {
    if !should_test_backend("sqlite") {
        return;
    }

    let storage = create_sqlite_storage().await;

    let mut missing_email = contact("Ada", 100);
    missing_email.email = None;
    assert!(storage.insert_contact_message(&missing_email).await.is_err());

    // Empty strings are accepted verbatim
    let mut empty = contact("", 100);
    empty.email = Some(String::new());
    empty.message = Some(String::new());
    assert!(storage.insert_contact_message(&empty).await.is_ok());

    assert_eq!(storage.count_contact_messages().await.unwrap(), 1);
}

#[tokio::test]
async fn test_stats_query_sqlite() {
    if !should_test_backend("sqlite") {
        return;
    }

    let storage = create_sqlite_storage().await;
    let queries = QueryService::new(Arc::clone(&storage));
    let now = Utc::now();

    for i in 0..12 {
        storage
            .insert_visitor(&visit(
                &format!("s{}", i),
                "10.0.0.1",
                &format!("/page{:02}", i),
                "Chrome",
                now.timestamp(),
            ))
            .await
            .unwrap();
    }
    storage
        .insert_contact_message(&contact("Ada", now.timestamp()))
        .await
        .unwrap();

    let stats = queries.stats(now).await.unwrap();
    assert_eq!(stats.total_visits, 12);
    assert_eq!(stats.unique_visitors, 1);
    assert_eq!(stats.total_messages, 1);
    assert_eq!(stats.top_pages.len(), 10);
    assert_eq!(stats.top_pages[0].page, "/page00");
    assert_eq!(stats.top_browsers.len(), 1);
    assert_eq!(stats.hourly_visits.iter().map(|h| h.count).sum::<i64>(), 12);
}

#[tokio::test]
async fn test_recent_logs_query_sqlite() {
    if !should_test_backend("sqlite") {
        return;
    }

    let storage = create_sqlite_storage().await;
    let queries = QueryService::new(Arc::clone(&storage));

    for i in 0..105 {
        let ip = format!("10.0.0.{}", i % 7);
        storage
            .insert_visitor(&visit("s1", &ip, "/", "Chrome", i))
            .await
            .unwrap();
    }

    let recent = queries.recent_logs().await.unwrap();
    assert_eq!(recent.logs.len(), 100);
    assert_eq!(recent.total, 105);
    assert_eq!(recent.unique_visitors, 7);
    assert_eq!(recent.logs[0].timestamp, "1970-01-01T00:01:44");
}

#[tokio::test]
async fn test_export_with_no_visitors_sqlite() {
    if !should_test_backend("sqlite") {
        return;
    }

    let storage = create_sqlite_storage().await;
    let queries = QueryService::new(storage);

    let export = queries.export_csv(Utc::now()).await.unwrap();
    assert_eq!(export.body, "\r\n");
    assert!(export.filename.starts_with("visitor_logs_"));
    assert!(export.filename.ends_with(".csv"));
}

#[tokio::test]
async fn test_export_rows_sqlite() {
    if !should_test_backend("sqlite") {
        return;
    }

    let storage = create_sqlite_storage().await;
    let queries = QueryService::new(Arc::clone(&storage));

    storage
        .insert_visitor(&visit("s1", "10.0.0.1", "/", "Chrome", 1))
        .await
        .unwrap();
    storage
        .insert_visitor(&visit("s1", "10.0.0.1", "/about", "Chrome", 2))
        .await
        .unwrap();

    let export = queries.export_csv(Utc::now()).await.unwrap();
    let lines: Vec<&str> = export.body.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,session_id,ip_address,"));
    assert!(lines[1].contains(",/about,"));
    assert!(lines[2].contains(",/,"));
}

#[tokio::test]
async fn test_visitor_roundtrip_postgres() {
    if !should_test_backend("postgres") {
        return;
    }

    let Some(storage) = create_postgres_storage().await else {
        return;
    };

    let before = storage.count_visitors().await.unwrap();
    let id = storage
        .insert_visitor(&visit("pg-session", "10.9.9.9", "/pg", "Firefox", 1_000))
        .await
        .unwrap();
    assert!(id > 0);
    assert_eq!(storage.count_visitors().await.unwrap(), before + 1);

    let hours = storage.hourly_visits(0).await.unwrap();
    assert!(hours.iter().all(|h| h.hour.len() == 2));
}
