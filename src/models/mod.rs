pub mod contact;
pub mod visitor;

pub use contact::{ContactForm, ContactMessage, NewContactMessage};
pub use visitor::{NewVisitor, Visitor};

use chrono::DateTime;
use serde::Serializer;

/// Render a Unix timestamp (seconds, UTC) as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}

pub(crate) fn serialize_timestamp<S: Serializer>(
    timestamp: &i64,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(*timestamp))
}
