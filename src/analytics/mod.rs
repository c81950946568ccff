//! Visitor analytics
//!
//! Request context capture, user-agent classification, visit logging and
//! the aggregate queries behind the admin dashboard.

pub mod context;
pub mod csv;
pub mod ip_extractor;
pub mod logger;
pub mod models;
pub mod queries;
pub mod user_agent;

pub use context::RequestContext;
pub use ip_extractor::extract_client_ip;
pub use logger::{should_log, VisitLogResult, VisitLogger, DEFAULT_ACTION};
pub use queries::QueryService;
pub use user_agent::{classify, Browser, Platform};
