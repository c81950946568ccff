//! Visit logging
//!
//! Every logged request becomes one `visitor` row. Logging is best-effort:
//! [`VisitLogger::log`] reports failures through its return value and the
//! server log, and callers discard the result so the request carries on.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

use super::context::RequestContext;
use super::user_agent::classify;
use crate::models::NewVisitor;
use crate::storage::{Storage, StorageError};

pub const DEFAULT_ACTION: &str = "VISIT";

/// Paths under this prefix are never logged
pub const STATIC_PREFIX: &str = "/static";

/// Polled by the dashboard; logging it would flood the table with its own reads
pub const LOG_FEED_PATH: &str = "/admin/logs";

/// Outcome of a logging attempt: the new row id, or why it was not written
pub type VisitLogResult = Result<i64, StorageError>;

/// Whether the tracking middleware records a visit for `path`
pub fn should_log(path: &str) -> bool {
    !path.starts_with(STATIC_PREFIX) && path != LOG_FEED_PATH
}

/// Action tag recorded after a successful contact submission
pub fn contact_submit_action(name: &str) -> String {
    format!("CONTACT_SUBMIT:{name}")
}

#[derive(Clone)]
pub struct VisitLogger {
    storage: Arc<dyn Storage>,
}

impl VisitLogger {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn log(&self, ctx: &RequestContext, page: &str, action: &str) -> VisitLogResult {
        let (browser, platform) = classify(&ctx.user_agent);

        let visitor = NewVisitor {
            session_id: ctx.session_id.clone(),
            ip_address: ctx.client_ip.clone(),
            user_agent: ctx.user_agent.clone(),
            timestamp: Utc::now().timestamp(),
            page: page.to_string(),
            action: action.to_string(),
            referrer: ctx.referrer.clone(),
            host: ctx.host.clone(),
            method: Some(ctx.method.clone()),
            platform: Some(platform.as_str().to_string()),
            browser: Some(browser.as_str().to_string()),
        };

        match self.storage.insert_visitor(&visitor).await {
            Ok(id) => {
                info!(ip = %ctx.client_ip, action, page, "visitor logged");
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, action, page, "failed to log visitor");
                Err(e)
            }
        }
    }
}
