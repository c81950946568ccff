use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::analytics::{QueryService, VisitLogger};
use crate::config::SiteConfig;
use crate::session::SessionManager;
use crate::storage::Storage;

pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub logger: VisitLogger,
    pub queries: QueryService,
    pub sessions: SessionManager,
    pub site: SiteConfig,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, sessions: SessionManager, site: SiteConfig) -> Self {
        Self {
            logger: VisitLogger::new(Arc::clone(&storage)),
            queries: QueryService::new(Arc::clone(&storage)),
            storage,
            sessions,
            site,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Json<Self> {
        Json(Self {
            error: error.into(),
        })
    }
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}
