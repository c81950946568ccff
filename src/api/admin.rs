//! Admin dashboard endpoints
//!
//! These routes are unauthenticated. Query failures are reported as a JSON
//! `error` payload with status 200; partial results are never returned.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use super::handlers::{AppState, ErrorResponse};

pub async fn logs(State(state): State<Arc<AppState>>) -> Response {
    match state.queries.recent_logs().await {
        Ok(logs) => Json(logs).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch logs: {}", e);
            ErrorResponse::new("Failed to fetch logs").into_response()
        }
    }
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Response {
    match state.queries.stats(Utc::now()).await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch stats: {}", e);
            ErrorResponse::new("Failed to fetch statistics").into_response()
        }
    }
}

pub async fn messages(State(state): State<Arc<AppState>>) -> Response {
    match state.queries.messages().await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch messages: {}", e);
            ErrorResponse::new("Failed to fetch messages").into_response()
        }
    }
}

pub async fn export(State(state): State<Arc<AppState>>) -> Response {
    match state.queries.export_csv(Utc::now()).await {
        Ok(export) => (
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", export.filename),
                ),
            ],
            export.body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to export logs: {}", e);
            ErrorResponse::new("Failed to export logs").into_response()
        }
    }
}
