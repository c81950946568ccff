use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::session::SessionManager;
use crate::storage::Storage;

use super::handlers::{health_check, AppState};
use super::middleware::track_visit;
use super::{admin, contact, pages};

pub fn create_router(storage: Arc<dyn Storage>, config: &Config) -> Router {
    let sessions = SessionManager::new(&config.session.secret, config.session.cookie_name.clone());
    let state = Arc::new(AppState::new(storage, sessions, config.site.clone()));

    Router::new()
        .route("/", get(pages::index))
        .route("/portfolio", get(pages::portfolio))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact).post(contact::submit))
        .route("/admin", get(pages::admin))
        .route("/admin/logs", get(admin::logs))
        .route("/admin/stats", get(admin::stats))
        .route("/admin/messages", get(admin::messages))
        .route("/admin/export", get(admin::export))
        .route("/static/{*path}", get(pages::static_asset))
        .route("/health", get(health_check))
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            track_visit,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
