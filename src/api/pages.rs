use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use mime_guess::from_path;
use rust_embed::RustEmbed;
use std::path::{Component, PathBuf};
use std::sync::Arc;

use super::handlers::AppState;
use crate::analytics::RequestContext;
use crate::config::SiteConfig;

#[derive(RustEmbed)]
#[folder = "site/"]
pub struct Assets;

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    serve_file(&state.site, "index.html").await
}

pub async fn portfolio(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Response {
    let _ = state.logger.log(&ctx, "/portfolio", "PORTFOLIO_VIEW").await;
    serve_file(&state.site, "portfolio.html").await
}

pub async fn about(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Response {
    let _ = state.logger.log(&ctx, "/about", "ABOUT_VIEW").await;
    serve_file(&state.site, "about.html").await
}

pub async fn contact(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Response {
    let _ = state.logger.log(&ctx, "/contact", "CONTACT_VIEW").await;
    serve_file(&state.site, "contact.html").await
}

pub async fn admin(State(state): State<Arc<AppState>>) -> Response {
    serve_file(&state.site, "admin.html").await
}

/// Serve `/static/{*path}`
pub async fn static_asset(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Response {
    serve_file(&state.site, &format!("static/{}", path)).await
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

/// Serve a site file from the configured directory, falling back to the embedded bundle
pub async fn serve_file(site: &SiteConfig, path: &str) -> Response {
    if !is_safe_relative(path) {
        return not_found().await;
    }

    if let Some(ref dir) = site.static_dir {
        let file_path = PathBuf::from(dir).join(path);
        if let Ok(content) = tokio::fs::read(&file_path).await {
            return file_response(path, Body::from(content));
        }
    }

    match Assets::get(path) {
        Some(content) => file_response(path, Body::from(content.data)),
        None => not_found().await,
    }
}

fn file_response(path: &str, body: Body) -> Response {
    let mime = from_path(path).first_or_octet_stream();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.as_ref().to_string())],
        body,
    )
        .into_response()
}

/// Reject absolute paths and `..` segments before touching the filesystem
fn is_safe_relative(path: &str) -> bool {
    std::path::Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}
