use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::warn;

use super::handlers::AppState;
use crate::analytics::{should_log, RequestContext, DEFAULT_ACTION};

/// Runs before every request: resolves the session, captures the request
/// context for handlers, and records a visit unless the path is exempt.
pub async fn track_visit(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let session = state.sessions.resolve(request.headers());
    let socket_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let ctx = RequestContext::from_parts(
        session.data.session_id.clone(),
        request.headers(),
        request.method(),
        request.uri(),
        socket_ip,
    );

    if should_log(&ctx.path) {
        let _ = state.logger.log(&ctx, &ctx.path, DEFAULT_ACTION).await;
    }

    request.extensions_mut().insert(ctx);
    let mut response = next.run(request).await;

    if session.is_new {
        match state.sessions.set_cookie_header(&session.data) {
            Ok(cookie) => {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
            Err(e) => warn!(error = %e, "failed to issue session cookie"),
        }
    }

    response
}
