//! Contact form submission

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, HeaderMap},
    Extension, Form, Json,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use super::handlers::AppState;
use crate::analytics::logger::contact_submit_action;
use crate::analytics::RequestContext;
use crate::models::{ContactForm, NewContactMessage};

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to send message";

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl ContactResponse {
    fn success() -> Json<Self> {
        Json(Self {
            status: "success",
            message: SUCCESS_MESSAGE,
        })
    }

    fn failure() -> Json<Self> {
        Json(Self {
            status: "error",
            message: FAILURE_MESSAGE,
        })
    }
}

/// Persist a submission and log it as a visit.
///
/// Always answers 200; the outcome is carried in `status`. Accepts
/// urlencoded and multipart bodies. An unreadable body is treated like an
/// empty form, which the storage layer rejects.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    request: Request,
) -> Json<ContactResponse> {
    let form = read_form(request).await;

    let message = NewContactMessage {
        name: form.name,
        email: form.email,
        message: form.message,
        ip_address: ctx.client_ip.clone(),
        timestamp: Utc::now().timestamp(),
    };

    if let Err(e) = state.storage.insert_contact_message(&message).await {
        error!(error = %e, "failed to save contact message");
        return ContactResponse::failure();
    }

    let name = message.name.as_deref().unwrap_or_default();
    let _ = state
        .logger
        .log(&ctx, "/contact", &contact_submit_action(name))
        .await;

    ContactResponse::success()
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

async fn read_form(request: Request) -> ContactForm {
    if is_multipart(request.headers()) {
        match read_multipart(request).await {
            Ok(pairs) => return ContactForm::from_pairs(pairs),
            Err(e) => debug!(error = %e, "unreadable multipart contact body"),
        }
    } else {
        match Form::<Vec<(String, String)>>::from_request(request, &()).await {
            Ok(Form(pairs)) => return ContactForm::from_pairs(pairs),
            Err(rejection) => debug!(error = %rejection, "unreadable contact form body"),
        }
    }
    ContactForm::default()
}

/// Text value of every named part, in body order.
async fn read_multipart(request: Request) -> anyhow::Result<Vec<(String, String)>> {
    let mut multipart = Multipart::from_request(request, &()).await?;
    let mut pairs = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        pairs.push((name, field.text().await?));
    }
    Ok(pairs)
}
