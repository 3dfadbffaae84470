//! HTTP handlers for the WhatsApp webhook.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, Secret};
use tracing::warn;

use crate::adapters::whatsapp::{VerifyQuery, WebhookPayload};
use crate::application::InboundQueue;

use super::dto::{AcceptedResponse, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct WebhookHandlers {
    inbound: Arc<InboundQueue>,
    verify_token: Arc<Secret<String>>,
}

impl WebhookHandlers {
    pub fn new(inbound: Arc<InboundQueue>, verify_token: Secret<String>) -> Self {
        Self {
            inbound,
            verify_token: Arc::new(verify_token),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /webhook - Subscription handshake
pub async fn verify_webhook(
    State(handlers): State<WebhookHandlers>,
    Query(query): Query<VerifyQuery>,
) -> Response {
    match query.accept(handlers.verify_token.expose_secret()) {
        Some(challenge) => (StatusCode::OK, challenge.to_string()).into_response(),
        None => {
            warn!(mode = ?query.mode, "Rejected webhook verification");
            StatusCode::FORBIDDEN.into_response()
        }
    }
}

/// POST /webhook - Inbound notifications
///
/// Acknowledges immediately. Each message is queued behind earlier messages
/// of its sender before the response is written, then processed in the
/// background.
pub async fn receive_webhook(
    State(handlers): State<WebhookHandlers>,
    Json(payload): Json<WebhookPayload>,
) -> Response {
    let messages = payload.into_inbound();
    let accepted = messages.len();

    for message in messages {
        handlers.inbound.enqueue(message);
    }

    (StatusCode::OK, Json(AcceptedResponse { accepted })).into_response()
}

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
