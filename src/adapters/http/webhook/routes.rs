//! HTTP routes for the webhook endpoints.

use std::time::Duration;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{health, receive_webhook, verify_webhook, WebhookHandlers};

/// Creates the application router with tracing and a request timeout.
pub fn webhook_routes(handlers: WebhookHandlers, request_timeout: Duration) -> Router {
    Router::new()
        .route("/webhook", get(verify_webhook).post(receive_webhook))
        .route("/health", get(health))
        .with_state(handlers)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout)),
        )
}
