//! Webhook HTTP adapter - WhatsApp Cloud API endpoints and health.

mod dto;
mod handlers;
mod routes;

pub use handlers::WebhookHandlers;
pub use routes::webhook_routes;
