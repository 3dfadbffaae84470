//! HTTP adapters - endpoints exposed to the WhatsApp Cloud API.

pub mod webhook;

pub use webhook::{webhook_routes, WebhookHandlers};
