//! WhatsApp Cloud API adapter - outbound sender and webhook payloads.

mod error;
mod sender;
mod webhook;

pub use error::MessagingError;
pub use sender::{WhatsAppConfig, WhatsAppSender};
pub use webhook::{VerifyQuery, WebhookPayload};
