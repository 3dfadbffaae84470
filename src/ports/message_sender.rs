//! Outbound messaging port.
//!
//! Sends texts and media to a chat address. Inbound delivery is driven by
//! the HTTP webhook adapter calling the application handler.

use async_trait::async_trait;

use crate::domain::conversation::MediaAttachment;
use crate::domain::foundation::{DomainError, UserId};

/// Port for sending messages to users.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send a plain text message.
    ///
    /// # Errors
    ///
    /// - `MessagingError` if the transport rejects or cannot deliver it
    async fn send_text(&self, to: &UserId, text: &str) -> Result<(), DomainError>;

    /// Send a media message. A failure affects only this attachment.
    ///
    /// # Errors
    ///
    /// - `MessagingError` if the media cannot be fetched or delivered
    async fn send_media(&self, to: &UserId, media: &MediaAttachment) -> Result<(), DomainError>;
}
