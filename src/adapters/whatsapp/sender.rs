//! WhatsApp Cloud API sender - implementation of MessageSender.
//!
//! # Configuration
//!
//! ```ignore
//! let config = WhatsAppConfig::new(access_token, phone_number_id)
//!     .with_base_url("https://graph.facebook.com/v19.0");
//!
//! let sender = WhatsAppSender::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::conversation::MediaAttachment;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::MessageSender;

use super::MessagingError;

/// Configuration for the Cloud API sender.
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    access_token: Secret<String>,
    /// Sender phone number id assigned by Meta.
    pub phone_number_id: String,
    /// Graph API base URL, including the version segment.
    pub base_url: String,
    pub timeout: Duration,
    /// Attempts after the first one for transient failures.
    pub max_retries: u32,
}

impl WhatsAppConfig {
    pub fn new(access_token: impl Into<String>, phone_number_id: impl Into<String>) -> Self {
        Self {
            access_token: Secret::new(access_token.into()),
            phone_number_id: phone_number_id.into(),
            base_url: "https://graph.facebook.com/v19.0".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct ImageBody<'a> {
    link: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Content<'a> {
    Text { text: TextBody<'a> },
    Image { image: ImageBody<'a> },
}

#[derive(Debug, Serialize)]
struct OutgoingMessage<'a> {
    messaging_product: &'static str,
    recipient_type: &'static str,
    to: &'a str,
    #[serde(flatten)]
    content: Content<'a>,
}

impl<'a> OutgoingMessage<'a> {
    fn new(to: &'a UserId, content: Content<'a>) -> Self {
        Self {
            messaging_product: "whatsapp",
            recipient_type: "individual",
            to: to.as_str(),
            content,
        }
    }
}

/// Sends messages through the WhatsApp Cloud API.
pub struct WhatsAppSender {
    config: WhatsAppConfig,
    client: Client,
}

impl WhatsAppSender {
    /// # Errors
    ///
    /// - `ClientBuild` if the HTTP client cannot be constructed
    pub fn new(config: WhatsAppConfig) -> Result<Self, MessagingError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MessagingError::ClientBuild(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/messages",
            self.config.base_url.trim_end_matches('/'),
            self.config.phone_number_id
        )
    }

    async fn post(&self, message: &OutgoingMessage<'_>) -> Result<(), MessagingError> {
        let mut attempt = 0;
        loop {
            match self.post_once(message).await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let backoff = Duration::from_millis(200 * 2u64.pow(attempt - 1));
                    warn!(attempt, error = %err, "Cloud API send failed, retrying");
                    sleep(backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn post_once(&self, message: &OutgoingMessage<'_>) -> Result<(), MessagingError> {
        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(self.config.access_token())
            .json(message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MessagingError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    MessagingError::Network(e.to_string())
                }
            })?;

        Self::check_status(response).await
    }

    async fn check_status(response: Response) -> Result<(), MessagingError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(MessagingError::Unauthorized),
            429 => Err(MessagingError::RateLimited),
            code @ 500..=599 => Err(MessagingError::Unavailable { status: code }),
            code => Err(MessagingError::Rejected { status: code, body }),
        }
    }
}

#[async_trait]
impl MessageSender for WhatsAppSender {
    async fn send_text(&self, to: &UserId, text: &str) -> Result<(), DomainError> {
        let message = OutgoingMessage::new(to, Content::Text {
            text: TextBody { body: text },
        });
        self.post(&message).await?;
        debug!(to = %to, chars = text.len(), "Text sent");
        Ok(())
    }

    async fn send_media(&self, to: &UserId, media: &MediaAttachment) -> Result<(), DomainError> {
        let message = OutgoingMessage::new(to, Content::Image {
            image: ImageBody {
                link: &media.url,
                caption: media.caption.as_deref(),
            },
        });
        self.post(&message).await?;
        debug!(to = %to, url = %media.url, "Image sent");
        Ok(())
    }
}
