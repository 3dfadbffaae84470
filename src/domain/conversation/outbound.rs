//! Messages produced by a transition.

use serde::{Deserialize, Serialize};

/// A media attachment the transport fetches from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub url: String,
    pub caption: Option<String>,
}

impl MediaAttachment {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// One outbound message, in send order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text(String),
    Media(MediaAttachment),
}

impl Outbound {
    pub fn text(body: impl Into<String>) -> Self {
        Outbound::Text(body.into())
    }

    /// The text body, if this is a text message.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Outbound::Text(body) => Some(body),
            Outbound::Media(_) => None,
        }
    }
}
