//! WhatsApp Cloud API webhook payloads.
//!
//! Only the fields the bot reads are modelled; unknown fields are ignored.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::InboundMessage;
use crate::domain::foundation::{Timestamp, UserId};

/// Query of the `GET /webhook` subscription handshake.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

impl VerifyQuery {
    /// The challenge to echo back, if the handshake is valid for `expected`.
    pub fn accept(&self, expected: &str) -> Option<&str> {
        match (&self.mode, &self.verify_token) {
            (Some(mode), Some(token)) if mode == "subscribe" && token == expected => {
                self.challenge.as_deref()
            }
            _ => None,
        }
    }
}

/// Body of a `POST /webhook` notification.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub field: String,
    pub value: ChangeValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub messages: Vec<WebhookMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub wa_id: String,
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookMessage {
    pub from: String,
    #[serde(default)]
    pub id: String,
    /// Unix seconds, sent as a string.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub body: String,
}

impl WebhookPayload {
    /// Text messages of the notification, in payload order.
    ///
    /// Other message types and malformed senders are skipped. A timestamp
    /// that does not parse falls back to the receive time.
    pub fn into_inbound(self) -> Vec<InboundMessage> {
        let mut inbound = Vec::new();
        for change in self.entry.into_iter().flat_map(|e| e.changes) {
            let ChangeValue { contacts, messages } = change.value;
            for message in messages {
                if message.kind != "text" {
                    debug!(kind = %message.kind, id = %message.id, "Skipping non-text message");
                    continue;
                }
                let Some(text) = message.text else {
                    continue;
                };
                let user_id = match UserId::new(message.from.as_str()) {
                    Ok(user_id) => user_id,
                    Err(err) => {
                        warn!(error = %err, "Skipping message with invalid sender");
                        continue;
                    }
                };
                let timestamp = message
                    .timestamp
                    .parse::<i64>()
                    .map(Timestamp::from_unix_secs)
                    .unwrap_or_else(|_| Timestamp::now());
                let name = contacts
                    .iter()
                    .find(|c| c.wa_id == message.from)
                    .or_else(|| contacts.first())
                    .and_then(|c| c.profile.as_ref())
                    .and_then(|p| p.name.clone());

                let mut msg = InboundMessage::new(user_id, text.body, timestamp);
                if !message.id.is_empty() {
                    msg = msg.with_message_id(message.id);
                }
                if let Some(name) = name {
                    msg = msg.with_display_name(name);
                }
                inbound.push(msg);
            }
        }
        inbound
    }
}
