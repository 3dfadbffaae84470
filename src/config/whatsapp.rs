//! WhatsApp Cloud API configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppSettings {
    /// Graph API base URL, including the version segment
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Sender phone number id
    pub phone_number_id: String,

    /// Permanent or system-user access token
    pub access_token: Secret<String>,

    /// Token echoed by Meta during the webhook handshake
    pub verify_token: Secret<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries for transient send failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl WhatsAppSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.phone_number_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("whatsapp.phone_number_id"));
        }
        if self.access_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("whatsapp.access_token"));
        }
        if self.verify_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("whatsapp.verify_token"));
        }
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://") {
            return Err(ValidationError::InvalidApiBaseUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://graph.facebook.com/v19.0".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}
