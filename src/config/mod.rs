//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `CITY_GUIDE` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use city_guide_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod conversation;
mod database;
mod error;
mod server;
mod whatsapp;

pub use conversation::{ConversationConfig, MenuSource, MAX_PAGE_SIZE};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use whatsapp::WhatsAppSettings;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server (host, port, environment, log level)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; absent means in-memory storage
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// WhatsApp Cloud API credentials
    pub whatsapp: WhatsAppSettings,

    /// Conversation flow tunables
    #[serde(default)]
    pub conversation: ConversationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CITY_GUIDE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `CITY_GUIDE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CITY_GUIDE__WHATSAPP__PHONE_NUMBER_ID=...` -> `whatsapp.phone_number_id`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CITY_GUIDE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.whatsapp.validate()?;
        self.conversation.validate()?;

        if self.conversation.menu_source == MenuSource::Database && self.database.is_none() {
            return Err(ValidationError::DatabaseRequired("conversation.menu_source=database"));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
