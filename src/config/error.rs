//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("WhatsApp API base URL must be http(s)")]
    InvalidApiBaseUrl,

    #[error("Page size must be between 1 and {max}, got {actual}")]
    InvalidPageSize { max: u32, actual: u32 },

    #[error("Main menu delay must not exceed {max_ms}ms")]
    InvalidMenuDelay { max_ms: u64 },

    #[error("Idle timeout must be positive")]
    InvalidIdleTimeout,

    #[error("{0} requires a database configuration")]
    DatabaseRequired(&'static str),
}
