//! API error types

use thiserror::Error;

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Engine error
    #[error("engine error: {0}")]
    Engine(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Inconsistent locate query
    #[error("invalid query: {0}")]
    Query(String),

    /// Malformed TOML configuration
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<textanchor_engine::EngineError> for ApiError {
    fn from(err: textanchor_engine::EngineError) -> Self {
        match err {
            textanchor_engine::EngineError::ConfigError(msg) => ApiError::Config(msg),
            other => ApiError::Engine(other.to_string()),
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
