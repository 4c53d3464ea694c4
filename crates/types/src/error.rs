//! Error types for the Survev server

use thiserror::Error;

/// Main error type for the Survev server
#[derive(Error, Debug)]
pub enum SurvevError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication/authorization errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Invalid request payloads
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Survev operations
pub type Result<T> = std::result::Result<T, SurvevError>;

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Parse error
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// Filesystem error while reading or writing the override file
    #[error("Configuration I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid value
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

impl ConfigError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

impl From<ConfigError> for SurvevError {
    fn from(err: ConfigError) -> Self {
        SurvevError::Config(err.to_string())
    }
}
