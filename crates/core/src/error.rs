//! Error types for sm-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for sm-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sm-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid bucket name
    #[error("Invalid bucket name: {0}")]
    InvalidBucket(String),

    /// Invalid object key
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidBucket(_) => 2, // UsageError
            Error::InvalidKey(_) => 2,    // UsageError
            Error::Config(_) => 2,        // UsageError
            Error::InvalidUrl(_) => 2,    // UsageError
            Error::Network(_) => 3,       // NetworkError
            Error::Auth(_) => 4,          // AuthError
            Error::NotFound(_) => 5,      // NotFound
            Error::Conflict(_) => 6,      // Conflict
            _ => 1,                       // GeneralError
        }
    }
}
