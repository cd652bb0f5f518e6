//! Error types for the difficulty toolkit
//!
//! The arithmetic core is total: degenerate inputs resolve to defined sentinel
//! values instead of errors. Only malformed input, configuration and I/O
//! problems surface through this type.

use thiserror::Error;

/// Result type alias for difficulty operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the difficulty toolkit
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed user input (bad hex, non-integer hashrate, unknown unit, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Target that cannot be rendered or used
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON rendering errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid target error
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }

    /// Whether the error was caused by what the user typed
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InvalidTarget(_))
    }
}
