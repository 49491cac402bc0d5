//! Error types for vidsum.

use thiserror::Error;

/// Library-level error type for vidsum operations.
#[derive(Error, Debug)]
pub enum VidsumError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),
}

/// Result type alias for vidsum operations.
pub type Result<T> = std::result::Result<T, VidsumError>;
