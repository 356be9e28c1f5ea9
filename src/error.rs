//! Error types for signtext.
//!
//! The recognition core never fails: rejected input comes back as `None`
//! or an empty result. These errors cover the layers around it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SigntextError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Vocabulary registry errors
    #[error("Sign already registered: {id}")]
    DuplicateSign { id: String },

    #[error("Invalid sign definition: {message}")]
    InvalidSign { message: String },

    // Recorded frame input
    #[error("Invalid frame record on line {line}: {message}")]
    Replay { line: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SigntextError>;
