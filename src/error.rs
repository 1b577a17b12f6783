//! Error types for amiwire
//!
//! Decoding text is best-effort and never fails; errors only come from the
//! edges (bytes that are not UTF-8, CLI input, configuration).

use thiserror::Error;

/// Result type alias using AmiError
pub type Result<T> = std::result::Result<T, AmiError>;

/// Unified error type for amiwire operations
#[derive(Debug, Error)]
pub enum AmiError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Decoding Errors
    // -------------------------------------------------------------------------
    #[error("Invalid UTF-8 in message at byte {offset}")]
    InvalidUtf8 { offset: usize },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::str::Utf8Error> for AmiError {
    fn from(err: std::str::Utf8Error) -> Self {
        AmiError::InvalidUtf8 {
            offset: err.valid_up_to(),
        }
    }
}
