//! Error types for the Fund FAQ engine.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application, including configuration, I/O, store loading, LLM, and
//! engine errors.

use thiserror::Error;

/// Unified error type for the Fund FAQ engine.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Query-level failure modes (unresolved scheme, missing fact, rephrase
/// timeout) are NOT errors: they are recovered into valid answers inside the
/// engine. Only store loading may abort startup.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fact store loading and lookup errors
    #[error("Store error: {0}")]
    Store(String),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Query engine errors
    #[error("Engine error: {0}")]
    Engine(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
