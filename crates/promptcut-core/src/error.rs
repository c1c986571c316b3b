//! Promptcut Error Definitions
//!
//! Defines error types used throughout the project. The validator and the
//! pipeline compiler are total functions and never return these; errors only
//! arise at the edges (AI provider calls, JSON parsing, execution).

use thiserror::Error;

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // AI Errors
    // =========================================================================
    #[error("AI request failed: {0}")]
    AIRequestFailed(String),

    #[error("AI response malformed: {0}")]
    AIResponseMalformed(String),

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Not supported: {0}")]
    NotSupported(String),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;
