//! Error types for detector construction and lookup.

use thiserror::Error;

/// Errors surfaced while building or fetching detectors.
///
/// Once a detector is constructed, `classify` itself has no error path:
/// numeric edge cases (zero variance, zero moving range) are handled by
/// explicit branches inside the engines.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// Out-of-range or inconsistent detector parameters. Rejected at
    /// construction time, never at classify time.
    #[error("validation error: {0}")]
    Validation(String),

    /// The configuration document's type string has no registered provider.
    #[error("unknown detector type: {0}")]
    UnknownDetectorType(String),

    /// Malformed detector configuration document.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// No document exists for the requested detector UUID.
    #[error("detector document not found: {0}")]
    DocumentNotFound(uuid::Uuid),

    /// Model store transport failure.
    #[error("model store error: {0}")]
    Store(#[from] reqwest::Error),
}

/// Result alias for detector operations.
pub type Result<T> = std::result::Result<T, DetectorError>;
