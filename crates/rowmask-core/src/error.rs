//! Error types for RowMask Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Configuration errors, always surfaced before any record is processed
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    // Schema-contract violations during record processing. These signal a
    // defect in the upstream stage, not a recoverable masking condition.
    #[error("Schema contract violation: {0}")]
    SchemaMismatch(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
