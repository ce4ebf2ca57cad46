//! Error type for reporting and configuration loading

use bess_core::PoseError;
use thiserror::Error;

/// Failures outside the per-frame engine
#[derive(Debug, Error)]
pub enum ReportError {
    /// Malformed or mistyped JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed fine, rejected by the engine
    #[error("Configuration rejected: {0}")]
    Config(#[from] PoseError),
}

/// Result alias for this crate
pub type ReportResult<T> = Result<T, ReportError>;
