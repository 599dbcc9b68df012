//! Error types for the behavioral signal engine

use crate::landmarks::LandmarkRole;
use thiserror::Error;

/// Errors that can occur while processing frames
#[derive(Debug, Error)]
pub enum SignalError {
    /// A landmark role the extractors require was absent from the frame.
    /// Recovered by skipping the frame; session state is left untouched.
    #[error("required landmark missing: {0}")]
    MissingLandmark(LandmarkRole),

    /// Frame addressed to a session that was never started or already ended.
    /// A caller-side precondition violation, never recovered internally.
    #[error("unknown or ended session: {0}")]
    UnknownSession(String),

    #[error("invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("invalid frame payload: {0}")]
    InvalidFrame(String),
}
