//! Error type for the risk pipeline.
//!
//! Only genuinely fatal-to-this-request conditions live here. Stratification
//! failures and inference-time malformation are absorbed into degraded
//! results (`TrainOutcome::Degraded`, `PredictedLabel::Unknown`) and never
//! surface as errors.

use thiserror::Error;

/// Errors produced by the risk pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The feature table is empty or too small to split. The pipeline halts
    /// before training; the caller reports this to the user.
    #[error("insufficient data: {rows} feature row(s), need at least {min}")]
    InsufficientData { rows: usize, min: usize },
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
