//! Typed failures for the projection engine
//!
//! All variants are configuration/input errors reported synchronously to the
//! caller. None are retryable: the same input fails the same way. The
//! projector either returns a complete run of `tenor` steps or fails before
//! producing any output.

use crate::matrix::CollectibilityState;
use thiserror::Error;

/// Errors raised by [`crate::projector::Projector::project`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Tenor was zero or exceeded the configured maximum
    #[error("invalid tenor {tenor}: must be between 1 and {max}")]
    InvalidTenor { tenor: u32, max: u32 },

    /// The transition matrix contains no rows at all
    #[error("transition matrix is empty")]
    InvalidMatrix,

    /// A state reached during the walk has no outgoing transition row.
    /// Degenerate input; callers must treat this as a fatal configuration
    /// error, not something to retry.
    #[error("no transition row for collectibility state {state}")]
    MissingTransitionRow { state: CollectibilityState },

    /// Strict-mode only: a row's probability mass is not 1.0 within
    /// tolerance. Legacy mode logs a warning and keeps the last-bucket
    /// fallback instead.
    #[error("transition row for state {state} has probability mass {mass:.6}, expected 1.0")]
    UnnormalizedRow { state: CollectibilityState, mass: f64 },
}

/// Errors raised while loading transition matrices from CSV
#[derive(Debug, Error)]
pub enum MatrixLoadError {
    #[error("failed to read matrix CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error reading matrix file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown collectibility code {code} at record {record}")]
    UnknownState { code: u8, record: u64 },

    #[error("probability {probability} out of [0,1] at record {record}")]
    ProbabilityOutOfRange { probability: f64, record: u64 },

    #[error("window end {end} precedes window start {start} for period {period_key}")]
    InvertedWindow {
        period_key: String,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("no matrix rows found in input")]
    Empty,
}
