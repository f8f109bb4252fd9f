//! Migration-based credit impairment projection system
//!
//! Computes Islamic-banking impairment figures from collectibility migration
//! matrices. The core engine projects probability of default (PD) period by
//! period along a single sampled migration path; the `impairment` module
//! carries the surrounding formula calculators (ECL, LGD, fair value,
//! forward-looking adjustments, Kafalah provisioning).
//!
//! The binaries (`run_projection`, `trace_path`) are thin wrappers around
//! this library so the projection logic stays testable without spawning
//! processes.

pub mod error;
pub mod impairment;
pub mod matrix;
pub mod projector;

pub use error::ProjectionError;
pub use matrix::{
    CollectibilityState, MatrixProvider, PeriodWindow, StaticMatrixProvider, TransitionMatrix,
};
pub use projector::{
    ProjectionRun, ProjectionStep, Projector, ProjectorConfig, RowValidation, SeededUniform,
    UniformDraw,
};
