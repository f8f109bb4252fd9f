//! Migration-based PD projection engine

mod engine;
mod rng;
mod run;

pub use engine::{Projector, ProjectorConfig, RowValidation};
pub use rng::{SeededUniform, UniformDraw};
pub use run::{ProjectionRun, ProjectionStep};

// ============================================================================
// Tenor bounds
// ============================================================================
// Projections past five years of periods stop being meaningful for the
// half-yearly calibrated matrices, so the engine caps tenor by default.

/// Default maximum number of projected periods
pub const DEFAULT_MAX_TENOR: u32 = 60;
