//! Collectibility states, transition matrices, and matrix providers

mod data;
pub mod loader;
pub mod provider;

pub use data::{CollectibilityState, PeriodWindow, Transition, TransitionMatrix, MASS_TOLERANCE};
pub use loader::{load_matrices, load_matrices_from_reader};
pub use provider::{default_matrices, MatrixProvider, StaticMatrixProvider};
