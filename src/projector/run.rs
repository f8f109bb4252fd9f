//! Projection output records

use crate::matrix::CollectibilityState;
use serde::Serialize;

/// One simulated period of a projection
///
/// Immutable once emitted. `state` is the sampled state at the end of the
/// period; the default probabilities are read from the row of the state the
/// period started in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionStep {
    /// 1-based period index
    pub period: u32,
    /// Sampled collectibility state at the end of the period
    pub state: CollectibilityState,
    /// Probability of migrating to default within this period
    pub periodic_default_probability: f64,
    /// Probability of having defaulted by the end of this period
    pub cumulative_default_probability: f64,
}

/// An ordered, complete projection of `tenor` steps
///
/// Created fresh per invocation and owned by the caller; consumers read it,
/// never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRun {
    start: CollectibilityState,
    steps: Vec<ProjectionStep>,
}

impl ProjectionRun {
    pub(crate) fn new(start: CollectibilityState, steps: Vec<ProjectionStep>) -> Self {
        Self { start, steps }
    }

    /// Starting state the projection was launched from
    pub fn start(&self) -> CollectibilityState {
        self.start
    }

    pub fn steps(&self) -> &[ProjectionStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Cumulative PD at the final projected period
    pub fn final_cumulative_pd(&self) -> f64 {
        self.steps
            .last()
            .map(|s| s.cumulative_default_probability)
            .unwrap_or(0.0)
    }

    /// First period in which the sampled path reached the default state
    pub fn first_default_period(&self) -> Option<u32> {
        self.steps
            .iter()
            .find(|s| s.state.is_default())
            .map(|s| s.period)
    }
}

impl<'a> IntoIterator for &'a ProjectionRun {
    type Item = &'a ProjectionStep;
    type IntoIter = std::slice::Iter<'a, ProjectionStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
