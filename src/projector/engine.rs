//! Single-path migration sampling and cumulative PD composition

use super::run::{ProjectionRun, ProjectionStep};
use super::{UniformDraw, DEFAULT_MAX_TENOR};
use crate::error::ProjectionError;
use crate::matrix::{CollectibilityState, TransitionMatrix, MASS_TOLERANCE};
use log::warn;

/// How to treat rows whose probability mass is not 1.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowValidation {
    /// Keep the historical behavior: warn and fall back to the last
    /// enumerated target when the draw exceeds the row's mass
    #[default]
    Legacy,
    /// Fail fast with [`ProjectionError::UnnormalizedRow`]
    Strict,
}

/// Projection configuration
#[derive(Debug, Clone)]
pub struct ProjectorConfig {
    /// Upper bound on accepted tenor
    pub max_tenor: u32,
    pub row_validation: RowValidation,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            max_tenor: DEFAULT_MAX_TENOR,
            row_validation: RowValidation::Legacy,
        }
    }
}

/// Migration-based PD projector
///
/// Walks a transition matrix for `tenor` periods, sampling one migration
/// path. Each period consumes exactly one uniform draw. The projection is
/// Monte-Carlo by nature: repeated calls with fresh randomness give
/// different paths, while the same seeded source reproduces a path exactly.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: ProjectorConfig,
}

impl Projector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    /// Project a single migration path
    ///
    /// Per period, starting from `start`:
    /// 1. look up the current state's outgoing row (missing row is fatal);
    /// 2. read the periodic PD as the row's mass into the Loss state;
    /// 3. draw `r` in [0, 1) and walk the row in ascending target order,
    ///    picking the first target whose cumulative mass reaches `r` — if
    ///    the row's mass is short of 1 and `r` lands past it, the last
    ///    enumerated target wins (defined tie-break, not an error);
    /// 4. compose cumulative PD by inclusion-exclusion with the prior
    ///    periods' value.
    ///
    /// Reaching the Loss state does not stop the walk; the run always spans
    /// the full tenor.
    pub fn project(
        &self,
        matrix: &TransitionMatrix,
        start: CollectibilityState,
        tenor: u32,
        draws: &mut dyn UniformDraw,
    ) -> Result<ProjectionRun, ProjectionError> {
        if matrix.is_empty() {
            return Err(ProjectionError::InvalidMatrix);
        }
        if tenor == 0 || tenor > self.config.max_tenor {
            return Err(ProjectionError::InvalidTenor {
                tenor,
                max: self.config.max_tenor,
            });
        }

        let mut steps = Vec::with_capacity(tenor as usize);
        let mut current = start;
        let mut cumulative_pd = 0.0;

        for period in 1..=tenor {
            let row = matrix
                .row(current)
                .filter(|row| !row.is_empty())
                .ok_or(ProjectionError::MissingTransitionRow { state: current })?;

            let mass: f64 = row.iter().map(|t| t.probability).sum();
            if (mass - 1.0).abs() > MASS_TOLERANCE {
                match self.config.row_validation {
                    RowValidation::Strict => {
                        return Err(ProjectionError::UnnormalizedRow {
                            state: current,
                            mass,
                        });
                    }
                    RowValidation::Legacy => {
                        warn!(
                            "transition row for state {} has probability mass {:.6}; \
                             draws past the mass resolve to the last target",
                            current, mass
                        );
                    }
                }
            }

            let periodic_pd = row
                .iter()
                .find(|t| t.to.is_default())
                .map(|t| t.probability)
                .unwrap_or(0.0);

            let r = draws.next_uniform();
            // Fallback to the last enumerated target keeps the next state
            // defined even when the row's mass is < 1.
            let mut next = row[row.len() - 1].to;
            let mut accumulated = 0.0;
            for transition in row {
                accumulated += transition.probability;
                if accumulated >= r {
                    next = transition.to;
                    break;
                }
            }

            cumulative_pd = if period == 1 {
                periodic_pd
            } else {
                // Probabilistic OR: P(A or B) = P(A) + P(B) - P(A)P(B),
                // treating each period's default event as independent.
                cumulative_pd + periodic_pd - cumulative_pd * periodic_pd
            };

            steps.push(ProjectionStep {
                period,
                state: next,
                periodic_default_probability: periodic_pd,
                cumulative_default_probability: cumulative_pd,
            });
            current = next;
        }

        Ok(ProjectionRun::new(start, steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::default_matrices;
    use crate::matrix::MatrixProvider;
    use crate::projector::SeededUniform;
    use approx::assert_relative_eq;
    use CollectibilityState::*;

    /// Replays a fixed sequence of draws; panics if the engine asks for more
    struct ForcedDraws {
        draws: Vec<f64>,
        next: usize,
    }

    impl ForcedDraws {
        fn new(draws: &[f64]) -> Self {
            Self {
                draws: draws.to_vec(),
                next: 0,
            }
        }
    }

    impl UniformDraw for ForcedDraws {
        fn next_uniform(&mut self) -> f64 {
            let r = self.draws[self.next];
            self.next += 1;
            r
        }
    }

    fn performing_row_matrix() -> TransitionMatrix {
        TransitionMatrix::from_transitions(vec![
            (Current, Current, 0.92),
            (Current, SpecialMention, 0.05),
            (Current, Substandard, 0.02),
            (Current, Doubtful, 0.01),
            (Current, Loss, 0.00),
        ])
    }

    fn loss_row_matrix() -> TransitionMatrix {
        TransitionMatrix::from_transitions(vec![
            (Loss, Current, 0.01),
            (Loss, SpecialMention, 0.02),
            (Loss, Substandard, 0.05),
            (Loss, Doubtful, 0.12),
            (Loss, Loss, 0.80),
        ])
    }

    #[test]
    fn test_mid_draw_stays_in_first_bucket() {
        let projector = Projector::default();
        let mut draws = ForcedDraws::new(&[0.5]);
        let run = projector
            .project(&performing_row_matrix(), Current, 1, &mut draws)
            .unwrap();

        assert_eq!(run.len(), 1);
        let step = run.steps()[0];
        assert_eq!(step.period, 1);
        assert_eq!(step.state, Current);
        assert_eq!(step.periodic_default_probability, 0.0);
        assert_eq!(step.cumulative_default_probability, 0.0);
    }

    #[test]
    fn test_draw_resolves_first_target_covering_mass() {
        // Ascending walk: 0.92 < 0.95 at state 1, 0.97 >= 0.95 at state 2
        let projector = Projector::default();
        let mut draws = ForcedDraws::new(&[0.95]);
        let run = projector
            .project(&performing_row_matrix(), Current, 1, &mut draws)
            .unwrap();
        assert_eq!(run.steps()[0].state, SpecialMention);
    }

    #[test]
    fn test_short_mass_falls_back_to_last_target() {
        // Row sums to 0.9; a draw past the mass resolves to the last
        // enumerated target rather than erroring
        let matrix = TransitionMatrix::from_transitions(vec![
            (Current, Current, 0.60),
            (Current, SpecialMention, 0.20),
            (Current, Substandard, 0.10),
        ]);
        let projector = Projector::default();
        let mut draws = ForcedDraws::new(&[0.95]);
        let run = projector.project(&matrix, Current, 1, &mut draws).unwrap();
        assert_eq!(run.steps()[0].state, Substandard);
    }

    #[test]
    fn test_loss_row_two_periods_composes_cumulative_pd() {
        let projector = Projector::default();
        let mut draws = ForcedDraws::new(&[0.99, 0.99]);
        let run = projector
            .project(&loss_row_matrix(), Loss, 2, &mut draws)
            .unwrap();

        // Cumulative mass reaches 1.00 at the Loss bucket; both draws land there
        assert_eq!(run.steps()[0].state, Loss);
        assert_eq!(run.steps()[1].state, Loss);

        assert_relative_eq!(
            run.steps()[0].cumulative_default_probability,
            0.80,
            epsilon = 1e-12
        );
        // 0.80 + 0.80 - 0.80 * 0.80
        assert_relative_eq!(
            run.steps()[1].cumulative_default_probability,
            0.96,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_tenor_rejected() {
        let projector = Projector::default();
        let mut draws = ForcedDraws::new(&[]);
        let err = projector
            .project(&performing_row_matrix(), Current, 0, &mut draws)
            .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidTenor { tenor: 0, .. }));
    }

    #[test]
    fn test_tenor_above_cap_rejected() {
        let projector = Projector::new(ProjectorConfig {
            max_tenor: 12,
            ..Default::default()
        });
        let mut draws = ForcedDraws::new(&[]);
        let err = projector
            .project(&performing_row_matrix(), Current, 13, &mut draws)
            .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidTenor { tenor: 13, max: 12 }));
    }

    #[test]
    fn test_missing_start_row_is_fatal() {
        let projector = Projector::default();
        let mut draws = ForcedDraws::new(&[]);
        let err = projector
            .project(&performing_row_matrix(), Doubtful, 3, &mut draws)
            .unwrap_err();
        assert_eq!(
            err,
            ProjectionError::MissingTransitionRow { state: Doubtful }
        );
    }

    #[test]
    fn test_missing_row_mid_walk_is_fatal() {
        // State 1 migrates to state 2, which has no outgoing row
        let matrix = TransitionMatrix::from_transitions(vec![
            (Current, SpecialMention, 1.0),
        ]);
        let projector = Projector::default();
        let mut draws = ForcedDraws::new(&[0.5, 0.5]);
        let err = projector.project(&matrix, Current, 2, &mut draws).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::MissingTransitionRow {
                state: SpecialMention
            }
        );
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let matrix = TransitionMatrix::from_transitions(Vec::new());
        let projector = Projector::default();
        let mut draws = ForcedDraws::new(&[]);
        let err = projector.project(&matrix, Current, 1, &mut draws).unwrap_err();
        assert_eq!(err, ProjectionError::InvalidMatrix);
    }

    #[test]
    fn test_strict_mode_rejects_short_row() {
        let matrix = TransitionMatrix::from_transitions(vec![
            (Current, Current, 0.60),
            (Current, SpecialMention, 0.30),
        ]);
        let projector = Projector::new(ProjectorConfig {
            row_validation: RowValidation::Strict,
            ..Default::default()
        });
        let mut draws = ForcedDraws::new(&[0.5]);
        let err = projector.project(&matrix, Current, 1, &mut draws).unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::UnnormalizedRow { state: Current, .. }
        ));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let provider = default_matrices();
        let matrix = provider.transition_matrix("2024H1").unwrap();
        let projector = Projector::default();

        let run_a = projector
            .project(matrix, SpecialMention, 24, &mut SeededUniform::from_seed(42))
            .unwrap();
        let run_b = projector
            .project(matrix, SpecialMention, 24, &mut SeededUniform::from_seed(42))
            .unwrap();

        assert_eq!(run_a, run_b);
    }

    #[test]
    fn test_probabilities_bounded_and_cumulative_monotonic() {
        let provider = default_matrices();
        let matrix = provider.transition_matrix("2023H2").unwrap();
        let projector = Projector::default();

        for seed in 0..20u64 {
            let run = projector
                .project(matrix, Current, 60, &mut SeededUniform::from_seed(seed))
                .unwrap();
            assert_eq!(run.len(), 60);

            let mut previous = 0.0;
            for step in &run {
                assert!((0.0..=1.0).contains(&step.periodic_default_probability));
                assert!((0.0..=1.0).contains(&step.cumulative_default_probability));
                assert!(
                    step.cumulative_default_probability >= previous,
                    "cumulative PD decreased at period {}",
                    step.period
                );
                previous = step.cumulative_default_probability;
            }
        }
    }

    #[test]
    fn test_reaching_loss_does_not_stop_the_walk() {
        // Loss is absorbing here; the run still spans the full tenor
        let matrix = TransitionMatrix::from_transitions(vec![
            (Current, Loss, 1.0),
            (Loss, Loss, 1.0),
        ]);
        let projector = Projector::default();
        let mut draws = ForcedDraws::new(&[0.3, 0.3, 0.3]);
        let run = projector.project(&matrix, Current, 3, &mut draws).unwrap();

        assert_eq!(run.len(), 3);
        assert!(run.steps().iter().all(|s| s.state == Loss));
        assert_eq!(run.first_default_period(), Some(1));
        // Period 1 PD = 1.0, so cumulative PD saturates at 1.0
        assert_relative_eq!(run.final_cumulative_pd(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_one_draw_consumed_per_period() {
        let projector = Projector::default();
        let mut draws = ForcedDraws::new(&[0.1, 0.2, 0.3, 0.4]);
        let run = projector
            .project(&performing_row_matrix(), Current, 4, &mut draws)
            .unwrap();
        assert_eq!(run.len(), 4);
        assert_eq!(draws.next, 4);
    }
}
