//! Transition matrix providers
//!
//! The projector never reads compiled-in data directly; it is handed a
//! matrix looked up through [`MatrixProvider`], so real data sources can be
//! substituted without code changes.

use super::{CollectibilityState, PeriodWindow, TransitionMatrix};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Read-only lookup of a transition matrix by reporting period key
pub trait MatrixProvider {
    fn transition_matrix(&self, period_key: &str) -> Option<&TransitionMatrix>;

    /// Available period keys, in ascending order
    fn period_keys(&self) -> Vec<&str>;
}

/// In-memory provider over a fixed keyed set of matrices
#[derive(Debug, Clone, Default)]
pub struct StaticMatrixProvider {
    matrices: BTreeMap<String, TransitionMatrix>,
}

impl StaticMatrixProvider {
    pub fn new(matrices: BTreeMap<String, TransitionMatrix>) -> Self {
        Self { matrices }
    }

    pub fn insert(&mut self, period_key: impl Into<String>, matrix: TransitionMatrix) {
        self.matrices.insert(period_key.into(), matrix);
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

impl MatrixProvider for StaticMatrixProvider {
    fn transition_matrix(&self, period_key: &str) -> Option<&TransitionMatrix> {
        self.matrices.get(period_key)
    }

    fn period_keys(&self) -> Vec<&str> {
        self.matrices.keys().map(String::as_str).collect()
    }
}

/// Bundled reference matrices for two half-year reporting windows
///
/// Calibrated from the historical migration study; each row sums to 1.0.
/// Format: (from, [p1, p2, p3, p4, p5]) with targets in ascending code order.
pub fn default_matrices() -> StaticMatrixProvider {
    let h2_2023: &[(u8, [f64; 5])] = &[
        (1, [0.9200, 0.0500, 0.0200, 0.0100, 0.0000]),
        (2, [0.3500, 0.4200, 0.1400, 0.0600, 0.0300]),
        (3, [0.1000, 0.1800, 0.4500, 0.1700, 0.1000]),
        (4, [0.0300, 0.0700, 0.1500, 0.5000, 0.2500]),
        (5, [0.0100, 0.0200, 0.0500, 0.1200, 0.8000]),
    ];

    let h1_2024: &[(u8, [f64; 5])] = &[
        (1, [0.9350, 0.0420, 0.0150, 0.0060, 0.0020]),
        (2, [0.3800, 0.4100, 0.1300, 0.0500, 0.0300]),
        (3, [0.1200, 0.2000, 0.4300, 0.1500, 0.1000]),
        (4, [0.0400, 0.0800, 0.1600, 0.4800, 0.2400]),
        (5, [0.0050, 0.0150, 0.0400, 0.1000, 0.8400]),
    ];

    let mut provider = StaticMatrixProvider::default();
    provider.insert(
        "2023H2",
        build_matrix(
            h2_2023,
            PeriodWindow {
                start: NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            },
        ),
    );
    provider.insert(
        "2024H1",
        build_matrix(
            h1_2024,
            PeriodWindow {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            },
        ),
    );
    provider
}

fn build_matrix(rows: &[(u8, [f64; 5])], window: PeriodWindow) -> TransitionMatrix {
    let mut transitions = Vec::with_capacity(rows.len() * 5);
    for &(from_code, probabilities) in rows {
        let from = CollectibilityState::from_code(from_code)
            .unwrap_or_else(|| panic!("bad bundled collectibility code {}", from_code));
        for (to, &probability) in CollectibilityState::ALL.iter().zip(probabilities.iter()) {
            transitions.push((from, *to, probability));
        }
    }
    TransitionMatrix::from_transitions(transitions).with_window(window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_matrices_are_row_stochastic() {
        let provider = default_matrices();
        assert_eq!(provider.period_keys(), vec!["2023H2", "2024H1"]);

        for key in provider.period_keys() {
            let matrix = provider.transition_matrix(key).unwrap();
            matrix
                .validate()
                .unwrap_or_else(|(state, mass)| panic!("{key} row {state} mass {mass}"));
            // Every state must have an outgoing row
            assert_eq!(matrix.states().count(), 5);
        }
    }

    #[test]
    fn test_lookup_by_period_key() {
        let provider = default_matrices();
        assert!(provider.transition_matrix("2024H1").is_some());
        assert!(provider.transition_matrix("2019H1").is_none());
    }

    #[test]
    fn test_windows_attached() {
        let provider = default_matrices();
        let window = provider
            .transition_matrix("2024H1")
            .unwrap()
            .window()
            .unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }
}
