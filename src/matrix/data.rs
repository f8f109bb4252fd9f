//! Collectibility state and transition matrix data structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tolerance used when checking that a row's probability mass equals 1.0
pub const MASS_TOLERANCE: f64 = 1e-6;

/// Collectibility classification of a financing facility
///
/// Ordinal risk buckets per the Indonesian collectibility scale:
/// 1 = fully performing, 5 = default/loss. Ordering matters for the stable
/// enumeration of transition targets, not for the transition math itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CollectibilityState {
    Current = 1,
    SpecialMention = 2,
    Substandard = 3,
    Doubtful = 4,
    Loss = 5,
}

impl CollectibilityState {
    /// All states in ascending code order
    pub const ALL: [CollectibilityState; 5] = [
        CollectibilityState::Current,
        CollectibilityState::SpecialMention,
        CollectibilityState::Substandard,
        CollectibilityState::Doubtful,
        CollectibilityState::Loss,
    ];

    /// Numeric collectibility code (1-5)
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parse a numeric collectibility code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(CollectibilityState::Current),
            2 => Some(CollectibilityState::SpecialMention),
            3 => Some(CollectibilityState::Substandard),
            4 => Some(CollectibilityState::Doubtful),
            5 => Some(CollectibilityState::Loss),
            _ => None,
        }
    }

    /// Whether this is the default/loss state (collectibility 5)
    pub fn is_default(self) -> bool {
        matches!(self, CollectibilityState::Loss)
    }

    /// Human-readable classification label
    pub fn name(self) -> &'static str {
        match self {
            CollectibilityState::Current => "Current",
            CollectibilityState::SpecialMention => "Special Mention",
            CollectibilityState::Substandard => "Substandard",
            CollectibilityState::Doubtful => "Doubtful",
            CollectibilityState::Loss => "Loss",
        }
    }
}

impl fmt::Display for CollectibilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<CollectibilityState> for u8 {
    fn from(state: CollectibilityState) -> u8 {
        state.code()
    }
}

impl TryFrom<u8> for CollectibilityState {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        CollectibilityState::from_code(code)
            .ok_or_else(|| format!("unknown collectibility code {}", code))
    }
}

/// Reporting period window a matrix was calibrated over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A single outgoing transition within a matrix row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub to: CollectibilityState,
    pub probability: f64,
}

/// Migration probabilities between collectibility states for one period window
///
/// Rows are keyed by the originating state; each row holds its outgoing
/// transitions in ascending target order so the sampling walk enumerates them
/// in a fixed, stable order. The matrix is read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    window: Option<PeriodWindow>,
    rows: BTreeMap<CollectibilityState, Vec<Transition>>,
}

impl TransitionMatrix {
    /// Build a matrix from (from, to, probability) triples
    ///
    /// Duplicate (from, to) pairs are summed. Each row is sorted ascending by
    /// target state code.
    pub fn from_transitions<I>(transitions: I) -> Self
    where
        I: IntoIterator<Item = (CollectibilityState, CollectibilityState, f64)>,
    {
        let mut rows: BTreeMap<CollectibilityState, BTreeMap<CollectibilityState, f64>> =
            BTreeMap::new();
        for (from, to, probability) in transitions {
            *rows.entry(from).or_default().entry(to).or_insert(0.0) += probability;
        }

        let rows = rows
            .into_iter()
            .map(|(from, targets)| {
                let row = targets
                    .into_iter()
                    .map(|(to, probability)| Transition { to, probability })
                    .collect();
                (from, row)
            })
            .collect();

        Self { window: None, rows }
    }

    /// Attach the reporting window this matrix was calibrated over
    pub fn with_window(mut self, window: PeriodWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn window(&self) -> Option<PeriodWindow> {
        self.window
    }

    /// Outgoing transitions for a state, in ascending target order
    pub fn row(&self, from: CollectibilityState) -> Option<&[Transition]> {
        self.rows.get(&from).map(Vec::as_slice)
    }

    /// Probability of migrating straight to the default state (0 if absent)
    ///
    /// Returns `None` when the state has no row at all.
    pub fn default_probability(&self, from: CollectibilityState) -> Option<f64> {
        self.row(from).map(|row| {
            row.iter()
                .find(|t| t.to.is_default())
                .map(|t| t.probability)
                .unwrap_or(0.0)
        })
    }

    /// Total probability mass of a row
    pub fn row_mass(&self, from: CollectibilityState) -> Option<f64> {
        self.row(from)
            .map(|row| row.iter().map(|t| t.probability).sum())
    }

    /// Check that every row's probability mass is 1.0 within [`MASS_TOLERANCE`]
    ///
    /// Returns the first offending state and its mass.
    pub fn validate(&self) -> Result<(), (CollectibilityState, f64)> {
        for (&from, row) in &self.rows {
            let mass: f64 = row.iter().map(|t| t.probability).sum();
            if (mass - 1.0).abs() > MASS_TOLERANCE {
                return Err((from, mass));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// States that have an outgoing row, in ascending order
    pub fn states(&self) -> impl Iterator<Item = CollectibilityState> + '_ {
        self.rows.keys().copied()
    }
}
