//! Kafalah guarantee provisioning
//!
//! Off-balance guarantee exposures are provisioned at regulatory rates per
//! collectibility bucket, scaled by a credit conversion factor.

use crate::matrix::CollectibilityState;

/// Provision rates by collectibility state
#[derive(Debug, Clone)]
pub struct ProvisionRateTable {
    rates: Vec<(CollectibilityState, f64)>,
}

impl Default for ProvisionRateTable {
    fn default() -> Self {
        // Regulatory general/specific provision rates per bucket
        Self {
            rates: vec![
                (CollectibilityState::Current, 0.01),
                (CollectibilityState::SpecialMention, 0.05),
                (CollectibilityState::Substandard, 0.15),
                (CollectibilityState::Doubtful, 0.50),
                (CollectibilityState::Loss, 1.00),
            ],
        }
    }
}

impl ProvisionRateTable {
    /// Create from loaded rate data
    pub fn from_loaded(rates: &[(CollectibilityState, f64)]) -> Self {
        Self {
            rates: rates.to_vec(),
        }
    }

    /// Provision rate for a collectibility state (0 if not tabulated)
    pub fn get_rate(&self, state: CollectibilityState) -> f64 {
        self.rates
            .iter()
            .find(|(s, _)| *s == state)
            .map(|(_, r)| *r)
            .unwrap_or(0.0)
    }
}

/// Provision for a Kafalah guarantee
///
/// Provision = guarantee exposure x CCF x rate(collectibility).
pub fn kafalah_provision(
    exposure: f64,
    credit_conversion_factor: f64,
    state: CollectibilityState,
    rates: &ProvisionRateTable,
) -> f64 {
    exposure * credit_conversion_factor * rates.get_rate(state)
}
