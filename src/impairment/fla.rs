//! Forward-looking adjustment of base PD
//!
//! Weighted macro scenarios scale a through-the-cycle PD into a
//! point-in-time estimate.

use serde::{Deserialize, Serialize};

/// One macro scenario: a probability weight and a PD multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Scenario {
    pub weight: f64,
    pub pd_multiplier: f64,
}

/// Probability-weighted macro scenario set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardLookingScenarios {
    scenarios: Vec<Scenario>,
}

impl Default for ForwardLookingScenarios {
    fn default() -> Self {
        // Baseline / upside / downside weighting used for reporting
        Self {
            scenarios: vec![
                Scenario { weight: 0.60, pd_multiplier: 1.00 },
                Scenario { weight: 0.20, pd_multiplier: 0.85 },
                Scenario { weight: 0.20, pd_multiplier: 1.40 },
            ],
        }
    }
}

impl ForwardLookingScenarios {
    /// Build from explicit scenarios; weights must sum to 1 within tolerance
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, f64> {
        let total: f64 = scenarios.iter().map(|s| s.weight).sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(total);
        }
        Ok(Self { scenarios })
    }

    /// Weighted average multiplier across scenarios
    pub fn blended_multiplier(&self) -> f64 {
        self.scenarios
            .iter()
            .map(|s| s.weight * s.pd_multiplier)
            .sum()
    }

    /// Apply the blended multiplier to a base PD, clamped to [0, 1]
    pub fn adjusted_pd(&self, base_pd: f64) -> f64 {
        (base_pd * self.blended_multiplier()).clamp(0.0, 1.0)
    }
}
