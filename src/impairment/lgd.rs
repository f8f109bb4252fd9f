//! Loss given default from collateral haircuts

use serde::{Deserialize, Serialize};

/// Inputs to the collateral-based LGD calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LgdInputs {
    /// Exposure at default
    pub ead: f64,
    /// Current collateral valuation
    pub collateral_value: f64,
    /// Haircut applied to the collateral valuation (0.0 to 1.0)
    pub haircut: f64,
    /// Cost of realizing the collateral, as a fraction of its post-haircut value
    #[serde(default)]
    pub recovery_cost_rate: f64,
    /// Annual discount rate applied over the recovery period
    #[serde(default)]
    pub discount_rate: f64,
    /// Expected years until the collateral is realized
    #[serde(default = "default_recovery_years")]
    pub recovery_years: f64,
}

fn default_recovery_years() -> f64 {
    1.0
}

/// LGD = 1 - (discounted net recovery / EAD), clamped to [0, 1]
///
/// Net recovery = collateral x (1 - haircut) x (1 - cost rate), discounted
/// back over the recovery period. Over-collateralized exposures clamp to 0.
pub fn collateral_lgd(inputs: &LgdInputs) -> f64 {
    if inputs.ead <= 0.0 {
        return 0.0;
    }

    let net = inputs.collateral_value * (1.0 - inputs.haircut) * (1.0 - inputs.recovery_cost_rate);
    let discounted = net / (1.0 + inputs.discount_rate).powf(inputs.recovery_years);
    (1.0 - discounted / inputs.ead).clamp(0.0, 1.0)
}
