//! Impairment formula calculators
//!
//! The thin arithmetic surrounding the PD projector: expected credit loss,
//! loss given default from collateral haircuts, fair-value discounting,
//! forward-looking macro adjustments, and Kafalah guarantee provisioning.

pub mod ecl;
pub mod fair_value;
pub mod fla;
pub mod kafalah;
pub mod lgd;

pub use ecl::{expected_credit_loss, lifetime_ecl};
pub use fair_value::present_value;
pub use fla::ForwardLookingScenarios;
pub use kafalah::{kafalah_provision, ProvisionRateTable};
pub use lgd::{collateral_lgd, LgdInputs};
