//! Expected credit loss

use crate::projector::ProjectionRun;

/// ECL = PD x LGD x EAD
///
/// All three inputs are fractions/amounts at the same horizon; the caller
/// picks 12-month or lifetime PD.
pub fn expected_credit_loss(pd: f64, lgd: f64, ead: f64) -> f64 {
    pd * lgd * ead
}

/// Lifetime ECL using the cumulative PD at the end of a projection run
pub fn lifetime_ecl(run: &ProjectionRun, lgd: f64, ead: f64) -> f64 {
    expected_credit_loss(run.final_cumulative_pd(), lgd, ead)
}
