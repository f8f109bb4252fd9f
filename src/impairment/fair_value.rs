//! Fair-value discounting

/// Present value of a schedule of (period, cashflow) pairs
///
/// `periodic_rate` is the discount rate per period; period 0 cashflows are
/// undiscounted.
pub fn present_value(cashflows: &[(u32, f64)], periodic_rate: f64) -> f64 {
    cashflows
        .iter()
        .map(|&(period, amount)| amount / (1.0 + periodic_rate).powi(period as i32))
        .sum()
}
