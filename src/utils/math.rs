//! Numeric helpers shared by every pipeline stage
//!
//! All rounding in the model goes through [`round_count`] so that chained
//! stages round identically.

/// Round half away from zero
///
/// `f64::round` already rounds ties away from zero; this wrapper exists so
/// that every stage names the same rule.
#[inline]
#[must_use]
pub fn round_count(value: f64) -> f64 {
    value.round()
}

/// Divide, yielding 0 when the denominator is zero
#[inline]
#[must_use]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Clamp a value into [0, 1]; NaN maps to 0
#[inline]
#[must_use]
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Weight of the fully correlated barrier model in [`combine_access_barriers`]
pub const CORRELATED_BARRIER_WEIGHT: f64 = 0.5;

/// Combine distance and affordability access into a single proportion
///
/// Blends a fully correlated barrier model (`min(d, a)`) with an
/// independent one (`d * a`) using a fixed calibrated weight.
#[inline]
#[must_use]
pub fn combine_access_barriers(within_distance: f64, can_afford: f64) -> f64 {
    CORRELATED_BARRIER_WEIGHT * within_distance.min(can_afford)
        + (1.0 - CORRELATED_BARRIER_WEIGHT) * (within_distance * can_afford)
}

/// Split a count into a rounded share and its exact complement
///
/// Returns `(share, rest)` with `share = round(total * min(1, p))` and
/// `rest = max(0, total - share)`.
#[inline]
#[must_use]
pub fn split_rounded(total: f64, proportion: f64) -> (f64, f64) {
    let share = round_count(total * proportion.min(1.0));
    (share, (total - share).max(0.0))
}
