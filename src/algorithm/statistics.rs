//! Descriptive statistics used for chart thresholds

/// Percentile with linear interpolation between closest ranks
///
/// `p` is in percent (0-100). The rank is `p / 100 * (n - 1)` over the sorted
/// values; a fractional rank interpolates between its two neighbours. This is
/// the "linear" convention used by most array libraries by default. Returns
/// `None` for an empty input; `p` outside 0-100 is clamped.
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Largest value, ignoring the order of NaNs
#[must_use]
pub fn max_value(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values.into_iter().max_by(f64::total_cmp)
}
