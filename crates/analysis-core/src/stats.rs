//! Cross-sectional statistics used by benchmarks, comparisons and forecasts.
//!
//! All helpers return `None` instead of NaN when the input cannot support the
//! statistic.

use statrs::statistics::Statistics;

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.mean())
}

/// Sample standard deviation (divides by N-1). Needs at least two points.
pub fn sample_std_dev(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let sd = data.std_dev();
    sd.is_finite().then_some(sd)
}

/// z-score of `value` against a mean and standard deviation.
/// `None` when the spread is degenerate.
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> Option<f64> {
    if !std_dev.is_finite() || std_dev < f64::EPSILON {
        return None;
    }
    Some((value - mean) / std_dev)
}

/// Percentile rank of `value` within `data` (0.0 to 1.0), ties count half.
pub fn percentile_rank(value: f64, data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let count_below = data.iter().filter(|&&x| x < value).count();
    let count_equal = data.iter().filter(|&&x| (x - value).abs() < f64::EPSILON).count();
    Some((count_below as f64 + 0.5 * count_equal as f64) / data.len() as f64)
}

/// Weighted mean of `(value, weight)` pairs. Non-positive total weight gives `None`.
pub fn weighted_mean(pairs: &[(f64, f64)]) -> Option<f64> {
    let total_weight: f64 = pairs.iter().map(|(_, w)| w).sum();
    if pairs.is_empty() || total_weight <= 0.0 {
        return None;
    }
    Some(pairs.iter().map(|(v, w)| v * w).sum::<f64>() / total_weight)
}
