//! Descriptive statistics over `f64` samples.
//!
//! Conventions follow the usual dataframe defaults: the standard deviation
//! is the sample (n - 1) estimate, and quantiles interpolate linearly
//! between the two closest ranks.

/// Arithmetic mean, `None` for an empty sample.
///
/// # Examples
///
/// ```
/// use fire_analyst::stats::descriptive::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with n - 1 degrees of freedom, `None` for fewer than two values.
#[must_use]
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Sample standard deviation, `None` for fewer than two values.
///
/// # Examples
///
/// ```
/// use fire_analyst::stats::descriptive::sample_std_dev;
///
/// let std = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((std - 2.138_089_935).abs() < 1e-9);
/// assert_eq!(sample_std_dev(&[1.0]), None);
/// ```
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Quantile of ascending `sorted_values` with linear interpolation.
///
/// `q` is a fraction in `[0, 1]`. Returns `None` for an empty sample.
///
/// # Panics
///
/// Debug builds panic if `sorted_values` is not sorted in ascending order.
/// Release builds skip the check and return an unspecified value.
///
/// # Examples
///
/// ```
/// use fire_analyst::stats::descriptive::quantile_sorted;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile_sorted(&values, 0.5), Some(2.5));
/// assert_eq!(quantile_sorted(&values, 0.25), Some(1.75));
/// ```
#[must_use]
pub fn quantile_sorted(sorted_values: &[f64], q: f64) -> Option<f64> {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );

    let last = sorted_values.len().checked_sub(1)?;
    let position = q.clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    let low = sorted_values[lower];
    let high = sorted_values[upper];
    Some(low + (high - low) * fraction)
}

/// Quantile of unsorted values; sorts a copy internally.
#[must_use]
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let sorted = sorted_copy(values);
    quantile_sorted(&sorted, q)
}

/// Median with linear interpolation between the two middle values.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Ascending copy of `values` with NaN skipped.
#[must_use]
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .collect::<Vec<_>>();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Summary of one group of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    /// `None` when the group has a single observation
    pub std_dev: Option<f64>,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl GroupSummary {
    /// Summarize a non-empty group, `None` when `values` is empty
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let sorted = sorted_copy(values);
        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let sum = sorted.iter().sum::<f64>();
        Some(Self {
            count: sorted.len(),
            sum,
            mean: sum / sorted.len() as f64,
            std_dev: sample_std_dev(&sorted),
            median: quantile_sorted(&sorted, 0.5)?,
            min,
            max,
        })
    }
}
