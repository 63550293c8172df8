//! Hypothesis tests over plain `f64` samples.
//!
//! Each test returns `None` when the input cannot support it (too few
//! groups, no residual degrees of freedom, constant data). Callers turn that
//! into an "Insufficient data" result rather than a panic.

use crate::stats::descriptive::mean;
use crate::stats::distributions::{chi_square_survival, f_survival, students_t_two_sided_p};

/// Keeps the regression t statistic finite for a perfect fit
const PERFECT_FIT_GUARD: f64 = 1e-20;

/// One-way ANOVA result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnovaResult {
    pub f_statistic: f64,
    pub p_value: f64,
    pub df_between: usize,
    pub df_within: usize,
}

/// One-way analysis of variance across `groups`.
///
/// Empty groups are ignored. Needs at least two non-empty groups and more
/// observations than groups. When every group is internally constant but
/// the group means differ, F is infinite and p is zero; when all values are
/// identical there is nothing to test.
///
/// # Examples
///
/// ```
/// use fire_analyst::stats::hypothesis::one_way_anova;
///
/// let same = one_way_anova(&[vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]]).unwrap();
/// assert_eq!(same.f_statistic, 0.0);
/// assert!((same.p_value - 1.0).abs() < 1e-12);
///
/// assert!(one_way_anova(&[vec![1.0, 2.0]]).is_none());
/// ```
#[must_use]
pub fn one_way_anova(groups: &[Vec<f64>]) -> Option<AnovaResult> {
    let groups = groups.iter().filter(|g| !g.is_empty()).collect::<Vec<_>>();
    let k = groups.len();
    let n = groups.iter().map(|g| g.len()).sum::<usize>();
    if k < 2 || n <= k {
        return None;
    }

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in &groups {
        let group_mean = mean(group)?;
        ss_between += group.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += group.iter().map(|v| (v - group_mean).powi(2)).sum::<f64>();
    }

    let df_between = k - 1;
    let df_within = n - k;

    if ss_within == 0.0 {
        if ss_between == 0.0 {
            return None;
        }
        return Some(AnovaResult {
            f_statistic: f64::INFINITY,
            p_value: 0.0,
            df_between,
            df_within,
        });
    }

    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;
    let f_statistic = ms_between / ms_within;

    Some(AnovaResult {
        f_statistic,
        p_value: f_survival(f_statistic, df_between as f64, df_within as f64),
        df_between,
        df_within,
    })
}

/// Chi-square goodness-of-fit result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareResult {
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: usize,
}

/// Goodness of fit of `observed` counts against a uniform distribution.
///
/// The expected count per category is `total / categories`. Needs at least
/// two categories and a non-zero total.
///
/// # Examples
///
/// ```
/// use fire_analyst::stats::hypothesis::chi_square_uniform;
///
/// let result = chi_square_uniform(&[10.0; 12]).unwrap();
/// assert_eq!(result.statistic, 0.0);
/// assert_eq!(result.degrees_of_freedom, 11);
/// assert!((result.p_value - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn chi_square_uniform(observed: &[f64]) -> Option<ChiSquareResult> {
    let categories = observed.len();
    let total = observed.iter().sum::<f64>();
    if categories < 2 || !(total > 0.0) {
        return None;
    }

    let expected = total / categories as f64;
    let statistic = observed
        .iter()
        .map(|o| (o - expected).powi(2) / expected)
        .sum::<f64>();
    let degrees_of_freedom = categories - 1;

    Some(ChiSquareResult {
        statistic,
        p_value: chi_square_survival(statistic, degrees_of_freedom as f64),
        degrees_of_freedom,
    })
}

/// Ordinary least squares fit of `y` on `x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    pub slope: f64,
    pub intercept: f64,
    pub r_value: f64,
    pub r_squared: f64,
    /// Two-sided p-value for a zero slope
    pub p_value: f64,
    /// Standard error of the slope
    pub std_err: f64,
}

/// Simple linear regression with a two-sided t test on the slope.
///
/// Needs at least three points (one residual degree of freedom) and
/// non-constant `x`. A constant `y` gives a flat fit with `r = 0`.
///
/// # Examples
///
/// ```
/// use fire_analyst::stats::hypothesis::linear_regression;
///
/// let fit = linear_regression(&[1.0, 2.0, 3.0, 4.0], &[3.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// assert!((fit.r_squared - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<LinearRegression> {
    let n = x.len();
    if n != y.len() || n < 3 {
        return None;
    }

    let x_mean = mean(x)?;
    let y_mean = mean(y)?;

    let (mut ss_x, mut ss_y, mut ss_xy) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        ss_x += dx * dx;
        ss_y += dy * dy;
        ss_xy += dx * dy;
    }
    if ss_x == 0.0 {
        return None;
    }

    let r_denominator = (ss_x * ss_y).sqrt();
    let r_value = if r_denominator == 0.0 {
        0.0
    } else {
        (ss_xy / r_denominator).clamp(-1.0, 1.0)
    };

    let slope = ss_xy / ss_x;
    let intercept = y_mean - slope * x_mean;

    let df = (n - 2) as f64;
    let t = r_value * (df / ((1.0 - r_value) * (1.0 + r_value) + PERFECT_FIT_GUARD)).sqrt();
    let p_value = students_t_two_sided_p(t, df);
    let std_err = ((1.0 - r_value * r_value) * ss_y / ss_x / df).sqrt();

    Some(LinearRegression {
        slope,
        intercept,
        r_value,
        r_squared: r_value * r_value,
        p_value,
        std_err,
    })
}

/// Kruskal-Wallis H test result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KruskalWallisResult {
    pub h_statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: usize,
}

/// Kruskal-Wallis H test across `groups`, with average ranks for ties and
/// the standard tie correction.
///
/// Empty groups are ignored. Needs at least two non-empty groups and at
/// least two distinct values overall.
///
/// # Examples
///
/// ```
/// use fire_analyst::stats::hypothesis::kruskal_wallis;
///
/// let result = kruskal_wallis(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
/// assert!((result.h_statistic - 3.857_142_857).abs() < 1e-9);
/// assert!(kruskal_wallis(&[vec![5.0, 5.0], vec![5.0]]).is_none());
/// ```
#[must_use]
pub fn kruskal_wallis(groups: &[Vec<f64>]) -> Option<KruskalWallisResult> {
    let groups = groups.iter().filter(|g| !g.is_empty()).collect::<Vec<_>>();
    if groups.len() < 2 {
        return None;
    }

    // (value, group index) sorted by value
    let mut pooled = groups
        .iter()
        .enumerate()
        .flat_map(|(i, g)| g.iter().map(move |&v| (v, i)))
        .collect::<Vec<_>>();
    pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n = pooled.len();
    let mut rank_sums = vec![0.0; groups.len()];
    let mut tie_sum = 0.0;

    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && pooled[end].0 == pooled[start].0 {
            end += 1;
        }
        // Ranks are 1-based; a tie block shares the average of its ranks
        let average_rank = (start + 1 + end) as f64 / 2.0;
        for &(_, group) in &pooled[start..end] {
            rank_sums[group] += average_rank;
        }
        let tied = (end - start) as f64;
        tie_sum += tied.powi(3) - tied;
        start = end;
    }

    let n_f = n as f64;
    let tie_correction = 1.0 - tie_sum / (n_f.powi(3) - n_f);
    if !(tie_correction > 0.0) {
        return None;
    }

    let rank_term = groups
        .iter()
        .zip(&rank_sums)
        .map(|(g, r)| r * r / g.len() as f64)
        .sum::<f64>();
    let h = (12.0 / (n_f * (n_f + 1.0)) * rank_term - 3.0 * (n_f + 1.0)) / tie_correction;
    let degrees_of_freedom = groups.len() - 1;

    Some(KruskalWallisResult {
        h_statistic: h,
        p_value: chi_square_survival(h, degrees_of_freedom as f64),
        degrees_of_freedom,
    })
}
