//! Numerical kernel: descriptive statistics, distributions and hypothesis tests.

pub mod descriptive;
pub mod distributions;
pub mod hypothesis;

pub use descriptive::{GroupSummary, mean, median, quantile, sample_std_dev};
pub use hypothesis::{
    AnovaResult, ChiSquareResult, KruskalWallisResult, LinearRegression, chi_square_uniform,
    kruskal_wallis, linear_regression, one_way_anova,
};
