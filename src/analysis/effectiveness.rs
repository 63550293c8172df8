//! Containment effectiveness metric.
//!
//! Effectiveness is burned acres divided by containment hours. It is a poor
//! proxy for suppression quality: large fires burn more acres *and* take
//! longer to contain, so the ratio mostly tracks fire size and does not
//! control for it. Treat comparisons built on it as descriptive only.

use crate::constants::{ACRES, CONTAINMENT_DURATION, EFFECTIVENESS};
use crate::error::Result;
use crate::processor::frame::{f64_values, filter_rows, set_column};

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

const OPERATION: &str = "effectiveness metric";

/// Caveat attached to every report that uses the metric
pub const EFFECTIVENESS_CAVEAT: &str = "Effectiveness (acres per containment hour) does not control \
for fire size; larger fires take longer to contain, so differences mostly reflect fire size \
rather than suppression quality.";

/// Acres per hour, `None` when either input is missing or the ratio is not finite
pub fn effectiveness(acres: Option<f64>, duration_hours: Option<f64>) -> Option<f64> {
    let ratio = acres? / duration_hours?;
    ratio.is_finite().then_some(ratio)
}

/// Add the `Effectiveness` column and drop rows where it is not finite.
///
/// A zero duration would give an infinite ratio, so such rows are removed
/// rather than carried forward. See the module docs for the metric's
/// limitations.
pub fn calculate_containment_effectiveness(df: DataFrame) -> Result<DataFrame> {
    let acres = f64_values(&df, ACRES, OPERATION)?;
    let durations = f64_values(&df, CONTAINMENT_DURATION, OPERATION)?;

    let values = acres
        .iter()
        .zip(&durations)
        .map(|(acres, hours)| effectiveness(*acres, *hours))
        .collect::<Vec<_>>();
    let keep = values.iter().map(Option::is_some).collect::<Vec<_>>();

    let mut df = df;
    set_column(&mut df, Series::new(EFFECTIVENESS.into(), values))?;
    let df = filter_rows(&df, &keep)?;

    debug!(
        "Effectiveness computed for {} of {} rows",
        df.height(),
        keep.len()
    );
    Ok(df)
}
