//! Area-weighted aggregation of many grid-cell series into one

use esm_core::{is_missing, Error, Result, Series, MISSING};
use tracing::{debug, instrument};

/// Weighted mean across series at every coordinate
///
/// At each coordinate, series with a missing value are skipped and the
/// weights of the remaining series are renormalised. A coordinate where no
/// series is valid is missing in the output. The output carries the total
/// valid weight per coordinate as its weight, so averages can be nested
/// (e.g. cells to basins to ocean).
///
/// # Errors
///
/// - [`Error::EmptyInput`] for an empty set, or when the series valid at a
///   coordinate all have zero weight
/// - [`Error::InvalidInput`] when `weights` does not match the set or the
///   series do not share a coordinate
/// - [`Error::InvalidParameter`] for negative or non-finite weights
#[instrument(level = "debug", skip_all, fields(series = series_set.len()))]
pub fn area_weighted_average(series_set: &[Series], weights: &[f64]) -> Result<Series> {
    let first = series_set
        .first()
        .ok_or_else(|| Error::EmptyInput("no series to average".to_string()))?;

    if weights.len() != series_set.len() {
        return Err(Error::size_mismatch(
            series_set.len(),
            weights.len(),
            "area weights",
        ));
    }
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(Error::InvalidParameter(format!(
            "Area weights must be finite and non-negative, got {w}"
        )));
    }
    for series in &series_set[1..] {
        first.ensure_aligned(series, "area-weighted average")?;
    }

    let len = first.len();
    let mut averaged = Vec::with_capacity(len);
    let mut total_weight = Vec::with_capacity(len);
    let mut empty_coordinates = 0usize;

    for i in 0..len {
        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;
        let mut valid = 0usize;

        for (series, &w) in series_set.iter().zip(weights) {
            let v = series.values()[i];
            if is_missing(v) {
                continue;
            }
            weighted_sum += w * v;
            weight_sum += w;
            valid += 1;
        }

        if valid == 0 {
            empty_coordinates += 1;
            averaged.push(MISSING);
            total_weight.push(0.0);
            continue;
        }
        if weight_sum == 0.0 {
            return Err(Error::EmptyInput(format!(
                "all {valid} valid series at coordinate {} have zero weight",
                first.coordinate()[i]
            )));
        }

        averaged.push(weighted_sum / weight_sum);
        total_weight.push(weight_sum);
    }

    if empty_coordinates > 0 {
        debug!(empty_coordinates, "coordinates with no valid series");
    }

    Series::new(averaged, first.coordinate().to_vec())?.with_weight(total_weight)
}
