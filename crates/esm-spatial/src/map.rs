//! Per-cell statistics over a grid of series
//!
//! Each function returns one `Result` per cell, in cell order, so a cell
//! with too few valid samples (land, sea ice) does not fail the grid. With
//! the `parallel` feature the cells are processed on the rayon pool.

use esm_core::{Result, Series, SignificanceResult};
use esm_correlation::{correlation_significance_with, CorrelationParameters};
use esm_trend::{detrend, trend_significance_with, TrendParameters};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn map_cells<T, F>(cells: &[Series], f: F) -> Vec<Result<T>>
where
    T: Send,
    F: Fn(&Series) -> Result<T> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    let results: Vec<Result<T>> = cells.par_iter().map(f).collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<T>> = cells.iter().map(f).collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        debug!(failed, cells = cells.len(), "cells without a result");
    }
    results
}

/// Trend significance of every cell
///
/// # Example
///
/// ```rust
/// use esm_core::{Error, Series};
/// use esm_spatial::trend_map;
/// use esm_trend::TrendParameters;
///
/// let ocean = Series::from_values(vec![1.0, 2.0, 3.5, 4.0, 5.2, 6.1]);
/// let land = Series::from_values(vec![f64::NAN; 6]);
///
/// let results = trend_map(&[ocean, land], &TrendParameters::default());
/// assert!(results[0].as_ref().unwrap().estimate > 0.0);
/// assert!(matches!(results[1], Err(Error::InsufficientData { .. })));
/// ```
#[instrument(level = "debug", skip_all, fields(cells = cells.len()))]
pub fn trend_map(cells: &[Series], params: &TrendParameters) -> Vec<Result<SignificanceResult>> {
    map_cells(cells, |cell| trend_significance_with(cell, params))
}

/// Correlation of every cell with a reference series
///
/// Typical use is a grid of model output against a climate index.
///
/// # Example
///
/// ```rust
/// use esm_core::Series;
/// use esm_correlation::CorrelationParameters;
/// use esm_spatial::correlation_map;
///
/// let index = Series::from_values(vec![0.2, -0.1, 0.4, 0.9, -0.3, 0.1, 0.6]);
/// let in_phase = Series::from_values(index.values().iter().map(|v| 3.0 * v).collect());
/// let opposed = Series::from_values(index.values().iter().map(|v| -v).collect());
///
/// let results = correlation_map(&[in_phase, opposed], &index, &CorrelationParameters::default());
/// assert!((results[0].as_ref().unwrap().estimate - 1.0).abs() < 1e-12);
/// assert!((results[1].as_ref().unwrap().estimate + 1.0).abs() < 1e-12);
/// ```
#[instrument(level = "debug", skip_all, fields(cells = cells.len()))]
pub fn correlation_map(
    cells: &[Series],
    reference: &Series,
    params: &CorrelationParameters,
) -> Vec<Result<SignificanceResult>> {
    map_cells(cells, |cell| {
        correlation_significance_with(cell, reference, params)
    })
}

/// Detrended anomalies of every cell
#[instrument(level = "debug", skip_all, fields(cells = cells.len()))]
pub fn detrend_map(cells: &[Series]) -> Vec<Result<Series>> {
    map_cells(cells, detrend)
}
