//! Ordinary least-squares linear trend and detrending

use esm_core::pairwise::{centered_sums, mean};
use esm_core::{is_missing, Error, Result, Series, MISSING};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Minimum valid samples for a linear fit
pub const MIN_TREND_SAMPLES: usize = 2;

/// A fitted linear trend and the residual it leaves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Change per unit of coordinate
    pub slope: f64,
    /// Value of the line at coordinate zero
    pub intercept: f64,
    /// Input minus fitted line; missing wherever the input is missing
    pub residual: Series,
    /// Valid samples used in the fit
    pub sample_size: usize,
}

impl TrendResult {
    /// Line value at a coordinate
    pub fn fitted_at(&self, coordinate: f64) -> f64 {
        self.intercept + self.slope * coordinate
    }

    /// Line values over the whole input coordinate
    pub fn fitted_line(&self) -> Vec<f64> {
        self.residual
            .coordinate()
            .iter()
            .map(|&c| self.fitted_at(c))
            .collect()
    }
}

/// Fit `value = intercept + slope * coordinate` over the valid samples
///
/// Fails with [`Error::InsufficientData`] when fewer than two samples are
/// valid.
#[instrument(level = "debug", skip_all, fields(len = series.len()))]
pub fn linear_trend(series: &Series) -> Result<TrendResult> {
    let (x, y): (Vec<f64>, Vec<f64>) = series.valid_points().unzip();
    if x.len() < MIN_TREND_SAMPLES {
        return Err(Error::InsufficientData {
            expected: MIN_TREND_SAMPLES,
            actual: x.len(),
        });
    }

    // Strictly increasing coordinates keep sxx positive for n >= 2
    let (sxy, sxx, _) = centered_sums(&x, &y);
    let slope = sxy / sxx;
    let intercept = mean(&y) - slope * mean(&x);

    let residual_values = series
        .coordinate()
        .iter()
        .zip(series.values())
        .map(|(&c, &v)| {
            if is_missing(v) {
                MISSING
            } else {
                v - (intercept + slope * c)
            }
        })
        .collect();
    let residual = series.with_values(residual_values)?;

    debug!(slope, intercept, n = x.len(), "fitted linear trend");

    Ok(TrendResult {
        slope,
        intercept,
        residual,
        sample_size: x.len(),
    })
}

/// Remove the least-squares line, keeping coordinate and weight
pub fn detrend(series: &Series) -> Result<Series> {
    Ok(linear_trend(series)?.residual)
}
