//! Autocorrelation-adjusted significance of a linear trend

use crate::linear::linear_trend;
use esm_core::pairwise::centered_sums;
use esm_core::{
    bound_autocorrelation, effective_sample_size, lag1_autocorrelation, students_t_two_tailed,
    Error, EstimateType, Result, Series, SignificanceResult,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Minimum valid samples for a trend significance test
pub const MIN_TREND_TEST_SAMPLES: usize = 3;

/// Parameters for [`trend_significance_with`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendParameters {
    /// Reduce the sample size by the residuals' lag-1 autocorrelation
    pub autocorrelation_correction: bool,
}

impl Default for TrendParameters {
    fn default() -> Self {
        Self {
            autocorrelation_correction: true,
        }
    }
}

/// Test the null hypothesis `slope = 0` with default parameters
pub fn trend_significance(series: &Series) -> Result<SignificanceResult> {
    trend_significance_with(series, &TrendParameters::default())
}

/// Test the null hypothesis `slope = 0`
///
/// The t statistic is `slope / se` with `se = sqrt(SSR / dof / Sxx)` and
/// `dof = n_eff - 2`, where `n_eff` is corrected for the lag-1
/// autocorrelation of the detrended residuals.
///
/// # Example
///
/// ```rust
/// use esm_core::Series;
/// use esm_trend::{trend_significance_with, TrendParameters};
///
/// let series = Series::from_values(
///     (0..30).map(|i| 0.1 * i as f64 + 0.05 * (i % 4) as f64).collect(),
/// );
/// let corrected = trend_significance_with(&series, &TrendParameters::default()).unwrap();
/// let naive = trend_significance_with(
///     &series,
///     &TrendParameters { autocorrelation_correction: false },
/// )
/// .unwrap();
///
/// assert_eq!(corrected.estimate, naive.estimate);
/// assert_eq!(naive.effective_sample_size, 30.0);
/// assert!(corrected.effective_sample_size <= naive.effective_sample_size);
/// ```
#[instrument(level = "debug", skip_all, fields(len = series.len()))]
pub fn trend_significance_with(
    series: &Series,
    params: &TrendParameters,
) -> Result<SignificanceResult> {
    let n = series.valid_count();
    if n < MIN_TREND_TEST_SAMPLES {
        return Err(Error::InsufficientData {
            expected: MIN_TREND_TEST_SAMPLES,
            actual: n,
        });
    }

    let trend = linear_trend(series)?;

    let n_eff = if params.autocorrelation_correction {
        let r1 = bound_autocorrelation(lag1_autocorrelation(&trend.residual));
        debug!(r1, "residual lag-1 autocorrelation");
        effective_sample_size(n, r1)?
    } else {
        n as f64
    };
    let dof = n_eff - 2.0;

    let (x, _): (Vec<f64>, Vec<f64>) = series.valid_points().unzip();
    let (_, sxx, _) = centered_sums(&x, &x);
    let ssr: f64 = trend.residual.valid_points().map(|(_, r)| r * r).sum();

    let p_value = if dof <= 0.0 {
        1.0
    } else {
        let se = (ssr / dof / sxx).sqrt();
        if se == 0.0 {
            if trend.slope == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            students_t_two_tailed(trend.slope / se, dof)?
        }
    };

    debug!(slope = trend.slope, n_eff, p_value, "trend significance");

    Ok(SignificanceResult::new(
        trend.slope,
        EstimateType::Slope,
        n,
        n_eff,
        p_value,
    ))
}
