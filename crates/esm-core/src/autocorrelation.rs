//! Serial dependence: lag-1 autocorrelation and effective sample size
//!
//! Consecutive samples of climate series are rarely independent. The usual
//! correction replaces the raw sample count `n` with
//!
//! ```text
//! n_eff = n * (1 - r1) / (1 + r1)
//! ```
//!
//! where `r1` is the lag-1 autocorrelation, so that significance tests do
//! not overstate the number of independent observations.

use crate::pairwise::{pearson, valid_pairs};
use crate::series::Series;
use crate::{Error, Result};
use tracing::debug;

/// Minimum number of valid `(x[i], x[i+1])` pairs for an estimate
pub const MIN_AUTOCORRELATION_PAIRS: usize = 3;

/// Largest |r1| passed on to [`effective_sample_size`] by the tests
///
/// Estimated autocorrelations of exactly +/-1 (e.g. a straight line) are
/// pulled just inside the open interval.
pub const MAX_ABS_AUTOCORRELATION: f64 = 1.0 - 1e-12;

/// Lag-1 autocorrelation of a series
///
/// Pearson correlation between the series and itself shifted by one step,
/// over pairs where both samples are valid. Returns `0.0` when fewer than
/// [`MIN_AUTOCORRELATION_PAIRS`] pairs exist or when the pairs have no
/// variance; sparse data is then treated as having no detectable serial
/// dependence.
pub fn lag1_autocorrelation(series: &Series) -> f64 {
    lag1_autocorrelation_values(series.values())
}

/// [`lag1_autocorrelation`] over a raw value slice
pub fn lag1_autocorrelation_values(values: &[f64]) -> f64 {
    if values.len() < 2 {
        debug!(len = values.len(), "series too short for lag-1 autocorrelation, using 0");
        return 0.0;
    }

    let (lead, lagged) = valid_pairs(&values[..values.len() - 1], &values[1..]);
    if lead.len() < MIN_AUTOCORRELATION_PAIRS {
        debug!(
            pairs = lead.len(),
            "too few lag-1 pairs for autocorrelation, using 0"
        );
        return 0.0;
    }

    match pearson(&lead, &lagged) {
        Ok(r1) => r1,
        Err(e) => {
            debug!(error = %e, "lag-1 autocorrelation undefined, using 0");
            0.0
        }
    }
}

/// Autocorrelation-adjusted sample size
///
/// `n * (1 - r1) / (1 + r1)`, bounded to `[2, n]`. The lower bound keeps a
/// t-test defined; the upper bound stops negative autocorrelation from
/// inventing observations.
pub fn effective_sample_size(n: usize, r1: f64) -> Result<f64> {
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }
    if !r1.is_finite() || r1 <= -1.0 || r1 >= 1.0 {
        return Err(Error::InvalidParameter(format!(
            "Lag-1 autocorrelation {r1} must be in (-1, 1)"
        )));
    }

    let n = n as f64;
    let n_eff = n * (1.0 - r1) / (1.0 + r1);
    Ok(n_eff.clamp(2.0, n))
}

/// Pull an estimated autocorrelation strictly inside (-1, 1)
pub fn bound_autocorrelation(r1: f64) -> f64 {
    r1.clamp(-MAX_ABS_AUTOCORRELATION, MAX_ABS_AUTOCORRELATION)
}
