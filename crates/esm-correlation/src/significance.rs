//! Correlation significance with serial dependence correction

use crate::params::CorrelationParameters;
use esm_core::{
    bound_autocorrelation, correlation_p_value, lag1_autocorrelation_values, pearson,
    valid_pairs, Error, EstimateType, Result, Series, SignificanceResult,
};
use tracing::{debug, instrument};

/// Minimum coordinate-aligned valid pairs for a correlation test
pub const MIN_OVERLAP: usize = 3;

/// Correlation of two aligned series and its significance, default parameters
pub fn correlation_significance(a: &Series, b: &Series) -> Result<SignificanceResult> {
    correlation_significance_with(a, b, &CorrelationParameters::default())
}

/// Correlation of two aligned series and its significance
///
/// Both series must have the same coordinate. Pearson `r` is computed over
/// the pairs valid in both. With the correction enabled, each series' lag-1
/// autocorrelation shrinks the pair count to an effective sample size, and
/// the two-tailed p-value uses `n_eff - 2` degrees of freedom.
#[instrument(level = "debug", skip_all, fields(len = a.len()))]
pub fn correlation_significance_with(
    a: &Series,
    b: &Series,
    params: &CorrelationParameters,
) -> Result<SignificanceResult> {
    a.ensure_aligned(b, "correlation")?;
    correlate_values(a.values(), b.values(), params)
}

/// Correlation where `a` leads `b` by `lead` steps
///
/// `lead > 0` pairs `a[t]` with `b[t + lead]`; `lead < 0` pairs `a[t]`
/// with `b[t - |lead|]`, i.e. `a` lags. Autocorrelations are taken from the
/// shifted, overlapping segments.
#[instrument(level = "debug", skip(a, b, params), fields(len = a.len()))]
pub fn lead_correlation(
    a: &Series,
    b: &Series,
    lead: isize,
    params: &CorrelationParameters,
) -> Result<SignificanceResult> {
    a.ensure_aligned(b, "lead correlation")?;

    let n = a.len();
    let shift = lead.unsigned_abs();
    if shift >= n {
        return Err(Error::InsufficientOverlap {
            expected: MIN_OVERLAP,
            actual: 0,
        });
    }

    let (a_seg, b_seg) = if lead >= 0 {
        (a.slice(0..n - shift), b.slice(shift..n))
    } else {
        (a.slice(shift..n), b.slice(0..n - shift))
    };

    correlate_values(a_seg.values(), b_seg.values(), params)
}

fn correlate_values(
    a: &[f64],
    b: &[f64],
    params: &CorrelationParameters,
) -> Result<SignificanceResult> {
    let (x, y) = valid_pairs(a, b);
    let n = x.len();
    if n < MIN_OVERLAP {
        return Err(Error::InsufficientOverlap {
            expected: MIN_OVERLAP,
            actual: n,
        });
    }

    let r = pearson(&x, &y)?;

    let n_eff = if params.autocorrelation_correction {
        let r1_a = bound_autocorrelation(lag1_autocorrelation_values(a));
        let r1_b = bound_autocorrelation(lag1_autocorrelation_values(b));
        debug!(r1_a, r1_b, "lag-1 autocorrelations");
        params.ess_combination.combine(n, r1_a, r1_b)?
    } else {
        n as f64
    };

    let p_value = correlation_p_value(r, n_eff - 2.0)?;
    debug!(r, n, n_eff, p_value, "correlation significance");

    Ok(SignificanceResult::new(
        r,
        EstimateType::Correlation,
        n,
        n_eff,
        p_value,
    ))
}
