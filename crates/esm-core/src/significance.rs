//! Significance test results and Student's t p-values

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::fmt;

/// What a [`SignificanceResult`] estimate measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimateType {
    /// Pearson correlation coefficient
    Correlation,
    /// Linear trend slope per coordinate unit
    Slope,
}

impl EstimateType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Correlation => "Correlation",
            Self::Slope => "Slope",
        }
    }
}

/// Outcome of a correlation or trend significance test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificanceResult {
    /// Correlation coefficient or slope
    pub estimate: f64,
    /// Kind of estimate
    pub estimate_type: EstimateType,
    /// Valid samples (or pairs) that entered the test
    pub sample_size: usize,
    /// Sample size after the autocorrelation correction
    pub effective_sample_size: f64,
    /// Degrees of freedom of the t-test, `effective_sample_size - 2`
    pub effective_dof: f64,
    /// Two-tailed p-value
    pub p_value: f64,
}

impl SignificanceResult {
    pub fn new(
        estimate: f64,
        estimate_type: EstimateType,
        sample_size: usize,
        effective_sample_size: f64,
        p_value: f64,
    ) -> Self {
        Self {
            estimate,
            estimate_type,
            sample_size,
            effective_sample_size,
            effective_dof: effective_sample_size - 2.0,
            p_value,
        }
    }

    /// Whether the null hypothesis is rejected at level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

impl fmt::Display for SignificanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.4} (n = {}, n_eff = {:.1}, p = {:.4})",
            self.estimate_type.name(),
            self.estimate,
            self.sample_size,
            self.effective_sample_size,
            self.p_value
        )
    }
}

/// Two-tailed p-value of a t statistic
///
/// `dof` must be positive. An infinite statistic gives `0`.
pub fn students_t_two_tailed(t: f64, dof: f64) -> Result<f64> {
    if t.is_nan() {
        return Err(Error::Computation("t statistic is NaN".to_string()));
    }
    if !dof.is_finite() || dof <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "Degrees of freedom {dof} must be positive and finite"
        )));
    }
    if t.is_infinite() {
        return Ok(0.0);
    }

    let dist = StudentsT::new(0.0, 1.0, dof).map_err(|e| {
        Error::Computation(format!("Failed to create t-distribution: {}", e))
    })?;

    // Lower tail keeps precision for large |t|
    Ok((2.0 * dist.cdf(-t.abs())).clamp(0.0, 1.0))
}

/// Two-tailed p-value of a correlation coefficient
///
/// Uses `t = r * sqrt(dof / (1 - r^2))`. Non-positive `dof` leaves nothing
/// to test against and gives `1`, as does `r = 0`; `|r| = 1` gives `0`.
pub fn correlation_p_value(r: f64, dof: f64) -> Result<f64> {
    if !r.is_finite() || r.abs() > 1.0 + 1e-12 {
        return Err(Error::InvalidParameter(format!(
            "Correlation {r} must be in [-1, 1]"
        )));
    }
    if dof.is_nan() {
        return Err(Error::InvalidParameter(
            "Degrees of freedom is NaN".to_string(),
        ));
    }
    if dof <= 0.0 || r == 0.0 {
        return Ok(1.0);
    }

    let r2 = r * r;
    if r2 >= 1.0 {
        return Ok(0.0);
    }

    let t = r.abs() * (dof / (1.0 - r2)).sqrt();
    students_t_two_tailed(t, dof)
}
