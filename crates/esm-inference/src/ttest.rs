//! Two-sample t-tests from summary statistics
//!
//! Ensemble experiments are usually compared through per-cell means and
//! standard deviations rather than raw members, so the test works on
//! [`SampleSummary`] values.

use esm_core::{students_t_two_tailed, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mean, standard deviation (with `ddof = 1`) and size of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub mean: f64,
    pub std: f64,
    pub nobs: usize,
}

impl SampleSummary {
    pub fn new(mean: f64, std: f64, nobs: usize) -> Self {
        Self { mean, std, nobs }
    }

    fn validate(&self, label: &str) -> Result<()> {
        if self.nobs < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: self.nobs,
            });
        }
        if !self.mean.is_finite() || !self.std.is_finite() || self.std < 0.0 {
            return Err(Error::InvalidInput(format!(
                "Sample {label} needs a finite mean and a finite non-negative std, got mean={} std={}",
                self.mean, self.std
            )));
        }
        Ok(())
    }

    fn variance(&self) -> f64 {
        self.std * self.std
    }
}

/// Outcome of a two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    /// t statistic of `a.mean - b.mean`
    pub statistic: f64,
    /// Two-tailed p-value
    pub p_value: f64,
    /// Degrees of freedom (fractional for Welch's test)
    pub dof: f64,
}

/// Two-sided t-test for the difference of two independent means
///
/// With `equal_var` the pooled-variance Student test is used, otherwise
/// Welch's test with Welch-Satterthwaite degrees of freedom.
#[instrument(level = "trace")]
pub fn ttest_ind_from_stats(
    a: &SampleSummary,
    b: &SampleSummary,
    equal_var: bool,
) -> Result<TTestResult> {
    a.validate("a")?;
    b.validate("b")?;

    let n1 = a.nobs as f64;
    let n2 = b.nobs as f64;

    let (dof, denom) = if equal_var {
        let dof = n1 + n2 - 2.0;
        let pooled = ((n1 - 1.0) * a.variance() + (n2 - 1.0) * b.variance()) / dof;
        (dof, (pooled * (1.0 / n1 + 1.0 / n2)).sqrt())
    } else {
        let vn1 = a.variance() / n1;
        let vn2 = b.variance() / n2;
        let dof = (vn1 + vn2).powi(2) / (vn1.powi(2) / (n1 - 1.0) + vn2.powi(2) / (n2 - 1.0));
        (dof, (vn1 + vn2).sqrt())
    };

    if denom == 0.0 {
        return Err(Error::zero_variance("two-sample t-test"));
    }

    let statistic = (a.mean - b.mean) / denom;
    let p_value = students_t_two_tailed(statistic, dof)?;

    Ok(TTestResult {
        statistic,
        p_value,
        dof,
    })
}

/// Element-wise t-tests over paired summaries, e.g. two experiments on
/// the same grid
///
/// Fails as a whole only when the two sets differ in length; each pair
/// gets its own result otherwise.
pub fn ttest_ind_from_stats_batch(
    a: &[SampleSummary],
    b: &[SampleSummary],
    equal_var: bool,
) -> Result<Vec<Result<TTestResult>>> {
    if a.len() != b.len() {
        return Err(Error::size_mismatch(a.len(), b.len(), "t-test summaries"));
    }
    Ok(a
        .iter()
        .zip(b)
        .map(|(x, y)| ttest_ind_from_stats(x, y, equal_var))
        .collect())
}
