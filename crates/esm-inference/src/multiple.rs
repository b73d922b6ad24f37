//! Multiple-testing correction of p-value fields
//!
//! A map of per-cell p-values tests thousands of hypotheses at once; a few
//! percent of them will pass at `alpha = 0.05` by chance alone. These
//! corrections control the family-wise error rate or the false discovery
//! rate. Missing p-values (land cells, failed fits) are masked out and do
//! not count towards the number of tests.

use esm_core::{is_missing, Error, Result};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Canonical names of the supported methods
pub const MULTIPLE_TESTS: &[&str] = &[
    "bonferroni",
    "sidak",
    "holm-sidak",
    "holm",
    "simes-hochberg",
    "hommel",
    "fdr_bh",
    "fdr_by",
];

/// Correction procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultipleTestMethod {
    /// One-step Bonferroni
    Bonferroni,
    /// One-step Sidak
    Sidak,
    /// Step-down with Sidak adjustments
    HolmSidak,
    /// Step-down with Bonferroni adjustments
    Holm,
    /// Step-up, assumes independent tests
    SimesHochberg,
    /// Closed method based on Simes tests
    Hommel,
    /// Benjamini/Hochberg false discovery rate
    FdrBh,
    /// Benjamini/Yekutieli false discovery rate
    FdrBy,
}

impl MultipleTestMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bonferroni => "bonferroni",
            Self::Sidak => "sidak",
            Self::HolmSidak => "holm-sidak",
            Self::Holm => "holm",
            Self::SimesHochberg => "simes-hochberg",
            Self::Hommel => "hommel",
            Self::FdrBh => "fdr_bh",
            Self::FdrBy => "fdr_by",
        }
    }
}

impl fmt::Display for MultipleTestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MultipleTestMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "bonf" | "bonferroni" => Ok(Self::Bonferroni),
            "s" | "sidak" => Ok(Self::Sidak),
            "hs" | "holm-sidak" => Ok(Self::HolmSidak),
            "h" | "holm" => Ok(Self::Holm),
            "sh" | "simes-hochberg" => Ok(Self::SimesHochberg),
            "ho" | "hommel" => Ok(Self::Hommel),
            "fdr_bh" | "fdr_i" | "fdr_p" | "fdri" | "fdrp" => Ok(Self::FdrBh),
            "fdr_by" | "fdr_n" | "fdr_c" | "fdrn" | "fdrcorr" => Ok(Self::FdrBy),
            other => Err(Error::InvalidParameter(format!(
                "Method '{other}' is not one of the accepted methods: {}",
                MULTIPLE_TESTS.join(", ")
            ))),
        }
    }
}

/// Corrected p-values and rejection decisions, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleTestResult {
    /// `Some(true)` where the hypothesis is rejected; `None` where masked
    pub reject: Vec<Option<bool>>,
    /// Corrected p-values; missing where masked
    #[serde(with = "esm_core::missing_values")]
    pub corrected: Vec<f64>,
    /// Family-wise error rate or false discovery rate
    pub alpha: f64,
    pub method: MultipleTestMethod,
}

impl MultipleTestResult {
    /// Number of rejected hypotheses
    pub fn rejected_count(&self) -> usize {
        self.reject.iter().filter(|r| **r == Some(true)).count()
    }
}

/// Correct a field of p-values for multiple testing
///
/// Non-finite entries are masked out. `alpha` must be in (0, 1) and every
/// finite p-value in [0, 1].
#[instrument(level = "debug", skip(p_values), fields(len = p_values.len()))]
pub fn multipletests(
    p_values: &[f64],
    alpha: f64,
    method: MultipleTestMethod,
) -> Result<MultipleTestResult> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "alpha {alpha} must be in (0, 1)"
        )));
    }
    if let Some(p) = p_values
        .iter()
        .find(|p| !is_missing(**p) && !(0.0..=1.0).contains(*p))
    {
        return Err(Error::InvalidParameter(format!(
            "p-value {p} must be in [0, 1]"
        )));
    }

    let mut order: Vec<usize> = (0..p_values.len())
        .filter(|&i| !is_missing(p_values[i]))
        .collect();
    order.sort_by_key(|&i| OrderedFloat(p_values[i]));
    let sorted: Vec<f64> = order.iter().map(|&i| p_values[i]).collect();

    debug!(tests = sorted.len(), masked = p_values.len() - sorted.len(), "correcting p-values");

    let (reject_sorted, corrected_sorted) = correct_sorted(&sorted, alpha, method);

    let mut reject = vec![None; p_values.len()];
    let mut corrected = vec![f64::NAN; p_values.len()];
    for (rank, &i) in order.iter().enumerate() {
        reject[i] = Some(reject_sorted[rank]);
        corrected[i] = corrected_sorted[rank].min(1.0);
    }

    Ok(MultipleTestResult {
        reject,
        corrected,
        alpha,
        method,
    })
}

/// Apply a method to ascending p-values
fn correct_sorted(p: &[f64], alpha: f64, method: MultipleTestMethod) -> (Vec<bool>, Vec<f64>) {
    let m = p.len();
    if m == 0 {
        return (Vec::new(), Vec::new());
    }
    let mf = m as f64;
    // Number of hypotheses still in play at rank i, m - i
    let remaining = |i: usize| (m - i) as f64;

    match method {
        MultipleTestMethod::Bonferroni => {
            let threshold = alpha / mf;
            (
                p.iter().map(|&v| v <= threshold).collect(),
                p.iter().map(|&v| v * mf).collect(),
            )
        }
        MultipleTestMethod::Sidak => {
            let threshold = -(alpha.ln_1p_neg() / mf).exp_m1();
            (
                p.iter().map(|&v| v <= threshold).collect(),
                p.iter().map(|&v| -(mf * v.ln_1p_neg()).exp_m1()).collect(),
            )
        }
        MultipleTestMethod::HolmSidak => {
            let thresholds: Vec<f64> = (0..m)
                .map(|i| -(alpha.ln_1p_neg() / remaining(i)).exp_m1())
                .collect();
            let raw: Vec<f64> = (0..m)
                .map(|i| -(remaining(i) * p[i].ln_1p_neg()).exp_m1())
                .collect();
            (step_down(p, &thresholds), running_max(&raw))
        }
        MultipleTestMethod::Holm => {
            let thresholds: Vec<f64> = (0..m).map(|i| alpha / remaining(i)).collect();
            let raw: Vec<f64> = (0..m).map(|i| p[i] * remaining(i)).collect();
            (step_down(p, &thresholds), running_max(&raw))
        }
        MultipleTestMethod::SimesHochberg => {
            let thresholds: Vec<f64> = (0..m).map(|i| alpha / remaining(i)).collect();
            let raw: Vec<f64> = (0..m).map(|i| p[i] * remaining(i)).collect();
            (step_up(p, &thresholds), reverse_running_min(&raw))
        }
        MultipleTestMethod::Hommel => {
            let corrected = hommel(p);
            (corrected.iter().map(|&v| v <= alpha).collect(), corrected)
        }
        MultipleTestMethod::FdrBh | MultipleTestMethod::FdrBy => {
            let dependence = if method == MultipleTestMethod::FdrBy {
                (1..=m).map(|k| 1.0 / k as f64).sum::<f64>()
            } else {
                1.0
            };
            let ecdf: Vec<f64> = (0..m)
                .map(|i| (i + 1) as f64 / mf / dependence)
                .collect();
            let thresholds: Vec<f64> = ecdf.iter().map(|e| e * alpha).collect();
            let raw: Vec<f64> = p.iter().zip(&ecdf).map(|(v, e)| v / e).collect();
            (step_up(p, &thresholds), reverse_running_min(&raw))
        }
    }
}

/// Reject ranks before the first p-value above its threshold
fn step_down(p: &[f64], thresholds: &[f64]) -> Vec<bool> {
    let stop = p
        .iter()
        .zip(thresholds)
        .position(|(v, t)| v > t)
        .unwrap_or(p.len());
    (0..p.len()).map(|i| i < stop).collect()
}

/// Reject ranks up to the last p-value within its threshold
fn step_up(p: &[f64], thresholds: &[f64]) -> Vec<bool> {
    let last = p.iter().zip(thresholds).rposition(|(v, t)| v <= t);
    (0..p.len()).map(|i| last.is_some_and(|k| i <= k)).collect()
}

fn running_max(values: &[f64]) -> Vec<f64> {
    let mut current = f64::NEG_INFINITY;
    values
        .iter()
        .map(|&v| {
            current = current.max(v);
            current
        })
        .collect()
}

fn reverse_running_min(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    for i in (0..out.len().saturating_sub(1)).rev() {
        out[i] = out[i].min(out[i + 1]);
    }
    out
}

fn hommel(p: &[f64]) -> Vec<f64> {
    let m = p.len();
    let mut adjusted = p.to_vec();
    for k in (2..=m).rev() {
        let kf = k as f64;
        let start = m - k;
        let cim = p[start..]
            .iter()
            .enumerate()
            .map(|(j, &v)| kf * v / (j + 1) as f64)
            .fold(f64::INFINITY, f64::min);
        for a in adjusted[start..].iter_mut() {
            *a = a.max(cim);
        }
        for i in 0..start {
            adjusted[i] = adjusted[i].max((kf * p[i]).min(cim));
        }
    }
    adjusted
}

/// `ln(1 - x)` without cancellation for small `x`
trait Ln1pNeg {
    fn ln_1p_neg(self) -> f64;
}

impl Ln1pNeg for f64 {
    fn ln_1p_neg(self) -> f64 {
        (-self).ln_1p()
    }
}
