//! Configuration for correlation significance tests

use esm_core::{effective_sample_size, Result};
use serde::{Deserialize, Serialize};

/// How two series' autocorrelation corrections combine into one sample size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EssCombination {
    /// `sqrt(n_eff_a * n_eff_b)`
    #[default]
    GeometricMean,
    /// `min(n_eff_a, n_eff_b)`, the more conservative choice
    Minimum,
    /// `n * (1 - r1a * r1b) / (1 + r1a * r1b)` (Bretherton et al., 1999)
    AutocorrelationProduct,
}

impl EssCombination {
    /// Joint effective sample size of `n` pairs
    ///
    /// The result lies in `[2, n]` for every rule.
    pub fn combine(&self, n: usize, r1_a: f64, r1_b: f64) -> Result<f64> {
        match self {
            Self::GeometricMean => {
                let a = effective_sample_size(n, r1_a)?;
                let b = effective_sample_size(n, r1_b)?;
                Ok((a * b).sqrt())
            }
            Self::Minimum => {
                let a = effective_sample_size(n, r1_a)?;
                let b = effective_sample_size(n, r1_b)?;
                Ok(a.min(b))
            }
            Self::AutocorrelationProduct => effective_sample_size(n, r1_a * r1_b),
        }
    }
}

/// Parameters for correlation significance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationParameters {
    /// Reduce the sample size for serial dependence
    pub autocorrelation_correction: bool,
    /// Rule for the joint effective sample size
    pub ess_combination: EssCombination,
}

impl Default for CorrelationParameters {
    fn default() -> Self {
        Self {
            autocorrelation_correction: true,
            ess_combination: EssCombination::default(),
        }
    }
}

impl CorrelationParameters {
    /// Plain Pearson test on the raw pair count
    pub fn uncorrected() -> Self {
        Self {
            autocorrelation_correction: false,
            ..Self::default()
        }
    }

    pub fn with_combination(mut self, combination: EssCombination) -> Self {
        self.ess_combination = combination;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_combinations() {
        let n = 100;
        let (ra, rb) = (0.5, 0.2);
        let a = effective_sample_size(n, ra).unwrap();
        let b = effective_sample_size(n, rb).unwrap();

        assert_abs_diff_eq!(
            EssCombination::GeometricMean.combine(n, ra, rb).unwrap(),
            (a * b).sqrt(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            EssCombination::Minimum.combine(n, ra, rb).unwrap(),
            a,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            EssCombination::AutocorrelationProduct
                .combine(n, ra, rb)
                .unwrap(),
            100.0 * 0.9 / 1.1,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_combinations_stay_bounded() {
        for rule in [
            EssCombination::GeometricMean,
            EssCombination::Minimum,
            EssCombination::AutocorrelationProduct,
        ] {
            for (ra, rb) in [(0.99, 0.99), (-0.9, 0.9), (-0.9, -0.9), (0.0, 0.0)] {
                let n_eff = rule.combine(20, ra, rb).unwrap();
                assert!((2.0..=20.0).contains(&n_eff), "{rule:?} gave {n_eff}");
            }
        }
    }

    #[test]
    fn test_default_parameters() {
        let params = CorrelationParameters::default();
        assert!(params.autocorrelation_correction);
        assert_eq!(params.ess_combination, EssCombination::GeometricMean);

        let params = CorrelationParameters::uncorrected().with_combination(EssCombination::Minimum);
        assert!(!params.autocorrelation_correction);
        assert_eq!(params.ess_combination, EssCombination::Minimum);
    }
}
