//! Polynomial fitting and removal
//!
//! Fits are solved on a centred and scaled abscissa so that the normal
//! equations stay well conditioned for large coordinates (e.g. years or
//! seconds since an epoch). Raw coefficients are derived from the scaled
//! solution for reporting; fitted values are evaluated in the scaled form.

use esm_core::pairwise::mean;
use esm_core::{is_missing, Error, Result, Series, MISSING};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Singular value cutoff for the rank-deficient fallback
const SVD_EPSILON: f64 = 1e-12;

/// Least-squares polynomial in a centred and scaled abscissa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ScaledPolynomial {
    coefficients: Vec<f64>,
    center: f64,
    scale: f64,
}

impl ScaledPolynomial {
    fn fit(x: &[f64], y: &[f64], order: usize) -> Result<Self> {
        let center = mean(x);
        let spread = x.iter().map(|v| (v - center).abs()).fold(0.0, f64::max);
        let scale = if spread > 0.0 { spread } else { 1.0 };
        let u: Vec<f64> = x.iter().map(|v| (v - center) / scale).collect();

        let cols = order + 1;
        let design = DMatrix::from_fn(u.len(), cols, |i, k| u[i].powi(k as i32));
        let y_vec = DVector::from_column_slice(y);

        let xt = design.transpose();
        let xtx = &xt * &design;
        let xty = &xt * &y_vec;

        let coefficients = match xtx.clone().cholesky() {
            Some(chol) => chol.solve(&xty),
            None => {
                debug!(order, "normal equations not positive definite, using SVD");
                xtx.svd(true, true)
                    .solve(&xty, SVD_EPSILON)
                    .map_err(|e| {
                        Error::Computation(format!("Failed to solve polynomial system: {e}"))
                    })?
            }
        };

        Ok(Self {
            coefficients: coefficients.as_slice().to_vec(),
            center,
            scale,
        })
    }

    fn evaluate(&self, x: f64) -> f64 {
        let u = (x - self.center) / self.scale;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * u + c)
    }

    /// Expand `sum c_k ((x - m) / s)^k` into powers of `x`
    fn raw_coefficients(&self) -> Vec<f64> {
        let n = self.coefficients.len();
        let mut raw = vec![0.0; n];
        for (k, &c) in self.coefficients.iter().enumerate() {
            let factor = c / self.scale.powi(k as i32);
            let mut binomial = 1.0;
            for j in (0..=k).rev() {
                // binomial = C(k, j), walking j downward from k
                raw[j] += factor * binomial * (-self.center).powi((k - j) as i32);
                if j > 0 {
                    binomial = binomial * j as f64 / (k - j + 1) as f64;
                }
            }
        }
        raw
    }
}

/// A least-squares polynomial fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialFit {
    /// Coefficients in ascending powers of the raw abscissa
    pub coefficients: Vec<f64>,
    /// Polynomial order
    pub order: usize,
    /// Valid samples used in the fit
    pub sample_size: usize,
    fitted: Vec<f64>,
    scaled: ScaledPolynomial,
}

impl PolynomialFit {
    /// Fitted values, one per input sample
    ///
    /// Missing where the abscissa sample is missing.
    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    /// Evaluate the polynomial at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        self.scaled.evaluate(x)
    }
}

fn validate_order(order: usize, valid: usize) -> Result<()> {
    if order == 0 {
        return Err(Error::InvalidParameter(
            "Polynomial order must be at least 1".to_string(),
        ));
    }
    if valid < order + 1 {
        return Err(Error::InsufficientData {
            expected: order + 1,
            actual: valid,
        });
    }
    Ok(())
}

/// Fit a polynomial of `order` against the series coordinate
#[instrument(level = "debug", skip(series), fields(len = series.len()))]
pub fn polyfit(series: &Series, order: usize) -> Result<PolynomialFit> {
    let (x, y): (Vec<f64>, Vec<f64>) = series.valid_points().unzip();
    validate_order(order, x.len())?;

    let scaled = ScaledPolynomial::fit(&x, &y, order)?;
    let fitted = series
        .coordinate()
        .iter()
        .map(|&c| scaled.evaluate(c))
        .collect();

    Ok(PolynomialFit {
        coefficients: scaled.raw_coefficients(),
        order,
        sample_size: x.len(),
        fitted,
        scaled,
    })
}

/// Remove a polynomial of `order` fitted against the coordinate
pub fn rm_poly(series: &Series, order: usize) -> Result<Series> {
    let fit = polyfit(series, order)?;
    residual(series, fit.fitted())
}

/// Fit `y` as a polynomial of the values of `x`
///
/// Both series must share a coordinate; only samples valid in both enter
/// the fit.
#[instrument(level = "debug", skip(x, y), fields(len = y.len()))]
pub fn polyfit_against(x: &Series, y: &Series, order: usize) -> Result<PolynomialFit> {
    x.ensure_aligned(y, "polynomial fit")?;
    let (xs, ys) = esm_core::valid_pairs(x.values(), y.values());
    validate_order(order, xs.len())?;

    let scaled = ScaledPolynomial::fit(&xs, &ys, order)?;
    let fitted = x
        .values()
        .iter()
        .map(|&v| if is_missing(v) { MISSING } else { scaled.evaluate(v) })
        .collect();

    Ok(PolynomialFit {
        coefficients: scaled.raw_coefficients(),
        order,
        sample_size: xs.len(),
        fitted,
        scaled,
    })
}

/// Remove from `y` a polynomial of `order` in the values of `x`
pub fn rm_poly_against(x: &Series, y: &Series, order: usize) -> Result<Series> {
    let fit = polyfit_against(x, y, order)?;
    residual(y, fit.fitted())
}

fn residual(series: &Series, fitted: &[f64]) -> Result<Series> {
    let values = series
        .values()
        .iter()
        .zip(fitted)
        .map(|(&v, &f)| if is_missing(v) || is_missing(f) { MISSING } else { v - f })
        .collect();
    series.with_values(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::detrend;
    use approx::assert_abs_diff_eq;

    fn quadratic_on_years() -> Series {
        let years: Vec<f64> = (0..30).map(|i| 1980.0 + i as f64).collect();
        let values = years
            .iter()
            .map(|y| {
                let t = y - 1980.0;
                2.0 - 0.3 * t + 0.05 * t * t + 0.1 * (t * 1.3).sin()
            })
            .collect();
        Series::new(values, years).unwrap()
    }

    #[test]
    fn test_recovers_exact_quadratic() {
        let x: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let values = x.iter().map(|t| 1.0 + 2.0 * t - 0.5 * t * t).collect();
        let s = Series::new(values, x).unwrap();

        let fit = polyfit(&s, 2).unwrap();
        assert_eq!(fit.coefficients.len(), 3);
        assert_abs_diff_eq!(fit.coefficients[0], 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(fit.coefficients[1], 2.0, epsilon = 1e-8);
        assert_abs_diff_eq!(fit.coefficients[2], -0.5, epsilon = 1e-8);

        for r in rm_poly(&s, 2).unwrap().values() {
            assert_abs_diff_eq!(*r, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_fit_plus_residual_reconstructs() {
        let s = quadratic_on_years();
        for order in 1..=4 {
            let fit = polyfit(&s, order).unwrap();
            let detrended = rm_poly(&s, order).unwrap();
            for ((d, f), v) in detrended.values().iter().zip(fit.fitted()).zip(s.values()) {
                assert_abs_diff_eq!(d + f, *v, epsilon = 1e-12);
            }
            let changed = detrended
                .values()
                .iter()
                .zip(s.values())
                .all(|(d, v)| d != v);
            assert!(changed, "order {order} left samples untouched");
        }
    }

    #[test]
    fn test_order_one_matches_detrend() {
        let s = quadratic_on_years();
        let a = rm_poly(&s, 1).unwrap();
        let b = detrend(&s).unwrap();
        for (x, y) in a.values().iter().zip(b.values()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_evaluate_matches_raw_coefficients() {
        let s = quadratic_on_years();
        let fit = polyfit(&s, 3).unwrap();
        let x = 1995.5;
        let horner = fit.coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c);
        assert_abs_diff_eq!(fit.evaluate(x), horner, epsilon = 1e-4);
    }

    #[test]
    fn test_missing_samples() {
        let mut values: Vec<f64> = (0..10).map(|i| (i * i) as f64).collect();
        values[3] = f64::NAN;
        let s = Series::from_values(values);
        let fit = polyfit(&s, 2).unwrap();
        assert_eq!(fit.sample_size, 9);
        // Fitted values are defined everywhere on the coordinate
        assert_abs_diff_eq!(fit.fitted()[3], 9.0, epsilon = 1e-8);
        assert!(rm_poly(&s, 2).unwrap().values()[3].is_nan());
    }

    #[test]
    fn test_order_validation() {
        let s = Series::from_values(vec![1.0, 2.0, 3.0]);
        assert!(matches!(polyfit(&s, 0), Err(Error::InvalidParameter(_))));
        assert!(matches!(
            polyfit(&s, 3),
            Err(Error::InsufficientData { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_fit_against_other_series() {
        let x = Series::from_values(vec![0.5, 1.0, 1.5, f64::NAN, 2.5, 3.0]);
        let y_values = x
            .values()
            .iter()
            .map(|v| if v.is_nan() { 4.0 } else { 1.0 + 3.0 * v })
            .collect();
        let y = Series::from_values(y_values);

        let fit = polyfit_against(&x, &y, 1).unwrap();
        assert_eq!(fit.sample_size, 5);
        assert_abs_diff_eq!(fit.coefficients[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fit.coefficients[1], 3.0, epsilon = 1e-9);

        let residual = rm_poly_against(&x, &y, 1).unwrap();
        assert!(residual.values()[3].is_nan());
        assert_abs_diff_eq!(residual.values()[0], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fit_against_requires_alignment() {
        let x = Series::from_values(vec![1.0, 2.0, 3.0]);
        let y = Series::from_values(vec![1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(polyfit_against(&x, &y, 1), Err(Error::InvalidInput(_))));
    }
}
