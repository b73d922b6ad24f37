//! Pairwise missing-value handling and moment helpers

use crate::series::is_missing;
use crate::{Error, Result};

/// Collect the index-aligned pairs where both inputs are valid
///
/// Pairs are taken up to the shorter of the two slices.
pub fn valid_pairs(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y.iter())
        .filter(|(a, b)| !is_missing(**a) && !is_missing(**b))
        .map(|(&a, &b)| (a, b))
        .unzip()
}

/// Arithmetic mean of a non-empty slice
pub fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

/// Centered sums `(Sxy, Sxx, Syy)` of two equal-length slices
pub fn centered_sums(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    (sxy, sxx, syy)
}

/// Pearson correlation coefficient of two fully valid slices
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "correlation"));
    }

    if x.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: x.len(),
        });
    }

    let (sxy, sxx, syy) = centered_sums(x, y);
    let denominator = (sxx * syy).sqrt();

    if denominator == 0.0 {
        return Err(Error::zero_variance("correlation"));
    }

    Ok((sxy / denominator).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_valid_pairs_excludes_pairwise() {
        let x = vec![1.0, f64::NAN, 3.0, 4.0];
        let y = vec![2.0, 2.0, f64::NAN, 8.0];
        let (a, b) = valid_pairs(&x, &y);
        assert_eq!(a, vec![1.0, 4.0]);
        assert_eq!(b, vec![2.0, 8.0]);
    }

    #[test]
    fn test_pearson_basic() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        assert_abs_diff_eq!(pearson(&x, &y).unwrap(), 1.0, epsilon = 1e-12);

        let y = vec![10.0, 8.0, 6.0, 4.0, 2.0];
        assert_abs_diff_eq!(pearson(&x, &y).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_zero_variance() {
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![5.0, 5.0, 5.0];
        assert!(matches!(pearson(&x, &y), Err(Error::Computation(_))));
    }

    #[test]
    fn test_pearson_too_short() {
        assert!(matches!(
            pearson(&[1.0], &[2.0]),
            Err(Error::InsufficientData { expected: 2, actual: 1 })
        ));
    }
}
