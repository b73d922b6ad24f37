//! Property-based tests for trends, effective sample size and p-values

use esm_stats::esm_core::correlation_p_value;
use esm_stats::prelude::*;
use proptest::prelude::*;

fn finite_values(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0..100.0f64, len)
}

proptest! {
    // A noiseless line is recovered exactly
    #[test]
    fn prop_trend_reconstruction(
        intercept in -100.0..100.0f64,
        slope in -10.0..10.0f64,
        len in 2usize..200,
        start in 1850.0..2100.0f64,
    ) {
        let coordinate: Vec<f64> = (0..len).map(|i| start + i as f64).collect();
        let values: Vec<f64> = coordinate.iter().map(|c| intercept + slope * (c - start)).collect();
        let series = Series::new(values, coordinate).unwrap();

        let trend = linear_trend(&series).unwrap();
        prop_assert!(
            (trend.slope - slope).abs() <= 1e-9 * slope.abs().max(1.0),
            "slope {} vs {}", trend.slope, slope
        );
        for (fitted, value) in trend.fitted_line().iter().zip(series.values()) {
            prop_assert!((fitted - value).abs() <= 1e-9 * value.abs().max(1.0));
        }
    }

    // Fitted line plus residual gives back any series, gaps included
    #[test]
    fn prop_trend_reconstruction_noisy(
        values in finite_values(2..150),
        start in 1850.0..2100.0f64,
        gap_every in 2usize..7,
    ) {
        let coordinate: Vec<f64> = (0..values.len()).map(|i| start + i as f64).collect();
        let mut gappy: Vec<f64> = values
            .iter()
            .enumerate()
            .map(|(i, v)| if i % gap_every == gap_every - 1 { MISSING } else { *v })
            .collect();
        // Keep the two samples a line needs
        gappy[0] = values[0];
        gappy[1] = values[1];
        let series = Series::new(gappy, coordinate).unwrap();

        let trend = linear_trend(&series).unwrap();
        let fitted = trend.fitted_line();
        for (i, value) in series.values().iter().enumerate() {
            let residual = trend.residual.values()[i];
            if is_missing(*value) {
                prop_assert!(is_missing(residual));
                continue;
            }
            let rebuilt = fitted[i] + residual;
            prop_assert!(
                (rebuilt - value).abs() <= 1e-9 * value.abs().max(1.0),
                "index {}: {} rebuilt as {}", i, value, rebuilt
            );
        }
    }

    // Detrended series have no trend left
    #[test]
    fn prop_detrend_removes_slope(values in finite_values(3..120)) {
        let series = Series::from_values(values);
        let anomalies = detrend(&series).unwrap();
        let residual_trend = linear_trend(&anomalies).unwrap();
        prop_assert!(residual_trend.slope.abs() < 1e-9, "slope {}", residual_trend.slope);
    }

    // Missing samples do not break the detrend property
    #[test]
    fn prop_detrend_with_gaps(
        values in finite_values(6..80),
        gap_every in 2usize..5,
    ) {
        let gappy: Vec<f64> = values
            .iter()
            .enumerate()
            .map(|(i, v)| if i % gap_every == 1 { MISSING } else { *v })
            .collect();
        let series = Series::from_values(gappy);
        let anomalies = detrend(&series).unwrap();
        prop_assert_eq!(anomalies.valid_count(), series.valid_count());
        prop_assert!(linear_trend(&anomalies).unwrap().slope.abs() < 1e-9);
    }

    #[test]
    fn prop_effective_sample_size_bounds(n in 2usize..5000, r1 in -0.999..0.999f64) {
        let n_eff = effective_sample_size(n, r1).unwrap();
        prop_assert!(n_eff >= 2.0);
        prop_assert!(n_eff <= n as f64);
    }

    #[test]
    fn prop_p_value_decreasing_in_r(
        r in 0.0..0.88f64,
        step in 0.01..0.1f64,
        dof in 1.0..30.0f64,
        negative in any::<bool>(),
    ) {
        let sign = if negative { -1.0 } else { 1.0 };
        let weaker = correlation_p_value(sign * r, dof).unwrap();
        let stronger = correlation_p_value(sign * (r + step), dof).unwrap();
        prop_assert!(stronger < weaker, "p({}) = {} not below p({}) = {}", r + step, stronger, r, weaker);
        prop_assert_eq!(correlation_p_value(0.0, dof).unwrap(), 1.0);
    }

    // Removing a fitted polynomial leaves values minus fit
    #[test]
    fn prop_polynomial_reconstruction(values in finite_values(8..60), order in 1usize..4) {
        let series = Series::from_values(values);
        let fit = polyfit(&series, order).unwrap();
        let residual = rm_poly(&series, order).unwrap();
        for ((f, r), v) in fit.fitted().iter().zip(residual.values()).zip(series.values()) {
            prop_assert!((f + r - v).abs() < 1e-8);
        }
    }

    #[test]
    fn prop_first_order_polynomial_is_detrend(values in finite_values(3..60)) {
        let series = Series::from_values(values);
        let by_poly = rm_poly(&series, 1).unwrap();
        let by_trend = detrend(&series).unwrap();
        for (a, b) in by_poly.values().iter().zip(by_trend.values()) {
            prop_assert!((a - b).abs() < 1e-8);
        }
    }
}
