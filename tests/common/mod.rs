//! Shared utilities for integration tests

use esm_stats::prelude::Series;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

pub const EPSILON: f64 = 1e-10;

/// AR(1) red noise `x[t] = phi * x[t-1] + e[t]` with unit innovations
pub fn red_noise(len: usize, phi: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let innovations = Normal::new(0.0, 1.0).unwrap();
    let mut previous = 0.0;
    // Burn-in so the start is drawn from the stationary distribution
    (0..len + 100)
        .map(|_| {
            previous = phi * previous + innovations.sample(&mut rng);
            previous
        })
        .skip(100)
        .collect()
}

/// Annual series starting in 1958
pub fn annual(values: Vec<f64>) -> Series {
    let years = (0..values.len()).map(|i| 1958.0 + i as f64).collect();
    Series::new(values, years).unwrap()
}
