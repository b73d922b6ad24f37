//! Spurious correlation between independent red-noise series
//!
//! Two independent AR(1) processes with strong persistence routinely show
//! "significant" Pearson correlations when every sample is counted as
//! independent. Run with `RUST_LOG=debug` to see the estimated lag-1
//! autocorrelations and effective sample sizes.

use esm_core::Series;
use esm_correlation::{
    correlation_significance_with, CorrelationParameters, EssCombination,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

fn red_noise(rng: &mut ChaCha8Rng, n: usize, phi: f64) -> Vec<f64> {
    let mut value = 0.0;
    (0..n)
        .map(|_| {
            value = phi * value + rng.gen_range(-1.0..1.0);
            value
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let trials = 200;
    let alpha = 0.05;

    let rules = [
        ("uncorrected", CorrelationParameters::uncorrected()),
        ("geometric mean", CorrelationParameters::default()),
        (
            "minimum",
            CorrelationParameters::default().with_combination(EssCombination::Minimum),
        ),
        (
            "autocorrelation product",
            CorrelationParameters::default()
                .with_combination(EssCombination::AutocorrelationProduct),
        ),
    ];
    let mut false_positives = vec![0usize; rules.len()];

    for _ in 0..trials {
        let a = Series::from_values(red_noise(&mut rng, 120, 0.9));
        let b = Series::from_values(red_noise(&mut rng, 120, 0.9));

        for (count, (_, params)) in false_positives.iter_mut().zip(rules.iter()) {
            let result = correlation_significance_with(&a, &b, params)?;
            if result.is_significant(alpha) {
                *count += 1;
            }
        }
    }

    println!("False positive rate at alpha = {alpha} over {trials} trials:");
    for ((name, _), count) in rules.iter().zip(false_positives) {
        println!("  {name:<24} {:.3}", count as f64 / trials as f64);
    }

    Ok(())
}
