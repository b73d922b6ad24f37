//! Correlation significance for serially dependent series
//!
//! Pearson correlations between climate time series look more significant
//! than they are when consecutive samples are autocorrelated. This crate
//! tests correlations against a Student's t distribution whose degrees of
//! freedom come from an effective sample size, combining the two series'
//! lag-1 autocorrelations by a configurable [`EssCombination`] rule.
//!
//! # Example
//!
//! ```rust
//! use esm_correlation::{correlation_significance, lead_correlation, CorrelationParameters};
//! use esm_core::Series;
//!
//! let sst = Series::from_values(vec![0.1, 0.5, 0.2, 0.9, 0.4, 1.0, 0.6, 1.2]);
//! let co2_flux = Series::from_values(vec![0.3, 0.6, 0.1, 1.1, 0.5, 0.9, 0.8, 1.3]);
//!
//! let result = correlation_significance(&sst, &co2_flux).unwrap();
//! assert!(result.estimate > 0.0);
//! assert!(result.p_value >= 0.0 && result.p_value <= 1.0);
//!
//! // sst leading the flux by one step
//! let lagged = lead_correlation(&sst, &co2_flux, 1, &CorrelationParameters::default()).unwrap();
//! assert_eq!(lagged.sample_size, 7);
//! ```

pub mod params;
pub mod significance;

pub use params::{CorrelationParameters, EssCombination};
pub use significance::{
    correlation_significance, correlation_significance_with, lead_correlation, MIN_OVERLAP,
};

// Shared serial-dependence helpers live in esm-core
pub use esm_core::{effective_sample_size, lag1_autocorrelation};
