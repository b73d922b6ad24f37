//! Core types for autocorrelation-aware series statistics
//!
//! This crate holds the pieces shared by every esm-stats crate:
//!
//! - [`Series`]: values on a strictly increasing coordinate, with `NaN`
//!   marking missing samples and an optional per-sample weight
//! - [`Error`] / [`Result`]: the error taxonomy
//! - pairwise missing-value handling and Pearson correlation
//! - lag-1 autocorrelation and the effective sample size correction
//! - [`SignificanceResult`] and Student's t p-values
//!
//! # Example
//!
//! ```rust
//! use esm_core::{effective_sample_size, lag1_autocorrelation, Series};
//!
//! let series = Series::from_values(vec![0.1, 0.4, 0.3, 0.8, 0.7, 1.1, 0.9, 1.4]);
//! let r1 = lag1_autocorrelation(&series);
//! let n_eff = effective_sample_size(series.valid_count(), r1).unwrap();
//! assert!(n_eff >= 2.0 && n_eff <= 8.0);
//! ```

pub mod autocorrelation;
pub mod error;
pub mod pairwise;
pub mod series;
pub mod significance;

pub use autocorrelation::{
    bound_autocorrelation, effective_sample_size, lag1_autocorrelation,
    lag1_autocorrelation_values, MIN_AUTOCORRELATION_PAIRS,
};
pub use error::{Error, Result};
pub use pairwise::{pearson, valid_pairs};
pub use series::{is_missing, missing_values, Series, MISSING};
pub use significance::{
    correlation_p_value, students_t_two_tailed, EstimateType, SignificanceResult,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
