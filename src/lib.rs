//! Autocorrelation-aware statistics for Earth System Model output
//!
//! Re-exports the workspace crates:
//!
//! - [`esm_core`]: the [`Series`](esm_core::Series) type, errors, effective
//!   sample size
//! - [`esm_trend`]: linear and polynomial trends, trend significance
//! - [`esm_correlation`]: correlation significance and lead/lag correlation
//! - [`esm_spatial`]: area-weighted averages and per-cell maps
//! - [`esm_inference`]: multiple-testing correction and t-tests from summaries
//!
//! # Example
//!
//! ```rust
//! use esm_stats::prelude::*;
//!
//! let years: Vec<f64> = (1990..2010).map(f64::from).collect();
//! let sst: Vec<f64> = years
//!     .iter()
//!     .enumerate()
//!     .map(|(i, _)| 18.0 + 0.02 * i as f64 + 0.1 * (i as f64 * 1.3).sin())
//!     .collect();
//! let series = Series::new(sst, years).unwrap();
//!
//! let trend = trend_significance(&series).unwrap();
//! assert!(trend.estimate > 0.0);
//!
//! let anomalies = detrend(&series).unwrap();
//! assert_eq!(anomalies.len(), series.len());
//! ```

pub use esm_core;
pub use esm_correlation;
pub use esm_inference;
pub use esm_spatial;
pub use esm_trend;

/// The commonly used types and operations
pub mod prelude {
    pub use esm_core::{
        effective_sample_size, is_missing, lag1_autocorrelation, Error, EstimateType, Result,
        Series, SignificanceResult, MISSING,
    };
    pub use esm_correlation::{
        correlation_significance, correlation_significance_with, lead_correlation,
        CorrelationParameters, EssCombination,
    };
    pub use esm_inference::{
        multipletests, ttest_ind_from_stats, MultipleTestMethod, SampleSummary,
    };
    pub use esm_spatial::{
        area_weighted_average, correlation_map, detrend_map, latitude_weights, trend_map,
    };
    pub use esm_trend::{
        detrend, linear_trend, polyfit, rm_poly, trend_significance, trend_significance_with,
        TrendParameters, TrendResult,
    };
}
