//! Trend fitting and removal for climate time series
//!
//! - [`linear_trend`] / [`detrend`]: ordinary least squares against the
//!   series coordinate, skipping missing samples
//! - [`trend_significance`]: t-test of the slope with the sample size
//!   reduced for serially correlated residuals
//! - [`polyfit`] / [`rm_poly`]: higher-order polynomials, against the
//!   coordinate or against another series' values
//!
//! # Example
//!
//! ```rust
//! use esm_trend::{detrend, linear_trend};
//! use esm_core::Series;
//!
//! let series = Series::new(
//!     vec![14.1, 14.3, 14.2, 14.6, 14.8],
//!     vec![2000.0, 2001.0, 2002.0, 2003.0, 2004.0],
//! ).unwrap();
//!
//! let trend = linear_trend(&series).unwrap();
//! assert!(trend.slope > 0.0);
//!
//! let anomalies = detrend(&series).unwrap();
//! assert_eq!(anomalies.len(), series.len());
//! ```

pub mod linear;
pub mod polynomial;
pub mod significance;

pub use linear::{detrend, linear_trend, TrendResult, MIN_TREND_SAMPLES};
pub use polynomial::{polyfit, polyfit_against, rm_poly, rm_poly_against, PolynomialFit};
pub use significance::{
    trend_significance, trend_significance_with, TrendParameters, MIN_TREND_TEST_SAMPLES,
};
