//! Spatial aggregation and grid-wide statistics
//!
//! Gridded model output is handled as a set of cell series sharing one
//! time coordinate:
//!
//! - [`area_weighted_average`] collapses cells into a regional mean,
//!   renormalising weights where cells are missing
//! - [`latitude_weights`] gives `cos(latitude)` area weights
//! - [`trend_map`], [`correlation_map`] and [`detrend_map`] apply the
//!   per-series statistics to every cell (in parallel with the `parallel`
//!   feature)
//!
//! # Example
//!
//! ```rust
//! use esm_spatial::{area_weighted_average, latitude_weights};
//! use esm_core::Series;
//!
//! let tropics = Series::from_values(vec![26.0, 26.4, 26.1]);
//! let subpolar = Series::from_values(vec![8.0, 8.2, f64::NAN]);
//! let weights = latitude_weights(&[5.0, 55.0]).unwrap();
//!
//! let regional = area_weighted_average(&[tropics, subpolar], &weights).unwrap();
//! // Only the tropical cell is valid at the last step
//! assert!((regional.values()[2] - 26.1).abs() < 1e-12);
//! ```

pub mod aggregate;
pub mod map;
pub mod weights;

pub use aggregate::area_weighted_average;
pub use map::{correlation_map, detrend_map, trend_map};
pub use weights::latitude_weights;
