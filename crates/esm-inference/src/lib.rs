//! Field-level inference for model output
//!
//! - [`multipletests`]: family-wise error and false discovery rate control
//!   for maps of p-values, with missing cells masked
//! - [`ttest_ind_from_stats`]: two-sample t-tests from means, standard
//!   deviations and sample sizes
//!
//! # Example
//!
//! ```rust
//! use esm_inference::{multipletests, MultipleTestMethod};
//!
//! let p_values = [0.001, 0.2, f64::NAN, 0.011];
//! let method: MultipleTestMethod = "fdr_bh".parse().unwrap();
//! let result = multipletests(&p_values, 0.05, method).unwrap();
//!
//! assert_eq!(result.reject[2], None);
//! assert_eq!(result.rejected_count(), 2);
//! ```

pub mod multiple;
pub mod ttest;

pub use multiple::{multipletests, MultipleTestMethod, MultipleTestResult, MULTIPLE_TESTS};
pub use ttest::{ttest_ind_from_stats, ttest_ind_from_stats_batch, SampleSummary, TTestResult};
