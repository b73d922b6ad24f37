//! Grid-cell area weights

use esm_core::{Error, Result};

/// Relative area weights `cos(latitude)` for a regular latitude grid
///
/// Latitudes are in degrees and must lie in `[-90, 90]`. Polar rows get a
/// weight of zero.
pub fn latitude_weights(latitudes_deg: &[f64]) -> Result<Vec<f64>> {
    latitudes_deg
        .iter()
        .map(|&lat| {
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                return Err(Error::InvalidParameter(format!(
                    "Latitude {lat} must be in [-90, 90] degrees"
                )));
            }
            Ok(lat.to_radians().cos().max(0.0))
        })
        .collect()
}
