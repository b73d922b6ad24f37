//! Coordinate-aligned numeric series with missing values

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Marker for a missing sample
pub const MISSING: f64 = f64::NAN;

/// Whether a sample counts as missing
///
/// Any non-finite value is treated as missing.
#[inline]
pub fn is_missing(value: f64) -> bool {
    !value.is_finite()
}

/// Serde adapter writing missing samples as `null`
///
/// JSON has no `NaN`, so `Vec<f64>` fields holding [`MISSING`] go through
/// `Option<f64>`: missing samples serialize as `null` and `null` reads back
/// as [`MISSING`]. Use with `#[serde(with = "esm_core::missing_values")]`.
pub mod missing_values {
    use super::{is_missing, MISSING};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let optional: Vec<Option<f64>> = values
            .iter()
            .map(|&v| if is_missing(v) { None } else { Some(v) })
            .collect();
        optional.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let optional = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(optional.into_iter().map(|v| v.unwrap_or(MISSING)).collect())
    }
}

/// An ordered sequence of samples on a coordinate
///
/// The coordinate is finite and strictly increasing. Values may contain
/// missing samples (`NaN`); every operation excludes them pairwise rather
/// than discarding the whole series. The optional weight has one
/// non-negative entry per sample and is carried through derived series.
///
/// Deserialization goes through [`Series::new`] and [`Series::with_weight`],
/// so a stored series is validated like a constructed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct Series {
    #[serde(serialize_with = "missing_values::serialize")]
    values: Vec<f64>,
    coordinate: Vec<f64>,
    weight: Option<Vec<f64>>,
}

/// Unvalidated wire form of [`Series`]
#[derive(Deserialize)]
struct RawSeries {
    #[serde(with = "missing_values")]
    values: Vec<f64>,
    coordinate: Vec<f64>,
    #[serde(default)]
    weight: Option<Vec<f64>>,
}

impl TryFrom<RawSeries> for Series {
    type Error = Error;

    fn try_from(raw: RawSeries) -> Result<Self> {
        let series = Series::new(raw.values, raw.coordinate)?;
        match raw.weight {
            Some(weight) => series.with_weight(weight),
            None => Ok(series),
        }
    }
}

impl Series {
    /// Create a series from values and their coordinate
    pub fn new(values: Vec<f64>, coordinate: Vec<f64>) -> Result<Self> {
        if values.len() != coordinate.len() {
            return Err(Error::size_mismatch(
                values.len(),
                coordinate.len(),
                "series coordinate",
            ));
        }
        if coordinate.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidInput(
                "Coordinate contains NaN or infinite values".to_string(),
            ));
        }
        if coordinate.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::InvalidInput(
                "Coordinate must be strictly increasing".to_string(),
            ));
        }

        Ok(Self {
            values,
            coordinate,
            weight: None,
        })
    }

    /// Create a series on the integer index `0, 1, 2, ...`
    pub fn from_values(values: Vec<f64>) -> Self {
        let coordinate = (0..values.len()).map(|i| i as f64).collect();
        Self {
            values,
            coordinate,
            weight: None,
        }
    }

    /// Attach per-sample weights
    pub fn with_weight(mut self, weight: Vec<f64>) -> Result<Self> {
        if weight.len() != self.values.len() {
            return Err(Error::size_mismatch(
                self.values.len(),
                weight.len(),
                "series weight",
            ));
        }
        if let Some(w) = weight.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Weights must be finite and non-negative, got {w}"
            )));
        }
        self.weight = Some(weight);
        Ok(self)
    }

    /// Same coordinate and weight, new values
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.values.len() {
            return Err(Error::size_mismatch(
                self.values.len(),
                values.len(),
                "replacement values",
            ));
        }
        Ok(Self {
            values,
            coordinate: self.coordinate.clone(),
            weight: self.weight.clone(),
        })
    }

    /// Sub-series over an index range
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self {
            values: self.values[range.clone()].to_vec(),
            coordinate: self.coordinate[range.clone()].to_vec(),
            weight: self.weight.as_ref().map(|w| w[range].to_vec()),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn coordinate(&self) -> &[f64] {
        &self.coordinate
    }

    pub fn weight(&self) -> Option<&[f64]> {
        self.weight.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of non-missing samples
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| !is_missing(**v)).count()
    }

    /// Iterate `(coordinate, value)` over non-missing samples
    pub fn valid_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.coordinate
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| !is_missing(**v))
            .map(|(&c, &v)| (c, v))
    }

    /// Whether both series sit on the same coordinate
    pub fn shares_coordinate(&self, other: &Series) -> bool {
        self.coordinate == other.coordinate
    }

    /// Fail unless `other` is on the same coordinate
    pub fn ensure_aligned(&self, other: &Series, context: &str) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::size_mismatch(self.len(), other.len(), context));
        }
        if !self.shares_coordinate(other) {
            return Err(Error::coordinate_mismatch(context));
        }
        Ok(())
    }
}
