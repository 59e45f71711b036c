//! Linear regression duration model.
//!
//! The artifact is a JSON document:
//!
//! ```json
//! { "intercept": 12.5, "witnesses": 9.1, "advocates": 3.0, "previous_hearings": -1.2 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{CaseFeatures, DurationModel, EstimatorError};

/// `intercept + w·witnesses + a·advocates + p·previous_hearings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearDurationModel {
    pub intercept: f64,
    pub witnesses: f64,
    #[serde(default)]
    pub advocates: f64,
    #[serde(default)]
    pub previous_hearings: f64,
}

impl LinearDurationModel {
    /// Creates a model from its coefficients.
    pub fn new(intercept: f64, witnesses: f64, advocates: f64, previous_hearings: f64) -> Self {
        Self {
            intercept,
            witnesses,
            advocates,
            previous_hearings,
        }
    }

    /// Parses a JSON artifact.
    pub fn from_json(raw: &str) -> Result<Self, EstimatorError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads a JSON artifact from disk.
    pub fn load(path: &Path) -> Result<Self, EstimatorError> {
        let raw = std::fs::read_to_string(path).map_err(|source| EstimatorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}

impl DurationModel for LinearDurationModel {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn predict(&self, features: &CaseFeatures) -> Result<f64, EstimatorError> {
        Ok(self.intercept
            + self.witnesses * f64::from(features.witnesses)
            + self.advocates * f64::from(features.advocates)
            + self.previous_hearings * f64::from(features.previous_hearings))
    }
}
