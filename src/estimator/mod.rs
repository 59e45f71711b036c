//! Hearing duration estimation.
//!
//! A [`DurationEstimator`] predicts hearing length in whole minutes from
//! three case features. When a regression model is loaded it is consulted
//! first; if the model is absent or fails in any way the estimator falls
//! back to a fixed heuristic:
//!
//! ```text
//! minutes = min(cap, base + per_witness * witnesses)    // 15, 10, 120
//! ```
//!
//! Model failures are carried internally as [`EstimatorError`] and
//! collapsed to the heuristic in [`DurationEstimator::estimate`], which
//! therefore never fails.
//!
//! # Usage
//!
//! ```
//! use u_hearing::estimator::{CaseFeatures, DurationEstimator, FallbackFormula};
//!
//! let estimator = DurationEstimator::heuristic(FallbackFormula::default());
//! let features = CaseFeatures { witnesses: 2, ..Default::default() };
//! assert_eq!(estimator.estimate(&features), 35);
//! ```

mod linear;

pub use linear::LinearDurationModel;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::config::SchedulerConfig;

/// Predicted hearing length in minutes.
pub type Minutes = u32;

/// Longest prediction accepted from a model: one full day.
pub const MAX_PREDICTION_MINUTES: Minutes = 24 * 60;

/// Inputs to duration prediction. Missing values are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaseFeatures {
    pub witnesses: u32,
    pub advocates: u32,
    pub previous_hearings: u32,
}

/// Why a model prediction could not be used.
#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    #[error("no regression model loaded")]
    ModelUnavailable,

    #[error("failed to read model artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model prediction failed: {0}")]
    Prediction(String),

    #[error("model returned non-finite prediction {0}")]
    NonFinite(f64),

    #[error("model prediction {0} exceeds one day")]
    OutOfRange(f64),
}

/// A trained regression model over [`CaseFeatures`].
pub trait DurationModel: Send + Sync + Debug {
    /// Model name for logging.
    fn name(&self) -> &'static str;

    /// Raw prediction in minutes (may be fractional or negative).
    fn predict(&self, features: &CaseFeatures) -> Result<f64, EstimatorError>;
}

/// Deterministic duration heuristic.
///
/// These constants must stay at 15 / 10 / 120 to reproduce historical runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackFormula {
    pub base_minutes: u32,
    pub minutes_per_witness: u32,
    pub cap_minutes: u32,
}

impl Default for FallbackFormula {
    fn default() -> Self {
        Self {
            base_minutes: 15,
            minutes_per_witness: 10,
            cap_minutes: 120,
        }
    }
}

impl FallbackFormula {
    /// `min(cap, base + per_witness * witnesses)`.
    pub fn minutes(&self, features: &CaseFeatures) -> Minutes {
        self.minutes_per_witness
            .saturating_mul(features.witnesses)
            .saturating_add(self.base_minutes)
            .min(self.cap_minutes)
    }
}

/// Duration estimator with model-then-heuristic policy.
#[derive(Debug)]
pub struct DurationEstimator {
    model: Option<Box<dyn DurationModel>>,
    fallback: FallbackFormula,
}

impl DurationEstimator {
    /// Creates an estimator that always uses the heuristic.
    pub fn heuristic(fallback: FallbackFormula) -> Self {
        Self {
            model: None,
            fallback,
        }
    }

    /// Installs a regression model.
    pub fn with_model<M: DurationModel + 'static>(mut self, model: M) -> Self {
        self.model = Some(Box::new(model));
        self
    }

    /// Loads a [`LinearDurationModel`] artifact.
    ///
    /// An unreadable or malformed artifact is logged and the estimator
    /// stays in heuristic mode.
    pub fn from_model_path(path: impl AsRef<Path>, fallback: FallbackFormula) -> Self {
        let path = path.as_ref();
        match LinearDurationModel::load(path) {
            Ok(model) => {
                tracing::info!(path = %path.display(), "loaded duration model");
                Self::heuristic(fallback).with_model(model)
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "duration model unusable, using heuristic"
                );
                Self::heuristic(fallback)
            }
        }
    }

    /// Builds the estimator described by a config.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        match &config.model_path {
            Some(path) => Self::from_model_path(path, config.fallback),
            None => Self::heuristic(config.fallback),
        }
    }

    /// Whether a regression model is installed.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// The heuristic in use.
    pub fn fallback(&self) -> &FallbackFormula {
        &self.fallback
    }

    /// Model-only prediction, rounded and clamped at zero.
    ///
    /// Predictions above [`MAX_PREDICTION_MINUTES`] are rejected.
    pub fn predict(&self, features: &CaseFeatures) -> Result<Minutes, EstimatorError> {
        let model = self.model.as_ref().ok_or(EstimatorError::ModelUnavailable)?;
        let raw = model.predict(features)?;
        if !raw.is_finite() {
            return Err(EstimatorError::NonFinite(raw));
        }
        let rounded = raw.round();
        if rounded > f64::from(MAX_PREDICTION_MINUTES) {
            return Err(EstimatorError::OutOfRange(raw));
        }
        Ok(rounded.max(0.0) as Minutes)
    }

    /// Predicted minutes. Never fails.
    pub fn estimate(&self, features: &CaseFeatures) -> Minutes {
        match self.predict(features) {
            Ok(minutes) => minutes,
            Err(EstimatorError::ModelUnavailable) => self.fallback.minutes(features),
            Err(err) => {
                tracing::debug!(error = %err, "model prediction failed, using heuristic");
                self.fallback.minutes(features)
            }
        }
    }
}

impl Default for DurationEstimator {
    fn default() -> Self {
        Self::heuristic(FallbackFormula::default())
    }
}
