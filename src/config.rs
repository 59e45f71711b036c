//! Scheduler configuration.
//!
//! Every policy constant used by a run lives here. Defaults reproduce the
//! historical policy exactly; a TOML file may override any subset.
//!
//! ```toml
//! workday_start = "10:00"
//! workday_end = "17:00"
//! buffer_minutes = 15
//! expertise_bonus_minutes = 60
//! venue_seed = 7
//!
//! [fallback]
//! base_minutes = 15
//! minutes_per_witness = 10
//! cap_minutes = 120
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::estimator::FallbackFormula;
use crate::models::{ClockTime, RiskLevel, TimeWindow};

/// Scheduling policy for daily runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Start of every adjudicator's day.
    pub workday_start: ClockTime,
    /// No hearing may end after this time.
    pub workday_end: ClockTime,
    /// Gap reserved after every hearing on the same adjudicator.
    pub buffer_minutes: u32,
    /// Score reduction for a specialization match.
    pub expertise_bonus_minutes: u32,
    /// Heuristic used when no regression model is usable.
    pub fallback: FallbackFormula,
    /// Durations above this are `Medium` risk.
    pub risk_medium_above: u32,
    /// Durations above this are `High` risk.
    pub risk_high_above: u32,
    /// Court names drawn for venue labels.
    pub courts: Vec<String>,
    /// Room names drawn for venue labels.
    pub rooms: Vec<String>,
    /// Seed for venue label sampling. `None` = OS entropy.
    pub venue_seed: Option<u64>,
    /// Regression model artifact (JSON).
    pub model_path: Option<PathBuf>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workday_start: ClockTime::hm(10, 0),
            workday_end: ClockTime::hm(17, 0),
            buffer_minutes: 15,
            expertise_bonus_minutes: 60,
            fallback: FallbackFormula::default(),
            risk_medium_above: RiskLevel::MEDIUM_ABOVE,
            risk_high_above: RiskLevel::HIGH_ABOVE,
            courts: vec![
                "District Court Complex".into(),
                "High Court Annex".into(),
                "City Civil Court".into(),
            ],
            rooms: vec![
                "Room 101".into(),
                "Hall 3".into(),
                "Room 4B".into(),
                "Chamber 2".into(),
                "Court Hall 7".into(),
            ],
            venue_seed: None,
            model_path: None,
        }
    }
}

impl SchedulerConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workday_start >= self.workday_end {
            return Err(ConfigError::Invalid(format!(
                "workday_start {} must be before workday_end {}",
                self.workday_start, self.workday_end
            )));
        }
        if self.risk_medium_above > self.risk_high_above {
            return Err(ConfigError::Invalid(format!(
                "risk_medium_above {} exceeds risk_high_above {}",
                self.risk_medium_above, self.risk_high_above
            )));
        }
        if self.courts.is_empty() || self.rooms.is_empty() {
            return Err(ConfigError::Invalid(
                "courts and rooms must each list at least one label".into(),
            ));
        }
        Ok(())
    }

    /// The workday as a window.
    pub fn workday(&self) -> TimeWindow {
        TimeWindow::new(self.workday_start, self.workday_end)
    }

    /// Classifies a duration with this config's thresholds.
    pub fn risk_for(&self, duration_minutes: u32) -> RiskLevel {
        RiskLevel::classify(duration_minutes, self.risk_medium_above, self.risk_high_above)
    }

    /// Sets the workday window.
    pub fn with_workday(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.workday_start = start;
        self.workday_end = end;
        self
    }

    /// Sets the inter-hearing buffer.
    pub fn with_buffer(mut self, minutes: u32) -> Self {
        self.buffer_minutes = minutes;
        self
    }

    /// Sets the expertise bonus.
    pub fn with_expertise_bonus(mut self, minutes: u32) -> Self {
        self.expertise_bonus_minutes = minutes;
        self
    }

    /// Fixes the venue sampling seed.
    pub fn with_venue_seed(mut self, seed: u64) -> Self {
        self.venue_seed = Some(seed);
        self
    }

    /// Sets the regression model artifact path.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }
}
