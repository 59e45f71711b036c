//! Adjudicator model.
//!
//! Adjudicators are the scheduling resources. Each one carries an ordered
//! list of specialization tags, an availability status, and a nominal
//! daily capacity in minutes.
//!
//! The allocator reads adjudicators but never writes to them; per-run clock
//! state lives in [`ClockRegistry`](crate::scheduler::ClockRegistry).

use serde::{Deserialize, Serialize};

/// Default daily capacity in minutes.
pub const DEFAULT_DAILY_CAPACITY_MINUTES: u32 = 300;

/// A judge (or other adjudicator) that can hear cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjudicator {
    /// Unique adjudicator identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Case-type substrings this adjudicator is expert in.
    #[serde(default)]
    pub specializations: Vec<String>,
    /// Availability status.
    #[serde(default)]
    pub status: AdjudicatorStatus,
    /// Nominal minutes of hearings per day.
    ///
    /// Used for utilization reporting. Allocation is bounded by the workday
    /// window only.
    #[serde(default = "default_capacity")]
    pub daily_capacity_minutes: u32,
}

fn default_capacity() -> u32 {
    DEFAULT_DAILY_CAPACITY_MINUTES
}

/// Adjudicator availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AdjudicatorStatus {
    #[default]
    Available,
    Unavailable,
}

impl Adjudicator {
    /// Creates an available adjudicator with default capacity.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            specializations: Vec::new(),
            status: AdjudicatorStatus::Available,
            daily_capacity_minutes: DEFAULT_DAILY_CAPACITY_MINUTES,
        }
    }

    /// Adds a specialization tag.
    pub fn with_specialization(mut self, tag: impl Into<String>) -> Self {
        self.specializations.push(tag.into());
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: AdjudicatorStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the daily capacity.
    pub fn with_capacity(mut self, minutes: u32) -> Self {
        self.daily_capacity_minutes = minutes;
        self
    }

    /// Whether this adjudicator takes part in scheduling runs.
    pub fn is_available(&self) -> bool {
        self.status == AdjudicatorStatus::Available
    }

    /// Whether any specialization tag occurs in `case_type`.
    ///
    /// Case-insensitive substring containment: tag "crim" matches
    /// case type "Criminal Appeal".
    pub fn specializes_in(&self, case_type: &str) -> bool {
        let case_type = case_type.to_lowercase();
        self.specializations
            .iter()
            .any(|tag| case_type.contains(&tag.to_lowercase()))
    }
}
