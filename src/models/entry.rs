//! Schedule entry model.
//!
//! A schedule entry binds one case to one adjudicator for one time slot on
//! one date. For a fixed adjudicator and date, entries produced by a run
//! never overlap and are emitted in non-decreasing start order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ClockTime, TimeWindow};

/// One reserved hearing slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Scheduled case number.
    pub case_number: String,
    /// Case type (denormalized for display).
    pub case_type: String,
    /// Assigned adjudicator ID.
    pub adjudicator_id: String,
    /// Assigned adjudicator display name.
    pub adjudicator_name: String,
    /// Hearing date.
    pub date: NaiveDate,
    /// Hearing start.
    pub start_time: ClockTime,
    /// Hearing end (exclusive).
    pub end_time: ClockTime,
    /// Predicted hearing length.
    pub duration_minutes: u32,
    /// Risk level derived from the duration.
    pub risk_level: RiskLevel,
    /// Entry status.
    pub status: EntryStatus,
    /// Court name (display only).
    pub court_name: String,
    /// Court room (display only).
    pub court_room: String,
}

/// Overrun risk derived from predicted duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Schedule entry status.
///
/// Regeneration only replaces `Upcoming` entries; `Held` entries are history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntryStatus {
    #[default]
    Upcoming,
    Held,
}

/// Venue label attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    pub court_name: String,
    pub court_room: String,
}

impl RiskLevel {
    /// Default duration (minutes) above which risk is `Medium`.
    pub const MEDIUM_ABOVE: u32 = 60;
    /// Default duration (minutes) above which risk is `High`.
    pub const HIGH_ABOVE: u32 = 90;

    /// Classifies a duration with the default thresholds.
    pub fn from_duration(minutes: u32) -> Self {
        Self::classify(minutes, Self::MEDIUM_ABOVE, Self::HIGH_ABOVE)
    }

    /// Classifies a duration: `> high_above` is `High`, `> medium_above` is
    /// `Medium`, anything else `Low`.
    pub fn classify(minutes: u32, medium_above: u32, high_above: u32) -> Self {
        if minutes > high_above {
            RiskLevel::High
        } else if minutes > medium_above {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl ScheduleEntry {
    /// Occupied interval `[start_time, end_time)`.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }

    /// Whether regeneration may replace this entry.
    #[inline]
    pub fn is_upcoming(&self) -> bool {
        self.status == EntryStatus::Upcoming
    }

    /// The `(case, adjudicator, start)` triple identifying the assignment.
    pub fn assignment_key(&self) -> (&str, &str, ClockTime) {
        (&self.case_number, &self.adjudicator_id, self.start_time)
    }
}
