//! Case model.
//!
//! A case is a matter awaiting a hearing. The scheduler only ever offers
//! `Pending` cases to the allocator and moves them to `Scheduled` on
//! assignment. Regenerating a date returns the cases whose upcoming
//! entries were cleared to `Pending` first. Closing a case is done elsewhere.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::estimator::CaseFeatures;

/// A matter awaiting or undergoing judicial process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Unique case number (natural key).
    pub case_number: String,
    /// Case category, e.g. "Criminal", "Civil", "Family".
    pub case_type: String,
    /// Priority tier.
    #[serde(default)]
    pub priority: PriorityTier,
    /// Lifecycle status.
    #[serde(default)]
    pub status: CaseStatus,
    /// Number of witnesses to be heard.
    #[serde(default)]
    pub witnesses: u32,
    /// Number of advocates appearing.
    #[serde(default)]
    pub advocates: u32,
    /// Number of hearings already held.
    #[serde(default)]
    pub previous_hearings: u32,
    /// Date the case was filed.
    #[serde(default)]
    pub filing_date: Option<NaiveDate>,
    /// Date of the scheduled hearing, set when the case is scheduled.
    #[serde(default)]
    pub hearing_date: Option<NaiveDate>,
}

/// Case priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriorityTier {
    #[default]
    Normal,
    High,
}

/// Case lifecycle status.
///
/// Lifecycle transitions are `Pending → Scheduled` (scheduler) and any
/// status to `Closed` (external).
///
/// `Scheduled → Pending` is not a lifecycle step. It is performed only
/// while regenerating a date, on cases whose `Upcoming` entry for that
/// date was just cleared, so that a re-run sees the same pending backlog
/// and reproduces the same assignments. Cases with a `Held` entry are
/// never released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CaseStatus {
    #[default]
    Pending,
    Scheduled,
    Closed,
}

impl Case {
    /// Case type that is always heard first.
    pub const CRIMINAL: &'static str = "Criminal";

    /// Creates a pending, normal-priority case.
    pub fn new(case_number: impl Into<String>, case_type: impl Into<String>) -> Self {
        Self {
            case_number: case_number.into(),
            case_type: case_type.into(),
            priority: PriorityTier::Normal,
            status: CaseStatus::Pending,
            witnesses: 0,
            advocates: 0,
            previous_hearings: 0,
            filing_date: None,
            hearing_date: None,
        }
    }

    /// Sets the priority tier.
    pub fn with_priority(mut self, priority: PriorityTier) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the witness count.
    pub fn with_witnesses(mut self, witnesses: u32) -> Self {
        self.witnesses = witnesses;
        self
    }

    /// Sets the advocate count.
    pub fn with_advocates(mut self, advocates: u32) -> Self {
        self.advocates = advocates;
        self
    }

    /// Sets the prior-hearing count.
    pub fn with_previous_hearings(mut self, previous_hearings: u32) -> Self {
        self.previous_hearings = previous_hearings;
        self
    }

    /// Sets the filing date.
    pub fn with_filing_date(mut self, date: NaiveDate) -> Self {
        self.filing_date = Some(date);
        self
    }

    /// Whether the case type is exactly "Criminal".
    pub fn is_criminal(&self) -> bool {
        self.case_type == Self::CRIMINAL
    }

    /// Whether this case can be offered to the allocator.
    pub fn is_pending(&self) -> bool {
        self.status == CaseStatus::Pending
    }

    /// Features used for duration prediction.
    pub fn features(&self) -> CaseFeatures {
        CaseFeatures {
            witnesses: self.witnesses,
            advocates: self.advocates,
            previous_hearings: self.previous_hearings,
        }
    }

    /// Moves a pending case to `Scheduled` for `date`.
    ///
    /// Returns `false` and leaves the case untouched if it is not pending.
    pub fn schedule_for(&mut self, date: NaiveDate) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = CaseStatus::Scheduled;
        self.hearing_date = Some(date);
        true
    }

    /// Returns a case scheduled for `date` to `Pending`.
    ///
    /// Regeneration only: called after the case's upcoming entry for `date`
    /// was cleared. See [`CaseStatus`].
    ///
    /// Returns `false` and leaves the case untouched otherwise.
    pub fn release_from(&mut self, date: NaiveDate) -> bool {
        if self.status != CaseStatus::Scheduled || self.hearing_date != Some(date) {
            return false;
        }
        self.status = CaseStatus::Pending;
        self.hearing_date = None;
        true
    }
}
