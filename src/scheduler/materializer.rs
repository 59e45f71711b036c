//! Schedule materialization.
//!
//! Clears a date's upcoming entries before regeneration and commits new
//! assignments. A case is `Scheduled` for a date exactly when an entry for
//! it exists on that date, on both paths. Each assignment is written as a pair (entry insert, then
//! case transition). If the case transition fails, the entry is removed
//! again so neither half survives alone.

use chrono::NaiveDate;

use crate::error::{ScheduleError, StoreError};
use crate::models::ScheduleEntry;
use crate::store::{CaseStore, ScheduleStore};

/// Writes a run's results through the case and schedule stores.
#[derive(Debug)]
pub struct Materializer<'s, C, S> {
    cases: &'s mut C,
    schedule: &'s mut S,
}

impl<'s, C: CaseStore, S: ScheduleStore> Materializer<'s, C, S> {
    /// Creates a materializer over borrowed stores.
    pub fn new(cases: &'s mut C, schedule: &'s mut S) -> Self {
        Self { cases, schedule }
    }

    /// Deletes `Upcoming` entries for `date` and returns their cases to
    /// `Pending`. Entries with any other status are untouched.
    ///
    /// If a release fails with anything but `NotFound`/`Conflict`, the
    /// entries whose cases were not released are put back before the error
    /// is returned.
    ///
    /// Returns the number of entries cleared.
    pub fn clear(&mut self, date: NaiveDate) -> Result<usize, StoreError> {
        let cleared = self.schedule.clear_upcoming(date)?;
        for (idx, entry) in cleared.iter().enumerate() {
            match self.cases.release(&entry.case_number, date) {
                Ok(()) => {}
                Err(err @ (StoreError::NotFound(_) | StoreError::Conflict(_))) => {
                    // Closed or re-dated externally since the entry was made.
                    tracing::warn!(
                        case = %entry.case_number,
                        %date,
                        error = %err,
                        "cleared entry's case not released"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        case = %entry.case_number,
                        %date,
                        error = %err,
                        restored = cleared.len() - idx,
                        "release failed, restoring unreleased entries"
                    );
                    self.restore(&cleared[idx..]);
                    return Err(err);
                }
            }
        }
        Ok(cleared.len())
    }

    fn restore(&mut self, entries: &[ScheduleEntry]) {
        for entry in entries {
            if let Err(err) = self.schedule.insert(entry.clone()) {
                tracing::error!(
                    case = %entry.case_number,
                    error = %err,
                    "failed to restore cleared entry"
                );
            }
        }
    }

    /// Persists one assignment: inserts the entry, then marks the case
    /// scheduled. On failure nothing from this pair remains.
    pub fn commit(&mut self, entry: &ScheduleEntry) -> Result<(), StoreError> {
        let id = self.schedule.insert(entry.clone())?;
        if let Err(err) = self.cases.mark_scheduled(&entry.case_number, entry.date) {
            if let Err(rollback) = self.schedule.remove(id) {
                tracing::error!(
                    case = %entry.case_number,
                    error = %rollback,
                    "failed to remove entry after case update failure"
                );
            }
            return Err(err);
        }
        Ok(())
    }

    /// Commits entries in order, stopping at the first failure.
    ///
    /// Returns the committed entries, or `ScheduleError::Persistence`
    /// carrying how many were committed before the failure.
    pub fn commit_all(
        &mut self,
        entries: Vec<ScheduleEntry>,
    ) -> Result<Vec<ScheduleEntry>, ScheduleError> {
        let mut committed = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Err(source) = self.commit(&entry) {
                tracing::error!(
                    case = %entry.case_number,
                    scheduled = committed.len(),
                    error = %source,
                    "persistence failed, aborting run"
                );
                return Err(ScheduleError::Persistence {
                    scheduled: committed.len(),
                    case_number: entry.case_number,
                    source,
                });
            }
            committed.push(entry);
        }
        Ok(committed)
    }
}
