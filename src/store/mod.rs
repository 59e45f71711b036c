//! Store collaborators.
//!
//! The scheduler reads cases and adjudicators and writes schedule entries
//! and case transitions through these traits. Handles are passed in
//! explicitly; nothing here is process-global.
//!
//! Stores must offer read-your-writes consistency within one run. They are
//! not expected to provide cross-run transactions, and callers must not run
//! two schedules for the same date concurrently.

mod memory;

pub use memory::{InMemoryAdjudicatorStore, InMemoryCaseStore, InMemoryScheduleStore};

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::models::{Adjudicator, Case, ScheduleEntry};

/// Opaque handle for an inserted schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

/// Case persistence.
pub trait CaseStore {
    /// All cases with status `Pending`, in backlog order.
    fn pending_cases(&self) -> Result<Vec<Case>, StoreError>;

    /// Transitions a pending case to `Scheduled` and records the hearing date.
    fn mark_scheduled(&mut self, case_number: &str, date: NaiveDate) -> Result<(), StoreError>;

    /// Returns a case scheduled for `date` to `Pending` after its upcoming
    /// entry was cleared for regeneration.
    fn release(&mut self, case_number: &str, date: NaiveDate) -> Result<(), StoreError>;
}

/// Adjudicator persistence. Read-only for the scheduler.
pub trait AdjudicatorStore {
    /// All adjudicators with status `Available`, in store order.
    fn available_adjudicators(&self) -> Result<Vec<Adjudicator>, StoreError>;
}

/// Schedule entry persistence.
pub trait ScheduleStore {
    /// Deletes entries for `date` whose status is `Upcoming` and returns them.
    fn clear_upcoming(&mut self, date: NaiveDate) -> Result<Vec<ScheduleEntry>, StoreError>;

    /// Inserts an entry.
    fn insert(&mut self, entry: ScheduleEntry) -> Result<EntryId, StoreError>;

    /// Removes a previously inserted entry.
    fn remove(&mut self, id: EntryId) -> Result<(), StoreError>;

    /// All entries for `date`, in insertion order.
    fn entries_for_date(&self, date: NaiveDate) -> Result<Vec<ScheduleEntry>, StoreError>;

    /// Marks the upcoming entry for `case_number` on `date` as held.
    fn mark_held(&mut self, date: NaiveDate, case_number: &str) -> Result<(), StoreError>;
}
