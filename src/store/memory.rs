//! In-memory store implementations.
//!
//! Suitable for tests, demos, and hosts that keep the working set in
//! memory and persist it elsewhere.

use chrono::NaiveDate;

use super::{AdjudicatorStore, CaseStore, EntryId, ScheduleStore};
use crate::error::StoreError;
use crate::models::{Adjudicator, Case, CaseStatus, EntryStatus, ScheduleEntry};

/// Vector-backed case store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCaseStore {
    cases: Vec<Case>,
}

impl InMemoryCaseStore {
    /// Creates a store holding `cases` in backlog order.
    pub fn new(cases: Vec<Case>) -> Self {
        Self { cases }
    }

    /// Registers a case at the end of the backlog.
    pub fn insert(&mut self, case: Case) {
        self.cases.push(case);
    }

    /// Looks up a case by number.
    pub fn get(&self, case_number: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.case_number == case_number)
    }

    /// All cases.
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Closes a case.
    pub fn close(&mut self, case_number: &str) -> Result<(), StoreError> {
        let case = self
            .cases
            .iter_mut()
            .find(|c| c.case_number == case_number)
            .ok_or_else(|| StoreError::NotFound(case_number.to_string()))?;
        case.status = CaseStatus::Closed;
        Ok(())
    }
}

impl CaseStore for InMemoryCaseStore {
    fn pending_cases(&self) -> Result<Vec<Case>, StoreError> {
        Ok(self.cases.iter().filter(|c| c.is_pending()).cloned().collect())
    }

    fn mark_scheduled(&mut self, case_number: &str, date: NaiveDate) -> Result<(), StoreError> {
        let case = self
            .cases
            .iter_mut()
            .find(|c| c.case_number == case_number)
            .ok_or_else(|| StoreError::NotFound(case_number.to_string()))?;
        if case.schedule_for(date) {
            Ok(())
        } else {
            Err(StoreError::Conflict(format!(
                "case {case_number} is {:?}, not Pending",
                case.status
            )))
        }
    }

    fn release(&mut self, case_number: &str, date: NaiveDate) -> Result<(), StoreError> {
        let case = self
            .cases
            .iter_mut()
            .find(|c| c.case_number == case_number)
            .ok_or_else(|| StoreError::NotFound(case_number.to_string()))?;
        if case.release_from(date) {
            Ok(())
        } else {
            Err(StoreError::Conflict(format!(
                "case {case_number} is not scheduled for {date}"
            )))
        }
    }
}

/// Vector-backed adjudicator store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdjudicatorStore {
    adjudicators: Vec<Adjudicator>,
}

impl InMemoryAdjudicatorStore {
    /// Creates a store holding `adjudicators` in the given order.
    pub fn new(adjudicators: Vec<Adjudicator>) -> Self {
        Self { adjudicators }
    }

    /// All adjudicators, regardless of status.
    pub fn adjudicators(&self) -> &[Adjudicator] {
        &self.adjudicators
    }
}

impl AdjudicatorStore for InMemoryAdjudicatorStore {
    fn available_adjudicators(&self) -> Result<Vec<Adjudicator>, StoreError> {
        Ok(self
            .adjudicators
            .iter()
            .filter(|a| a.is_available())
            .cloned()
            .collect())
    }
}

/// Vector-backed schedule store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleStore {
    entries: Vec<(EntryId, ScheduleEntry)>,
    next_id: u64,
}

impl InMemoryScheduleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries across all dates, in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().map(|(_, e)| e)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScheduleStore for InMemoryScheduleStore {
    fn clear_upcoming(&mut self, date: NaiveDate) -> Result<Vec<ScheduleEntry>, StoreError> {
        let (cleared, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(_, e)| e.date == date && e.is_upcoming());
        self.entries = kept;
        Ok(cleared.into_iter().map(|(_, e)| e).collect())
    }

    fn insert(&mut self, entry: ScheduleEntry) -> Result<EntryId, StoreError> {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, entry));
        Ok(id)
    }

    fn remove(&mut self, id: EntryId) -> Result<(), StoreError> {
        let pos = self
            .entries
            .iter()
            .position(|(eid, _)| *eid == id)
            .ok_or_else(|| StoreError::NotFound(format!("entry {}", id.0)))?;
        self.entries.remove(pos);
        Ok(())
    }

    fn entries_for_date(&self, date: NaiveDate) -> Result<Vec<ScheduleEntry>, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|(_, e)| e.date == date)
            .map(|(_, e)| e.clone())
            .collect())
    }

    fn mark_held(&mut self, date: NaiveDate, case_number: &str) -> Result<(), StoreError> {
        let entry = self
            .entries
            .iter_mut()
            .map(|(_, e)| e)
            .find(|e| e.date == date && e.case_number == case_number && e.is_upcoming())
            .ok_or_else(|| StoreError::NotFound(format!("upcoming entry for {case_number}")))?;
        entry.status = EntryStatus::Held;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdjudicatorStatus, ClockTime, RiskLevel};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn entry(case_number: &str, day: u32) -> ScheduleEntry {
        ScheduleEntry {
            case_number: case_number.into(),
            case_type: "Civil".into(),
            adjudicator_id: "J1".into(),
            adjudicator_name: "Justice Rao".into(),
            date: date(day),
            start_time: ClockTime::hm(10, 0),
            end_time: ClockTime::hm(10, 25),
            duration_minutes: 25,
            risk_level: RiskLevel::Low,
            status: EntryStatus::Upcoming,
            court_name: "City Civil Court".into(),
            court_room: "Room 101".into(),
        }
    }

    #[test]
    fn test_pending_filter_keeps_order() {
        let store = InMemoryCaseStore::new(vec![
            Case::new("A", "Civil"),
            Case::new("B", "Civil").with_status(CaseStatus::Closed),
            Case::new("C", "Civil").with_status(CaseStatus::Scheduled),
            Case::new("D", "Civil"),
        ]);
        let pending: Vec<_> = store
            .pending_cases()
            .unwrap()
            .into_iter()
            .map(|c| c.case_number)
            .collect();
        assert_eq!(pending, ["A", "D"]);
    }

    #[test]
    fn test_mark_scheduled() {
        let mut store = InMemoryCaseStore::new(vec![Case::new("A", "Civil")]);
        store.mark_scheduled("A", date(2)).unwrap();
        let a = store.get("A").unwrap();
        assert_eq!(a.status, CaseStatus::Scheduled);
        assert_eq!(a.hearing_date, Some(date(2)));

        assert!(matches!(
            store.mark_scheduled("A", date(3)),
            Err(StoreError::Conflict(_))
        ));
        assert!(matches!(
            store.mark_scheduled("Z", date(3)),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_release() {
        let mut store = InMemoryCaseStore::new(vec![Case::new("A", "Civil")]);
        store.mark_scheduled("A", date(2)).unwrap();
        assert!(matches!(
            store.release("A", date(3)),
            Err(StoreError::Conflict(_))
        ));
        store.release("A", date(2)).unwrap();
        let a = store.get("A").unwrap();
        assert!(a.is_pending());
        assert_eq!(a.hearing_date, None);
    }

    #[test]
    fn test_close_case() {
        let mut store = InMemoryCaseStore::new(vec![Case::new("A", "Civil")]);
        store.close("A").unwrap();
        assert!(store.pending_cases().unwrap().is_empty());
    }

    #[test]
    fn test_available_adjudicators() {
        let store = InMemoryAdjudicatorStore::new(vec![
            Adjudicator::new("J1", "A"),
            Adjudicator::new("J2", "B").with_status(AdjudicatorStatus::Unavailable),
            Adjudicator::new("J3", "C"),
        ]);
        let ids: Vec<_> = store
            .available_adjudicators()
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, ["J1", "J3"]);
    }

    #[test]
    fn test_delete_upcoming_spares_held_and_other_dates() {
        let mut store = InMemoryScheduleStore::new();
        store.insert(entry("A", 2)).unwrap();
        store.insert(entry("B", 2)).unwrap();
        store.insert(entry("C", 3)).unwrap();
        store.mark_held(date(2), "B").unwrap();

        let cleared = store.clear_upcoming(date(2)).unwrap();
        assert_eq!(cleared.len(), 1);
        assert_eq!(cleared[0].case_number, "A");
        let left: Vec<_> = store.all().map(|e| e.case_number.as_str()).collect();
        assert_eq!(left, ["B", "C"]);
        assert!(store.clear_upcoming(date(2)).unwrap().is_empty());
    }

    #[test]
    fn test_insert_remove() {
        let mut store = InMemoryScheduleStore::new();
        let a = store.insert(entry("A", 2)).unwrap();
        let b = store.insert(entry("B", 2)).unwrap();
        assert_ne!(a, b);

        store.remove(a).unwrap();
        assert_eq!(store.len(), 1);
        assert!(matches!(store.remove(a), Err(StoreError::NotFound(_))));
        assert_eq!(store.entries_for_date(date(2)).unwrap()[0].case_number, "B");
    }

    #[test]
    fn test_mark_held_requires_upcoming() {
        let mut store = InMemoryScheduleStore::new();
        store.insert(entry("A", 2)).unwrap();
        store.mark_held(date(2), "A").unwrap();
        assert!(store.mark_held(date(2), "A").is_err());
        assert!(store.mark_held(date(3), "A").is_err());
    }
}
