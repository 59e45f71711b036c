//! Per-adjudicator clock registry.
//!
//! Each adjudicator in a run has a cursor holding the next free time of
//! day. Cursors start at the workday start and only move forward; a
//! reservation advances the cursor by the hearing duration plus the
//! buffer. The registry is owned by a single run and never shared.
//!
//! Entries that survive regeneration (held hearings) are fed in with
//! [`ClockRegistry::occupy`] before allocation, so new hearings start no
//! earlier than the last retained hearing's end plus the buffer.

use std::collections::HashMap;

use crate::models::{ClockTime, TimeWindow};

/// Run-scoped map from adjudicator ID to next free time.
#[derive(Debug, Clone)]
pub struct ClockRegistry {
    workday: TimeWindow,
    cursors: HashMap<String, ClockTime>,
}

impl ClockRegistry {
    /// Creates a registry with every cursor at `workday.start`.
    pub fn new<'a>(workday: TimeWindow, ids: impl IntoIterator<Item = &'a str>) -> Self {
        let cursors = ids
            .into_iter()
            .map(|id| (id.to_string(), workday.start))
            .collect();
        Self { workday, cursors }
    }

    /// The workday bounds enforced by `fits`.
    pub fn workday(&self) -> TimeWindow {
        self.workday
    }

    /// Current free-time cursor. `None` for unknown adjudicators.
    pub fn peek(&self, id: &str) -> Option<ClockTime> {
        self.cursors.get(id).copied()
    }

    /// Moves the cursor to at least `end + buffer_minutes`.
    ///
    /// Cursors never move backwards. Unknown adjudicators are ignored.
    pub fn occupy(&mut self, id: &str, end: ClockTime, buffer_minutes: u32) {
        if let Some(cursor) = self.cursors.get_mut(id) {
            *cursor = (*cursor).max(end.plus_minutes(buffer_minutes));
        }
    }

    /// Whether a hearing of `duration_minutes` starting at the cursor ends
    /// no later than the workday end. Overflow does not fit.
    pub fn fits(&self, id: &str, duration_minutes: u32) -> bool {
        self.peek(id).is_some_and(|cursor| {
            cursor
                .minutes()
                .checked_add(duration_minutes)
                .is_some_and(|end| end <= self.workday.end.minutes())
        })
    }

    /// Reserves `[cursor, cursor + duration)` and advances the cursor past
    /// the buffer. Returns the reserved slot.
    ///
    /// Call once per assignment, after checking `fits`.
    pub fn reserve(
        &mut self,
        id: &str,
        duration_minutes: u32,
        buffer_minutes: u32,
    ) -> Option<TimeWindow> {
        let cursor = self.cursors.get_mut(id)?;
        let start = *cursor;
        let end = start.plus_minutes(duration_minutes);
        *cursor = end.plus_minutes(buffer_minutes);
        Some(TimeWindow::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ClockRegistry {
        ClockRegistry::new(
            TimeWindow::new(ClockTime::hm(10, 0), ClockTime::hm(17, 0)),
            ["J1", "J2"],
        )
    }

    #[test]
    fn test_initial_cursors() {
        let r = registry();
        assert_eq!(r.peek("J1"), Some(ClockTime::hm(10, 0)));
        assert_eq!(r.peek("J2"), Some(ClockTime::hm(10, 0)));
        assert_eq!(r.peek("J9"), None);
    }

    #[test]
    fn test_reserve_advances_with_buffer() {
        let mut r = registry();
        let slot = r.reserve("J1", 35, 15).unwrap();
        assert_eq!(slot.start, ClockTime::hm(10, 0));
        assert_eq!(slot.end, ClockTime::hm(10, 35));
        assert_eq!(r.peek("J1"), Some(ClockTime::hm(10, 50)));
        assert_eq!(r.peek("J2"), Some(ClockTime::hm(10, 0)));

        let slot = r.reserve("J1", 25, 15).unwrap();
        assert_eq!(slot.start, ClockTime::hm(10, 50));
        assert_eq!(slot.end, ClockTime::hm(11, 15));
    }

    #[test]
    fn test_fits_at_boundary() {
        let mut r = registry();
        assert!(r.fits("J1", 420));
        assert!(!r.fits("J1", 421));

        r.reserve("J1", 300, 15); // cursor 15:15
        assert!(r.fits("J1", 105));
        assert!(!r.fits("J1", 106));
        assert!(!r.fits("J9", 0));
    }

    #[test]
    fn test_fits_rejects_overflowing_duration() {
        let r = registry();
        assert!(!r.fits("J1", u32::MAX));
        assert!(!r.fits("J1", u32::MAX - 500));
    }

    #[test]
    fn test_occupy_moves_forward_only() {
        let mut r = registry();
        r.occupy("J1", ClockTime::hm(10, 35), 15);
        assert_eq!(r.peek("J1"), Some(ClockTime::hm(10, 50)));

        // An earlier retained hearing does not pull the cursor back.
        r.occupy("J1", ClockTime::hm(10, 0), 15);
        assert_eq!(r.peek("J1"), Some(ClockTime::hm(10, 50)));

        r.occupy("J9", ClockTime::hm(12, 0), 15);
        assert_eq!(r.peek("J9"), None);
        assert_eq!(r.peek("J2"), Some(ClockTime::hm(10, 0)));
    }

    #[test]
    fn test_reserve_unknown() {
        let mut r = registry();
        assert!(r.reserve("J9", 10, 15).is_none());
    }
}
