//! Greedy adjudicator allocation.
//!
//! # Algorithm
//!
//! Cursors start at workday open, or just past the last retained hearing
//! (plus buffer) for adjudicators who already have held entries that day.
//!
//! For each case, in prioritized order:
//! 1. Estimate the hearing duration.
//! 2. Score every adjudicator whose clock fits the hearing before the end
//!    of the workday. The score is the cursor's offset from workday start,
//!    minus the expertise bonus on a specialization match.
//! 3. Pick the strictly lowest score; the first adjudicator examined wins
//!    ties.
//! 4. If nothing was scored, take the first adjudicator (in input order)
//!    whose clock fits. With the current fit predicate this pass selects
//!    nothing the scored pass would not; it is kept so the selection
//!    procedure stays identical to historical runs.
//! 5. If still nothing fits, the case is left unscheduled.
//! 6. Otherwise reserve `[cursor, cursor + duration)` plus buffer and emit
//!    a schedule entry.
//!
//! This is earliest-available with expertise preference, not an optimum.
//!
//! # Complexity
//! O(n * m) where n = cases, m = adjudicators.

use chrono::NaiveDate;

use super::clock::ClockRegistry;
use super::venue::VenueSampler;
use crate::config::SchedulerConfig;
use crate::estimator::DurationEstimator;
use crate::models::{Adjudicator, Case, EntryStatus, ScheduleEntry};

/// Selection score: minutes after workday start, less any expertise bonus.
///
/// Lower wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AllocationScore(pub i64);

/// Result of allocating one run.
#[derive(Debug, Clone, Default)]
pub struct AllocationPlan {
    /// Entries in emission order.
    pub entries: Vec<ScheduleEntry>,
    /// Case numbers that fit no adjudicator.
    pub unscheduled: Vec<String>,
}

/// Greedy allocator over a run snapshot.
#[derive(Debug)]
pub struct Allocator<'a> {
    config: &'a SchedulerConfig,
    estimator: &'a DurationEstimator,
}

impl<'a> Allocator<'a> {
    /// Creates an allocator using `config` policy and `estimator`.
    pub fn new(config: &'a SchedulerConfig, estimator: &'a DurationEstimator) -> Self {
        Self { config, estimator }
    }

    /// Allocates `cases` (already prioritized) across `adjudicators`.
    ///
    /// `retained` holds entries that stay in place on `date` (held
    /// hearings); new hearings are placed after them. Entries for other
    /// dates are ignored.
    ///
    /// Adjudicator order is significant: it breaks score ties and drives
    /// the fallback pass.
    pub fn plan(
        &self,
        date: NaiveDate,
        cases: &[Case],
        adjudicators: &[Adjudicator],
        retained: &[ScheduleEntry],
        venues: &mut VenueSampler,
    ) -> AllocationPlan {
        let mut clocks = ClockRegistry::new(
            self.config.workday(),
            adjudicators.iter().map(|a| a.id.as_str()),
        );
        for entry in retained.iter().filter(|e| e.date == date) {
            clocks.occupy(&entry.adjudicator_id, entry.end_time, self.config.buffer_minutes);
        }
        let mut plan = AllocationPlan::default();

        for case in cases {
            let duration = self.estimator.estimate(&case.features());

            let Some(idx) = self.select(case, duration, adjudicators, &clocks) else {
                tracing::debug!(
                    case = %case.case_number,
                    duration,
                    "no adjudicator fits, leaving case pending"
                );
                plan.unscheduled.push(case.case_number.clone());
                continue;
            };

            let adjudicator = &adjudicators[idx];
            let Some(slot) =
                clocks.reserve(&adjudicator.id, duration, self.config.buffer_minutes)
            else {
                tracing::debug!(
                    case = %case.case_number,
                    adjudicator = %adjudicator.id,
                    "selected adjudicator has no clock, leaving case pending"
                );
                plan.unscheduled.push(case.case_number.clone());
                continue;
            };

            let venue = venues.sample();
            tracing::debug!(
                case = %case.case_number,
                adjudicator = %adjudicator.id,
                start = %slot.start,
                end = %slot.end,
                duration,
                "assigned hearing"
            );

            plan.entries.push(ScheduleEntry {
                case_number: case.case_number.clone(),
                case_type: case.case_type.clone(),
                adjudicator_id: adjudicator.id.clone(),
                adjudicator_name: adjudicator.name.clone(),
                date,
                start_time: slot.start,
                end_time: slot.end,
                duration_minutes: duration,
                risk_level: self.config.risk_for(duration),
                status: EntryStatus::Upcoming,
                court_name: venue.court_name,
                court_room: venue.court_room,
            });
        }

        plan
    }

    /// Index of the adjudicator to hear `case`, if any fits.
    pub fn select(
        &self,
        case: &Case,
        duration_minutes: u32,
        adjudicators: &[Adjudicator],
        clocks: &ClockRegistry,
    ) -> Option<usize> {
        let mut best: Option<(usize, AllocationScore)> = None;

        for (idx, adjudicator) in adjudicators.iter().enumerate() {
            if !clocks.fits(&adjudicator.id, duration_minutes) {
                continue;
            }
            let Some(score) = self.score(case, adjudicator, clocks) else {
                continue;
            };
            if best.map_or(true, |(_, current)| score < current) {
                best = Some((idx, score));
            }
        }

        best.map(|(idx, _)| idx).or_else(|| {
            adjudicators
                .iter()
                .position(|a| clocks.fits(&a.id, duration_minutes))
        })
    }

    /// Score of assigning `case` to `adjudicator` at its current cursor.
    pub fn score(
        &self,
        case: &Case,
        adjudicator: &Adjudicator,
        clocks: &ClockRegistry,
    ) -> Option<AllocationScore> {
        let cursor = clocks.peek(&adjudicator.id)?;
        let mut score = cursor.minutes_since(clocks.workday().start);
        if adjudicator.specializes_in(&case.case_type) {
            score -= i64::from(self.config.expertise_bonus_minutes);
        }
        Some(AllocationScore(score))
    }
}
