//! Daily schedule metrics.
//!
//! Computes per-adjudicator load for one date from its schedule entries.
//! This is the only place `daily_capacity_minutes` is consulted.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Hearings | Entries for the adjudicator on the date |
//! | Minutes booked | Sum of entry durations |
//! | Utilization | minutes booked / daily capacity × 100, one decimal |
//! | Last hearing end | Latest entry end time across adjudicators |

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Adjudicator, ClockTime, ScheduleEntry};

/// Load of one adjudicator on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjudicatorUtilization {
    pub adjudicator_id: String,
    pub adjudicator_name: String,
    /// Number of hearings on the date.
    pub hearings: usize,
    /// Total hearing minutes (buffers excluded).
    pub minutes_booked: u32,
    pub daily_capacity_minutes: u32,
    /// Percent of capacity, rounded to one decimal. 0 when capacity is 0.
    pub utilization_percent: f64,
}

/// Schedule metrics for one date.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    pub date: NaiveDate,
    /// Entries counted for the date.
    pub hearings: usize,
    /// Latest end time of any hearing.
    pub last_hearing_end: Option<ClockTime>,
    /// Mean utilization percent across adjudicators.
    pub avg_utilization_percent: f64,
    /// Per adjudicator, in the given adjudicator order.
    pub by_adjudicator: Vec<AdjudicatorUtilization>,
}

impl ScheduleKpi {
    /// Computes metrics for `date`.
    ///
    /// Entries for other dates are ignored. Every adjudicator in
    /// `adjudicators` appears in the output, including idle ones.
    pub fn calculate(date: NaiveDate, entries: &[ScheduleEntry], adjudicators: &[Adjudicator]) -> Self {
        let day: Vec<&ScheduleEntry> = entries.iter().filter(|e| e.date == date).collect();

        let by_adjudicator: Vec<AdjudicatorUtilization> = adjudicators
            .iter()
            .map(|a| {
                let mine = day.iter().filter(|e| e.adjudicator_id == a.id);
                let (hearings, minutes_booked) =
                    mine.fold((0usize, 0u32), |(n, m), e| (n + 1, m + e.duration_minutes));
                AdjudicatorUtilization {
                    adjudicator_id: a.id.clone(),
                    adjudicator_name: a.name.clone(),
                    hearings,
                    minutes_booked,
                    daily_capacity_minutes: a.daily_capacity_minutes,
                    utilization_percent: utilization_percent(
                        minutes_booked,
                        a.daily_capacity_minutes,
                    ),
                }
            })
            .collect();

        let avg_utilization_percent = if by_adjudicator.is_empty() {
            0.0
        } else {
            let sum: f64 = by_adjudicator.iter().map(|u| u.utilization_percent).sum();
            sum / by_adjudicator.len() as f64
        };

        Self {
            date,
            hearings: day.len(),
            last_hearing_end: day.iter().map(|e| e.end_time).max(),
            avg_utilization_percent,
            by_adjudicator,
        }
    }

    /// Utilization of one adjudicator.
    pub fn for_adjudicator(&self, id: &str) -> Option<&AdjudicatorUtilization> {
        self.by_adjudicator.iter().find(|u| u.adjudicator_id == id)
    }

    /// Adjudicators booked beyond their nominal capacity.
    pub fn over_capacity(&self) -> impl Iterator<Item = &AdjudicatorUtilization> {
        self.by_adjudicator
            .iter()
            .filter(|u| u.minutes_booked > u.daily_capacity_minutes)
    }
}

fn utilization_percent(minutes_booked: u32, capacity: u32) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    let pct = f64::from(minutes_booked) / f64::from(capacity) * 100.0;
    (pct * 10.0).round() / 10.0
}
