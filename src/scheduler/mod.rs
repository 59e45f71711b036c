//! Daily hearing scheduler and schedule metrics.
//!
//! # Algorithm
//!
//! `DailyScheduler` runs a greedy, priority-ordered, earliest-available
//! assignment over one day. Each adjudicator has a clock cursor starting at
//! the workday open, or after any hearing already held that day. Cases are
//! taken in rule-engine order; for each case the adjudicator minimizing
//!
//! ```text
//! score = (cursor - workday_start) - [specialist] × expertise_bonus
//! ```
//!
//! among those whose cursor plus the estimated duration stays within the
//! workday is chosen. Ties go to the adjudicator listed first. The chosen
//! cursor advances by duration plus buffer. The result is not optimal.
//!
//! Allocation produces a plan without touching the stores; the
//! [`Materializer`] then commits it pair by pair.
//!
//! # KPI
//!
//! `ScheduleKpi` reports per-adjudicator hearing count, minutes booked, and
//! utilization against nominal daily capacity.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Graham (1966), "Bounds for certain multiprocessing anomalies" (list scheduling)

mod allocator;
mod clock;
mod daily;
mod kpi;
mod materializer;
mod venue;

pub use allocator::{AllocationPlan, AllocationScore, Allocator};
pub use clock::ClockRegistry;
pub use daily::{DailyScheduler, RunOutcome};
pub use kpi::{AdjudicatorUtilization, ScheduleKpi};
pub use materializer::Materializer;
pub use venue::VenueSampler;
