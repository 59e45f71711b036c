//! Daily hearing scheduler for court case backlogs.
//!
//! Assigns pending cases to available adjudicators for one date, producing
//! a time-slotted schedule in a single greedy pass: estimate each case's
//! hearing length, order the backlog by priority, then give each case to
//! the adjudicator who can start it soonest, favoring specialists.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Case`, `Adjudicator`, `ScheduleEntry`,
//!   `ClockTime`, `TimeWindow`
//! - **`estimator`**: Hearing duration estimation with model and heuristic fallback
//! - **`dispatching`**: Case prioritization rules and the rule engine
//! - **`scheduler`**: Clock registry, allocator, materializer, `DailyScheduler`, KPIs
//! - **`store`**: Store traits and in-memory implementations
//! - **`config`**: TOML-backed scheduler policy
//! - **`validation`**: Snapshot integrity checks (duplicate IDs, empty fields)
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_hearing::prelude::*;
//!
//! let mut scheduler = DailyScheduler::new(
//!     InMemoryCaseStore::new(vec![Case::new("C-1", "Civil").with_witnesses(3)]),
//!     InMemoryAdjudicatorStore::new(vec![Adjudicator::new("J1", "Justice One")]),
//!     InMemoryScheduleStore::new(),
//!     SchedulerConfig::default(),
//! );
//! let outcome = scheduler
//!     .run_schedule(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
//!     .unwrap();
//! assert_eq!(outcome.entries[0].duration_minutes, 45);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Haupt (1989), "A survey of priority rule-based scheduling"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod estimator;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

/// Common imports.
pub mod prelude {
    pub use crate::config::SchedulerConfig;
    pub use crate::error::{ScheduleError, StoreError};
    pub use crate::estimator::{DurationEstimator, DurationModel};
    pub use crate::models::{Adjudicator, Case, CaseStatus, PriorityTier, ScheduleEntry};
    pub use crate::scheduler::{DailyScheduler, RunOutcome};
    pub use crate::store::{
        AdjudicatorStore, CaseStore, InMemoryAdjudicatorStore, InMemoryCaseStore,
        InMemoryScheduleStore, ScheduleStore,
    };
}
