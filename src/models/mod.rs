//! Hearing scheduling domain models.
//!
//! Provides the data types shared by the prioritizer, the allocator, and
//! the stores.
//!
//! # Domain Mappings
//!
//! | u-hearing | Generic scheduling |
//! |-----------|--------------------|
//! | Case | Task / Job |
//! | Adjudicator | Resource |
//! | ScheduleEntry | Assignment |
//! | TimeWindow | Availability window |

mod adjudicator;
mod calendar;
mod case;
mod entry;

pub use adjudicator::{Adjudicator, AdjudicatorStatus, DEFAULT_DAILY_CAPACITY_MINUTES};
pub use calendar::{ClockTime, ParseClockTimeError, TimeWindow};
pub use case::{Case, CaseStatus, PriorityTier};
pub use entry::{EntryStatus, RiskLevel, ScheduleEntry, Venue};
