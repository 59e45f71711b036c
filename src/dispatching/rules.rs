//! Built-in prioritization rules.
//!
//! # Score Convention
//! All rules return lower scores for cases that should be heard first.

use chrono::Datelike;

use super::{PriorityRule, RuleScore};
use crate::models::{Case, PriorityTier};

/// Criminal cases before all others.
///
/// Score: 1 for case type exactly "Criminal", 2 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct CriminalFirst;

impl PriorityRule for CriminalFirst {
    fn name(&self) -> &'static str {
        "CRIMINAL_FIRST"
    }

    fn evaluate(&self, case: &Case) -> RuleScore {
        if case.is_criminal() {
            1.0
        } else {
            2.0
        }
    }

    fn description(&self) -> &'static str {
        "Criminal Cases First"
    }
}

/// High priority before normal priority.
///
/// Score: 0 for `High`, 1 for `Normal`.
#[derive(Debug, Clone, Copy)]
pub struct HighPriorityFirst;

impl PriorityRule for HighPriorityFirst {
    fn name(&self) -> &'static str {
        "HIGH_PRIORITY_FIRST"
    }

    fn evaluate(&self, case: &Case) -> RuleScore {
        match case.priority {
            PriorityTier::High => 0.0,
            PriorityTier::Normal => 1.0,
        }
    }

    fn description(&self) -> &'static str {
        "High Priority First"
    }
}

/// Earliest filing date first; undated cases last.
///
/// Not part of the default policy.
#[derive(Debug, Clone, Copy)]
pub struct OldestFiling;

impl PriorityRule for OldestFiling {
    fn name(&self) -> &'static str {
        "OLDEST_FILING"
    }

    fn evaluate(&self, case: &Case) -> RuleScore {
        case.filing_date
            .map(|d| f64::from(d.num_days_from_ce()))
            .unwrap_or(f64::MAX)
    }

    fn description(&self) -> &'static str {
        "Oldest Filing First"
    }
}
