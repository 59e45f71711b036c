//! Case prioritization rules and rule engine.
//!
//! Orders the pending backlog before allocation. The default policy is
//! criminal cases first, then high priority first, with ties kept in
//! backlog order.
//!
//! # Usage
//!
//! ```
//! use u_hearing::dispatching::prioritize;
//! use u_hearing::models::{Case, PriorityTier};
//!
//! let backlog = vec![
//!     Case::new("CV-1", "Civil"),
//!     Case::new("CR-1", "Criminal"),
//!     Case::new("CV-2", "Civil").with_priority(PriorityTier::High),
//! ];
//! let ordered = prioritize(backlog);
//! let numbers: Vec<_> = ordered.iter().map(|c| c.case_number.as_str()).collect();
//! assert_eq!(numbers, ["CR-1", "CV-2", "CV-1"]);
//! ```

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::Case;
use std::fmt::Debug;

/// Score returned by a prioritization rule.
///
/// Lower scores = heard earlier.
pub type RuleScore = f64;

/// A rule that ranks cases.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait PriorityRule: Send + Sync + Debug {
    /// Rule name (e.g., "CRIMINAL_FIRST").
    fn name(&self) -> &'static str;

    /// Evaluates a case. Lower = earlier.
    fn evaluate(&self, case: &Case) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Orders cases with the default policy.
///
/// Stable: cases with equal keys keep their relative backlog order.
pub fn prioritize(cases: Vec<Case>) -> Vec<Case> {
    RuleEngine::default_policy().sort(cases)
}
