//! Rule engine for multi-criteria case ordering.
//!
//! Rules are applied in sequence; a later rule is consulted only when all
//! earlier rules tie.

use std::cmp::Ordering;
use std::sync::Arc;

use super::rules::{CriminalFirst, HighPriorityFirst};
use super::{PriorityRule, RuleScore};
use crate::models::Case;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep backlog order (default).
    #[default]
    Stable,
    /// Lexicographic by case number.
    ByCaseNumber,
}

/// A composable, stable rule engine.
///
/// # Example
/// ```
/// use u_hearing::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::CriminalFirst)
///     .with_rule(rules::HighPriorityFirst)
///     .with_rule(rules::OldestFiling);
/// assert_eq!(engine.rule_names(), ["CRIMINAL_FIRST", "HIGH_PRIORITY_FIRST", "OLDEST_FILING"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn PriorityRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Stable,
            epsilon: 1e-9,
        }
    }

    /// Criminal first, then high priority first, ties in backlog order.
    pub fn default_policy() -> Self {
        Self::new()
            .with_rule(CriminalFirst)
            .with_rule(HighPriorityFirst)
    }

    /// Appends a rule.
    pub fn with_rule<R: PriorityRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns indices into `cases`, highest priority first.
    pub fn sort_indices(&self, cases: &[Case]) -> Vec<usize> {
        let keys: Vec<Vec<RuleScore>> = cases.iter().map(|c| self.evaluate(c)).collect();
        let mut indices: Vec<usize> = (0..cases.len()).collect();
        // `sort_by` is stable, which keeps backlog order on full ties.
        indices.sort_by(|&a, &b| self.compare(&keys[a], &keys[b], &cases[a], &cases[b]));
        indices
    }

    /// Consumes and reorders cases, highest priority first.
    pub fn sort(&self, cases: Vec<Case>) -> Vec<Case> {
        let order = self.sort_indices(&cases);
        let mut slots: Vec<Option<Case>> = cases.into_iter().map(Some).collect();
        order.into_iter().filter_map(|i| slots[i].take()).collect()
    }

    /// Scores from each rule for one case.
    pub fn evaluate(&self, case: &Case) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(case)).collect()
    }

    fn compare(&self, ka: &[RuleScore], kb: &[RuleScore], a: &Case, b: &Case) -> Ordering {
        for (sa, sb) in ka.iter().zip(kb) {
            if (sa - sb).abs() > self.epsilon {
                return sa.partial_cmp(sb).unwrap_or(Ordering::Equal);
            }
        }

        match self.tie_breaker {
            TieBreaker::Stable => Ordering::Equal,
            TieBreaker::ByCaseNumber => a.case_number.cmp(&b.case_number),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::default_policy()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
