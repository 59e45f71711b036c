//! Input validation for scheduling runs.
//!
//! Checks the run snapshot before allocation. Detects:
//! - Duplicate case numbers or adjudicator IDs
//! - Empty identifiers
//! - Cases with no case type
//! - Adjudicators with zero daily capacity
//!
//! Findings are advisory. The scheduler logs them and proceeds; a duplicate
//! case number, for instance, still yields one entry per snapshot row.

use crate::models::{Adjudicator, Case};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two records share the same identifier.
    DuplicateId,
    /// A record has an empty identifier.
    EmptyId,
    /// A case has no case type.
    MissingCaseType,
    /// An adjudicator has zero daily capacity.
    ZeroCapacity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the case and adjudicator pools for one run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_pools(cases: &[Case], adjudicators: &[Adjudicator]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut adjudicator_ids = HashSet::new();
    for a in adjudicators {
        if a.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Adjudicator '{}' has an empty ID", a.name),
            ));
        } else if !adjudicator_ids.insert(a.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate adjudicator ID: {}", a.id),
            ));
        }

        if a.daily_capacity_minutes == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Adjudicator '{}' has zero daily capacity", a.id),
            ));
        }
    }

    let mut case_numbers = HashSet::new();
    for c in cases {
        if c.case_number.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Case with an empty case number",
            ));
        } else if !case_numbers.insert(c.case_number.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate case number: {}", c.case_number),
            ));
        }

        if c.case_type.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingCaseType,
                format!("Case '{}' has no case type", c.case_number),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
