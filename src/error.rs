//! Error types.
//!
//! Only [`ScheduleError::NoAdjudicatorsAvailable`] is an expected,
//! caller-visible failure. Unschedulable cases are reported through
//! [`RunOutcome`](crate::scheduler::RunOutcome) and model failures never
//! leave the estimator.

use std::path::PathBuf;

/// Failure reported by a store collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The write would violate a lifecycle rule.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Backend-specific failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Failure of a scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// No `Available` adjudicators at run start. Nothing was written.
    #[error("No adjudicators available")]
    NoAdjudicatorsAvailable,

    /// Reading the run snapshot or clearing prior entries failed.
    #[error("schedule store failure before allocation: {0}")]
    Store(#[from] StoreError),

    /// An entry/case write pair failed. `scheduled` assignments were
    /// committed before the failure; the remainder of the run was aborted.
    #[error("persistence failed after {scheduled} assignment(s) for case {case_number}: {source}")]
    Persistence {
        scheduled: usize,
        case_number: String,
        #[source]
        source: StoreError,
    },
}

impl ScheduleError {
    /// Number of assignments committed before the run failed.
    pub fn scheduled_count(&self) -> usize {
        match self {
            ScheduleError::Persistence { scheduled, .. } => *scheduled,
            _ => 0,
        }
    }
}

/// Configuration loading or validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
