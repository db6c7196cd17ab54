//! Structural violations found in a decoded snapshot.

use thiserror::Error;

/// One way a snapshot can break the fixed shape of a challenge
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShapeViolation {
    #[error("Expected {expected} days, found {found}")]
    DayCount { expected: usize, found: usize },

    #[error("Week {week} expects {expected} tasks, found {found}")]
    TaskCount {
        week: u8,
        expected: usize,
        found: usize,
    },

    #[error("Snapshot version is empty")]
    MissingVersion,
}
