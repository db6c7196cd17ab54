//! Shape rules for challenge snapshots using Validation.

use crate::core::{ChallengeState, TOTAL_DAYS};
use crate::enforcement::violations::ShapeViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of checking a snapshot: success, or every violation found.
pub type ShapeCheck = Validation<(), NonEmptyVec<ShapeViolation>>;

/// Check a decoded snapshot against the fixed program shape,
/// accumulating ALL violations.
pub fn check_snapshot(state: &ChallengeState) -> ShapeCheck {
    let mut checks: Vec<ShapeCheck> = Vec::new();

    checks.push(if state.version.trim().is_empty() {
        Validation::fail(ShapeViolation::MissingVersion)
    } else {
        Validation::success(())
    });

    checks.push(if state.days.len() == TOTAL_DAYS {
        Validation::success(())
    } else {
        Validation::fail(ShapeViolation::DayCount {
            expected: TOTAL_DAYS,
            found: state.days.len(),
        })
    });

    for (week, record) in state.weeks.iter() {
        let expected = week.task_count();
        checks.push(if record.tasks.len() == expected {
            Validation::success(())
        } else {
            Validation::fail(ShapeViolation::TaskCount {
                week: week.number(),
                expected,
                found: record.tasks.len(),
            })
        });
    }

    Validation::all_vec(checks).map(|_| ())
}
