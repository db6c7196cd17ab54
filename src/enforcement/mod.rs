//! Validation-based shape enforcement for stored snapshots.
//!
//! A snapshot that decodes cleanly can still break the fixed shape of the
//! program (28 days, 4/5/5/5 tasks). Checks use Stillwater's `Validation`
//! so every violation is reported at once instead of only the first.
//!
//! # Example
//!
//! ```rust
//! use followthrough::core::ChallengeState;
//! use followthrough::enforcement::check_snapshot;
//!
//! let mut state = ChallengeState::default();
//! assert!(check_snapshot(&state).is_success());
//!
//! state.days.pop();
//! state.weeks.two.tasks.clear();
//! assert!(check_snapshot(&state).is_failure());
//! ```

pub mod rules;
pub mod violations;

pub use rules::{check_snapshot, ShapeCheck};
pub use violations::ShapeViolation;
