//! State trait and the per-week lock machine.
//!
//! Every week of the program moves through a two-state machine,
//! `Locked -> Unlocked`, and never moves back except through a full reset.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States represent immutable
/// values that describe the current position in a state machine.
///
/// # Example
///
/// ```rust
/// use followthrough::core::{State, WeekStatus};
///
/// assert_eq!(WeekStatus::Locked.name(), "Locked");
/// assert!(WeekStatus::Unlocked.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Final states represent completion points in the state machine
    /// where no further transitions are expected.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Lock status of a single week.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum WeekStatus {
    Locked,
    Unlocked,
}

impl WeekStatus {
    pub fn from_unlocked(unlocked: bool) -> Self {
        if unlocked {
            Self::Unlocked
        } else {
            Self::Locked
        }
    }

    pub fn is_unlocked(self) -> bool {
        matches!(self, Self::Unlocked)
    }
}

impl State for WeekStatus {
    fn name(&self) -> &str {
        match self {
            Self::Locked => "Locked",
            Self::Unlocked => "Unlocked",
        }
    }

    /// Unlocking is monotonic, so `Unlocked` is terminal.
    fn is_final(&self) -> bool {
        matches!(self, Self::Unlocked)
    }
}
