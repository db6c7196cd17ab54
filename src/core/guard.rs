//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions that determine whether a transition
//! can execute. The unlock rules are built from them.

use std::fmt;
use std::marker::PhantomData;

/// Pure predicate over some subject `T` that decides whether a transition
/// may fire.
///
/// # Example
///
/// ```rust
/// use followthrough::core::{ChallengeState, Guard};
///
/// let first_day_done = Guard::new(|s: &ChallengeState| s.days[0].completed());
///
/// assert!(!first_day_done.check(&ChallengeState::default()));
/// ```
pub struct Guard<T> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be pure (deterministic, no side effects) and
    /// thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Combine two guards; the result passes only when both pass.
    pub fn and(self, other: Guard<T>) -> Self
    where
        T: 'static,
    {
        Guard::new(move |subject: &T| self.check(subject) && other.check(subject))
    }

    /// Evaluate the predicate.
    pub fn check(&self, subject: &T) -> bool {
        (self.predicate)(subject)
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
