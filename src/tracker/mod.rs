//! The imperative shell around the pure core.
//!
//! [`Tracker`] is the one place the challenge state changes. Every mutation
//! follows the same sequence:
//!
//! 1. merge the partial update into the state
//! 2. persist the snapshot (`saved` or `save-error`)
//! 3. notify listeners of the change
//! 4. evaluate the unlock rules, opening any week whose guard now passes
//!
//! Everything runs synchronously on the caller's thread.

mod events;
mod machine;
mod unlock;

pub use events::{ChallengeEvent, Listener, ListenerId, Listeners};
pub use machine::Tracker;
pub use unlock::{pending_unlocks, unlock_rules, UnlockRule};
