//! Followthrough: progress engine for a 28-day habit challenge
//!
//! The challenge is a fixed program of 28 days, each with a seven-item habit
//! checklist, and four sequential weekly blocks with their own task lists.
//! This crate owns the rules: how progress is stored and migrated, when a
//! week unlocks, and what statistics and badges follow from the raw data.
//! Presentation is left to whoever consumes it.
//!
//! # Core Concepts
//!
//! - **Core**: the pure data model, with derived flags computed on access
//! - **Tracker**: the single owner of the state; mutates, persists, notifies
//! - **Unlock rules**: guarded `Locked -> Unlocked` transitions per week
//! - **Analytics**: read-only stats and achievements
//! - **Storage**: one durable JSON slot with legacy migration
//!
//! # Example
//!
//! ```rust
//! use followthrough::core::{DayUpdate, WeekUpdate, BASELINE_COUNT};
//! use followthrough::storage::MemorySlot;
//! use followthrough::Tracker;
//!
//! let mut tracker = Tracker::open(MemorySlot::new());
//!
//! tracker.update_week(1, WeekUpdate::new().tasks(vec![true; 4]));
//! tracker.update_day(6, DayUpdate::new().items([true; BASELINE_COUNT]));
//!
//! assert!(tracker.state().weeks.two.unlocked);
//! assert_eq!(tracker.stats().completed_days, 1);
//! ```

pub mod analytics;
pub mod config;
pub mod core;
pub mod enforcement;
pub mod storage;
pub mod tracker;

// Re-export commonly used types
pub use analytics::{Achievement, BaselineStat, Stats};
pub use config::TrackerConfig;
pub use core::{ChallengeState, DayRecord, DayUpdate, WeekNumber, WeekRecord, WeekUpdate};
pub use storage::{FileSlot, MemorySlot, StorageError, StorageSlot};
pub use tracker::{ChallengeEvent, ListenerId, Tracker};
