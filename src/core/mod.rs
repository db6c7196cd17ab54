//! Core challenge types and logic.
//!
//! This module contains the pure core of the tracker:
//! - The challenge aggregate (days, weeks, settings)
//! - The per-week lock machine via the `State` trait
//! - Guard predicates for transition control
//!
//! Derived flags such as a day's or week's `completed` are computed on
//! access and never stored.

mod challenge;
mod day;
mod guard;
mod state;
mod week;

pub use challenge::{
    today, ChallengeState, Settings, SettingsUpdate, Theme, SCHEMA_VERSION, TOTAL_DAYS,
};
pub use day::{DayRecord, DayUpdate, Habit, BASELINE_COUNT, BASELINE_HABITS, MOOD_RANGE};
pub use guard::Guard;
pub use state::{State, WeekStatus};
pub use week::{
    fit_tasks, Reflection, UnknownWeek, WeekNumber, WeekRecord, WeekUpdate, Weeks, DAYS_PER_WEEK,
};
