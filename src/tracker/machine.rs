//! The tracker: owner of the challenge state and its only mutation path.

use crate::analytics::{self, Achievement, BaselineStat, DayProgress, Stats, WeekProgress};
use crate::core::{
    today, ChallengeState, DayUpdate, SettingsUpdate, State, WeekNumber, WeekStatus, WeekUpdate,
};
use crate::storage::{load_state, save_state, StorageSlot};
use crate::tracker::events::{ChallengeEvent, ListenerId, Listeners};
use crate::tracker::unlock::{pending_unlocks, unlock_rules, UnlockRule};
use chrono::NaiveDate;
use tracing::{debug, error, info};

/// Owns the challenge state, persists it after every mutation and tells
/// listeners what changed.
///
/// Each mutation runs to completion (merge, save, notify, unlock check)
/// before returning. A listener that panics cannot undo a mutation; the
/// state has already been changed and saved by the time it runs. The unlock
/// check of that mutation is skipped and happens on the next one.
pub struct Tracker<S: StorageSlot> {
    state: ChallengeState,
    slot: S,
    rules: Vec<UnlockRule>,
    listeners: Listeners,
}

impl<S: StorageSlot> Tracker<S> {
    /// Load state from `slot`, starting fresh if it is empty or unusable.
    pub fn open(slot: S) -> Self {
        let state = load_state(&slot);
        Self::with_state(slot, state)
    }

    /// Wrap an already loaded state. Nothing is written until the first
    /// mutation.
    pub fn with_state(slot: S, state: ChallengeState) -> Self {
        Self {
            state,
            slot,
            rules: unlock_rules(),
            listeners: Listeners::new(),
        }
    }

    /// Get current state (pure)
    pub fn state(&self) -> &ChallengeState {
        &self.state
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn into_slot(self) -> S {
        self.slot
    }

    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ChallengeEvent) + Send + 'static,
    {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Merge `update` into day `day_index` (0..=27).
    ///
    /// Returns false, without saving or notifying, for an out-of-range index.
    pub fn update_day(&mut self, day_index: usize, update: DayUpdate) -> bool {
        let Some(day) = self.state.days.get_mut(day_index) else {
            debug!(day_index, "ignoring update for unknown day");
            return false;
        };
        update.apply_to(day);

        self.save();
        self.listeners
            .notify(&ChallengeEvent::DayUpdated { day_index, update });
        self.check_week_unlock();
        true
    }

    /// Merge `update` into week `week` (1..=4).
    ///
    /// Returns false, without saving or notifying, for an unknown week.
    pub fn update_week(&mut self, week: u8, update: WeekUpdate) -> bool {
        let Some(week) = WeekNumber::from_number(week) else {
            debug!(week, "ignoring update for unknown week");
            return false;
        };
        self.apply_week_update(week, update);
        self.check_week_unlock();
        true
    }

    fn apply_week_update(&mut self, week: WeekNumber, update: WeekUpdate) {
        update.apply_to(week, self.state.weeks.get_mut(week));
        self.save();
        self.listeners
            .notify(&ChallengeEvent::WeekUpdated { week, update });
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) {
        update.apply_to(&mut self.state.settings);
        self.save();
        self.listeners.notify(&ChallengeEvent::Updated(update));
    }

    /// Run every unlock rule in week order and open the weeks whose guards
    /// pass. Returns the weeks unlocked by this call.
    pub fn check_week_unlock(&mut self) -> Vec<WeekNumber> {
        let unlocked = pending_unlocks(&self.rules, &self.state);
        for &week in &unlocked {
            log_transition(week, WeekStatus::Locked, WeekStatus::Unlocked);
            self.apply_week_update(week, WeekUpdate::new().unlocked(true));
            self.listeners.notify(&ChallengeEvent::WeekUnlocked(week));
        }
        unlocked
    }

    /// Discard all progress and start a new program today.
    ///
    /// Unconditional; asking the user belongs to the caller.
    pub fn reset(&mut self) {
        self.reset_at(today());
    }

    /// [`reset`](Self::reset) with an explicit start date.
    pub fn reset_at(&mut self, start_date: NaiveDate) {
        info!(%start_date, "resetting challenge");
        self.state = ChallengeState::new(start_date);
        self.save();
        self.listeners.notify(&ChallengeEvent::Reset);
    }

    /// Reset only if `confirm` agrees. Returns whether the reset happened.
    pub fn reset_challenge<F>(&mut self, confirm: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return false;
        }
        self.reset();
        true
    }

    /// Write the current state to the slot.
    ///
    /// Failure is reported as a `save-error` event, never to the caller;
    /// the in-memory state stays authoritative. Returns whether the write
    /// succeeded.
    pub fn save(&mut self) -> bool {
        match save_state(&mut self.slot, &self.state) {
            Ok(()) => {
                self.listeners.notify(&ChallengeEvent::Saved);
                true
            }
            Err(err) => {
                error!(error = %err, "failed to save challenge state");
                self.listeners
                    .notify(&ChallengeEvent::SaveError(err.to_string()));
                false
            }
        }
    }

    pub fn stats(&self) -> Stats {
        analytics::stats(&self.state)
    }

    pub fn baseline_stats(&self) -> Vec<BaselineStat> {
        analytics::baseline_stats(&self.state)
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        analytics::achievements(&self.state)
    }

    pub fn daily_progress(&self) -> Vec<DayProgress> {
        analytics::daily_progress(&self.state)
    }

    pub fn weekly_progress(&self) -> Vec<WeekProgress> {
        analytics::weekly_progress(&self.state)
    }

    /// Index of today's program day, derived from the start date.
    pub fn active_day_index(&self) -> usize {
        self.state.active_day_index(today())
    }
}

fn log_transition<T: State>(week: WeekNumber, from: T, to: T) {
    debug!(week = week.number(), from = from.name(), to = to.name(), "week transition");
}

impl<S: StorageSlot + std::fmt::Debug> std::fmt::Debug for Tracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("state", &self.state)
            .field("slot", &self.slot)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Reflection, Theme, BASELINE_COUNT};
    use crate::storage::{MemorySlot, StorageError};
    use std::sync::{Arc, Mutex};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn tracker() -> Tracker<MemorySlot> {
        Tracker::with_state(MemorySlot::new(), ChallengeState::new(start()))
    }

    fn record_events<S: StorageSlot>(tracker: &mut Tracker<S>) -> Arc<Mutex<Vec<&'static str>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        tracker.add_listener(move |e: &ChallengeEvent| sink.lock().unwrap().push(e.name()));
        events
    }

    struct BrokenSlot;

    impl StorageSlot for BrokenSlot {
        fn read(&self) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&mut self, _payload: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn update_day_saves_then_notifies() {
        let mut tracker = tracker();
        let events = record_events(&mut tracker);

        assert!(tracker.update_day(3, DayUpdate::new().mood("6").win("walked")));

        assert_eq!(*events.lock().unwrap(), vec!["saved", "day-updated"]);
        assert_eq!(tracker.state().days[3].mood, "6");
        assert!(tracker.slot().payload().unwrap().contains("walked"));
    }

    #[test]
    fn completed_follows_items_without_caller_help() {
        let mut tracker = tracker();

        tracker.update_day(0, DayUpdate::new().items([true; BASELINE_COUNT]));
        assert!(tracker.state().days[0].completed());

        let mut items = [true; BASELINE_COUNT];
        items[2] = false;
        tracker.update_day(0, DayUpdate::new().items(items));
        assert!(!tracker.state().days[0].completed());
    }

    #[test]
    fn out_of_range_updates_are_silent() {
        let mut tracker = tracker();
        let events = record_events(&mut tracker);
        let before = tracker.state().clone();

        assert!(!tracker.update_day(28, DayUpdate::new().win("x")));
        assert!(!tracker.update_week(0, WeekUpdate::new().unlocked(true)));
        assert!(!tracker.update_week(5, WeekUpdate::new().unlocked(true)));

        assert!(events.lock().unwrap().is_empty());
        assert_eq!(tracker.state(), &before);
        assert!(tracker.slot().payload().is_none());
    }

    #[test]
    fn week_two_unlocks_tasks_first() {
        let mut tracker = tracker();
        let events = record_events(&mut tracker);

        tracker.update_week(1, WeekUpdate::new().tasks(vec![true; 4]));
        assert!(!tracker.state().weeks.two.unlocked);

        tracker.update_day(6, DayUpdate::new().items([true; BASELINE_COUNT]));
        assert!(tracker.state().weeks.two.unlocked);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "saved",
                "week-updated",
                "saved",
                "day-updated",
                "saved",
                "week-updated",
                "week-unlocked",
            ]
        );
    }

    #[test]
    fn week_two_unlocks_day_first() {
        let mut tracker = tracker();

        tracker.update_day(6, DayUpdate::new().items([true; BASELINE_COUNT]));
        assert!(!tracker.state().weeks.two.unlocked);

        tracker.update_week(1, WeekUpdate::new().tasks(vec![true; 4]));
        assert!(tracker.state().weeks.two.unlocked);
        assert!(!tracker.state().weeks.three.unlocked);
    }

    #[test]
    fn unlock_is_monotonic() {
        let mut tracker = tracker();
        tracker.update_week(1, WeekUpdate::new().tasks(vec![true; 4]));
        tracker.update_day(6, DayUpdate::new().items([true; BASELINE_COUNT]));
        assert!(tracker.state().weeks.two.unlocked);

        tracker.update_day(6, DayUpdate::new().items([false; BASELINE_COUNT]));
        tracker.update_week(1, WeekUpdate::new().tasks(vec![false; 4]));
        tracker.update_week(2, WeekUpdate::new().unlocked(false));

        assert!(tracker.state().weeks.two.unlocked);
    }

    #[test]
    fn explicit_check_reports_unlocked_weeks() {
        let mut state = ChallengeState::new(start());
        state.weeks.two.tasks = vec![true; 5];
        state.days[13].items = [true; BASELINE_COUNT];
        let mut tracker = Tracker::with_state(MemorySlot::new(), state);

        assert_eq!(tracker.check_week_unlock(), vec![WeekNumber::Three]);
        assert!(tracker.check_week_unlock().is_empty());
    }

    #[test]
    fn week_text_fields_merge() {
        let mut tracker = tracker();
        tracker.update_week(4, WeekUpdate::new().reflection(Reflection {
            changed: "mornings".to_string(),
            next: "running".to_string(),
        }));
        tracker.update_week(2, WeekUpdate::new().backlog("taxes"));

        let weeks = &tracker.state().weeks;
        assert_eq!(weeks.four.reflection.as_ref().unwrap().next, "running");
        assert_eq!(weeks.two.backlog.as_deref(), Some("taxes"));
        assert!(!weeks.two.unlocked);
    }

    #[test]
    fn save_failure_is_reported_not_raised() {
        let mut tracker = Tracker::with_state(BrokenSlot, ChallengeState::new(start()));
        let events = record_events(&mut tracker);

        assert!(tracker.update_day(0, DayUpdate::new().win("kept")));

        assert_eq!(*events.lock().unwrap(), vec!["save-error", "day-updated"]);
        assert_eq!(tracker.state().days[0].win, "kept");
        assert!(!tracker.save());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut tracker = tracker();
        tracker.update_day(0, DayUpdate::new().items([true; BASELINE_COUNT]).mood("8"));
        let events = record_events(&mut tracker);

        let new_start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        tracker.reset_at(new_start);

        let stats = tracker.stats();
        assert_eq!(stats.completed_days, 0);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.avg_mood, "-");
        assert_eq!(tracker.state().start_date, new_start);
        assert_eq!(*events.lock().unwrap(), vec!["saved", "reset"]);
    }

    #[test]
    fn declined_reset_changes_nothing() {
        let mut tracker = tracker();
        tracker.update_day(0, DayUpdate::new().win("keep me"));
        let events = record_events(&mut tracker);

        assert!(!tracker.reset_challenge(|| false));

        assert_eq!(tracker.state().days[0].win, "keep me");
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn confirmed_reset_starts_today() {
        let mut tracker = tracker();
        tracker.update_day(0, DayUpdate::new().win("gone"));

        assert!(tracker.reset_challenge(|| true));

        assert!(tracker.state().days[0].win.is_empty());
        assert_eq!(tracker.state().start_date, today());
    }

    #[test]
    fn settings_update_emits_updated() {
        let mut tracker = tracker();
        let events = record_events(&mut tracker);

        tracker.update_settings(SettingsUpdate {
            theme: Some(Theme::Dark),
            ..SettingsUpdate::default()
        });

        assert_eq!(tracker.state().settings.theme, Theme::Dark);
        assert_eq!(*events.lock().unwrap(), vec!["saved", "updated"]);
    }

    #[test]
    fn removed_listener_stops_receiving() {
        let mut tracker = tracker();
        let events = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&events);
        let id = tracker.add_listener(move |_: &ChallengeEvent| *sink.lock().unwrap() += 1);

        tracker.update_day(1, DayUpdate::new().mood("4"));
        assert!(tracker.remove_listener(id));
        tracker.update_day(1, DayUpdate::new().mood("5"));

        assert_eq!(*events.lock().unwrap(), 2);
    }

    #[test]
    fn panicking_listener_does_not_roll_back() {
        let mut tracker = tracker();
        tracker.update_week(1, WeekUpdate::new().tasks(vec![true; 4]));
        let id = tracker.add_listener(|_: &ChallengeEvent| panic!("listener failed"));

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            tracker.update_day(6, DayUpdate::new().items([true; BASELINE_COUNT]).win("kept"))
        }));

        assert!(outcome.is_err());
        assert!(tracker.state().days[6].completed());
        assert!(tracker.slot().payload().unwrap().contains("kept"));
        // The unlock check runs after notification, so it never got to run.
        assert!(!tracker.state().weeks.two.unlocked);

        assert!(tracker.remove_listener(id));
        assert_eq!(tracker.check_week_unlock(), vec![WeekNumber::Two]);
    }

    #[test]
    fn open_reads_existing_snapshot() {
        let mut first = tracker();
        first.update_day(9, DayUpdate::new().win("persisted"));

        let reopened = Tracker::open(first.into_slot());
        assert_eq!(reopened.state().days[9].win, "persisted");
        assert_eq!(reopened.state().start_date, start());
    }
}
