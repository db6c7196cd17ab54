//! Unlock rules for weeks 2 to 4.

use crate::core::{ChallengeState, Guard, State, WeekNumber};

/// Guarded `Locked -> Unlocked` transition for one week.
///
/// Week N opens once every task of week N-1 is done and the last day of
/// week N-1 (day 7, 14 or 21) is completed.
#[derive(Debug)]
pub struct UnlockRule {
    pub week: WeekNumber,
    pub guard: Guard<ChallengeState>,
}

impl UnlockRule {
    /// The rule for `week`, or `None` for week 1 which starts unlocked.
    pub fn for_week(week: WeekNumber) -> Option<Self> {
        let previous = week.previous()?;
        let tasks_done = Guard::new(move |s: &ChallengeState| s.weeks.get(previous).completed());
        let gate_day = previous.last_day_index();
        let day_done = Guard::new(move |s: &ChallengeState| {
            s.day(gate_day).is_some_and(|day| day.completed())
        });

        Some(Self {
            week,
            guard: tasks_done.and(day_done),
        })
    }

    /// Check if this transition can fire from the current state (pure).
    ///
    /// A week already in a final status never transitions again.
    pub fn can_execute(&self, state: &ChallengeState) -> bool {
        !state.weeks.get(self.week).status().is_final() && self.guard.check(state)
    }
}

/// Rules for weeks 2, 3 and 4, in evaluation order.
pub fn unlock_rules() -> Vec<UnlockRule> {
    WeekNumber::ALL
        .into_iter()
        .filter_map(UnlockRule::for_week)
        .collect()
}

/// Weeks whose rule would fire against `state` (pure).
pub fn pending_unlocks(rules: &[UnlockRule], state: &ChallengeState) -> Vec<WeekNumber> {
    rules
        .iter()
        .filter(|rule| rule.can_execute(state))
        .map(|rule| rule.week)
        .collect()
}
