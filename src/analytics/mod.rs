//! Read-only statistics over a [`ChallengeState`].
//!
//! Every function here is pure and cheap enough to call on each render.
//! Percentages round half-up. The mood average is the floating-point mean
//! shown with one decimal, rounding half-up on the mean's exact binary value,
//! so `5.25` shows as `"5.3"` while `1.15` (stored just below) shows `"1.1"`.

mod achievements;

pub use achievements::{achievements, Achievement, ACHIEVEMENT_COUNT};

use crate::core::{
    ChallengeState, DayRecord, Habit, WeekNumber, BASELINE_COUNT, BASELINE_HABITS, DAYS_PER_WEEK,
    TOTAL_DAYS,
};
use serde::Serialize;

/// Shown as the mood average when no day carries a valid mood.
pub const NO_MOOD: &str = "-";

/// Headline statistics for the whole program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub completed_days: usize,
    pub total_days: usize,
    /// Consecutive completed days counted from day 1.
    pub streak: usize,
    pub best_streak: usize,
    pub total_wins: usize,
    /// One decimal place, or [`NO_MOOD`].
    pub avg_mood: String,
    /// Percentage of all 196 checklist items ticked.
    pub completion_rate: u32,
    pub completed_weeks: usize,
    pub total_weeks: usize,
}

/// Per-habit tally across all days.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BaselineStat {
    pub habit: Habit,
    pub completed: usize,
    pub total: usize,
    pub rate: u32,
}

/// Checklist progress of a single day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayProgress {
    /// 1-based program day.
    pub day: usize,
    pub completed: usize,
    pub percentage: u32,
}

/// Completed days within one seven-day block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekProgress {
    pub week: WeekNumber,
    pub completed_days: usize,
    pub total: usize,
    pub percentage: u32,
}

/// Compute the headline statistics.
pub fn stats(state: &ChallengeState) -> Stats {
    let days = &state.days;

    Stats {
        completed_days: days.iter().filter(|d| d.completed()).count(),
        total_days: TOTAL_DAYS,
        streak: streak(days),
        best_streak: best_streak(days),
        total_wins: days.iter().filter(|d| d.has_win()).count(),
        avg_mood: average_mood(days),
        completion_rate: percent(total_habits(state), TOTAL_DAYS * BASELINE_COUNT),
        completed_weeks: state.weeks.iter().filter(|(_, w)| w.completed()).count(),
        total_weeks: WeekNumber::ALL.len(),
    }
}

/// Completed days from day 1 up to the first incomplete one.
pub fn streak(days: &[DayRecord]) -> usize {
    days.iter().take_while(|d| d.completed()).count()
}

/// Longest run of completed days anywhere in the program.
pub fn best_streak(days: &[DayRecord]) -> usize {
    days.iter()
        .fold((0, 0), |(best, run), day| {
            if day.completed() {
                (best.max(run + 1), run + 1)
            } else {
                (best, 0)
            }
        })
        .0
}

/// Ticked checklist items across every day.
pub fn total_habits(state: &ChallengeState) -> usize {
    state.days.iter().map(DayRecord::completed_items).sum()
}

fn average_mood(days: &[DayRecord]) -> String {
    let (sum, count) = days
        .iter()
        .filter_map(DayRecord::mood_score)
        .fold((0usize, 0usize), |(sum, count), mood| {
            (sum + usize::from(mood), count + 1)
        });

    if count == 0 {
        return NO_MOOD.to_string();
    }
    let mean = sum as f64 / count as f64;
    match fixed_tenths(mean) {
        Some(tenths) => format!("{}.{}", tenths / 10, tenths % 10),
        None => NO_MOOD.to_string(),
    }
}

/// `value` in tenths, rounded half-up on its exact binary expansion.
///
/// Float formatting with a precision prints exact digits, and 60 places
/// cover every fraction bit of a mean in 1..=10.
fn fixed_tenths(value: f64) -> Option<u64> {
    let exact = format!("{value:.60}");
    let (whole, fraction) = exact.split_once('.')?;
    let mut digits = fraction.bytes().map(|b| u64::from(b.wrapping_sub(b'0')));
    let tenth = digits.next()?;
    let round_up = digits.next()? >= 5;
    Some(whole.parse::<u64>().ok()? * 10 + tenth + u64::from(round_up))
}

/// Per-habit completion, one entry per baseline habit in checklist order.
pub fn baseline_stats(state: &ChallengeState) -> Vec<BaselineStat> {
    BASELINE_HABITS
        .iter()
        .enumerate()
        .map(|(index, habit)| {
            let total = state
                .days
                .iter()
                .filter(|d| d.items.get(index).is_some())
                .count();
            let completed = state.days.iter().filter(|d| d.items[index]).count();
            BaselineStat {
                habit: *habit,
                completed,
                total,
                rate: percent(completed, total),
            }
        })
        .collect()
}

/// Items ticked on each of the 28 days.
pub fn daily_progress(state: &ChallengeState) -> Vec<DayProgress> {
    state
        .days
        .iter()
        .enumerate()
        .map(|(index, day)| {
            let completed = day.completed_items();
            DayProgress {
                day: index + 1,
                completed,
                percentage: percent(completed, BASELINE_COUNT),
            }
        })
        .collect()
}

/// Completed days inside each weekly block.
pub fn weekly_progress(state: &ChallengeState) -> Vec<WeekProgress> {
    WeekNumber::ALL
        .into_iter()
        .map(|week| {
            let completed_days = state
                .days
                .iter()
                .skip(usize::from(week.number() - 1) * DAYS_PER_WEEK)
                .take(DAYS_PER_WEEK)
                .filter(|d| d.completed())
                .count();
            WeekProgress {
                week,
                completed_days,
                total: DAYS_PER_WEEK,
                percentage: percent(completed_days, DAYS_PER_WEEK),
            }
        })
        .collect()
}

/// `round(100 * part / whole)` with halves rounded up; 0 for an empty whole.
pub(crate) fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let rounded = (200 * part + whole) / (2 * whole);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChallengeState;
    use chrono::NaiveDate;

    fn fresh() -> ChallengeState {
        ChallengeState::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    fn complete(state: &mut ChallengeState, indices: impl IntoIterator<Item = usize>) {
        for index in indices {
            state.days[index].items = [true; BASELINE_COUNT];
        }
    }

    #[test]
    fn fresh_state_has_empty_stats() {
        let stats = stats(&fresh());

        assert_eq!(stats.completed_days, 0);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.best_streak, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.avg_mood, NO_MOOD);
        assert_eq!(stats.total_days, 28);
        assert_eq!(stats.total_weeks, 4);
    }

    #[test]
    fn streak_counts_from_day_one() {
        let mut state = fresh();
        complete(&mut state, [0, 1, 2, 5, 6, 7, 8]);

        let stats = stats(&state);
        assert_eq!(stats.streak, 3);
        assert_eq!(stats.best_streak, 4);
        assert_eq!(stats.completed_days, 7);
    }

    #[test]
    fn streak_is_zero_when_day_one_incomplete() {
        let mut state = fresh();
        complete(&mut state, 1..10);

        let stats = stats(&state);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.best_streak, 9);
    }

    #[test]
    fn full_program_streak() {
        let mut state = fresh();
        complete(&mut state, 0..TOTAL_DAYS);

        let stats = stats(&state);
        assert_eq!(stats.streak, 28);
        assert_eq!(stats.best_streak, 28);
        assert_eq!(stats.completion_rate, 100);
    }

    #[test]
    fn avg_mood_skips_invalid_samples() {
        let mut state = fresh();
        for (index, mood) in ["3", "bad", "11", "7"].into_iter().enumerate() {
            state.days[index].mood = mood.to_string();
        }

        assert_eq!(stats(&state).avg_mood, "5.0");
    }

    #[test]
    fn avg_mood_rounds_half_up() {
        let mut state = fresh();
        for (index, mood) in ["5", "5", "5", "6"].into_iter().enumerate() {
            state.days[index].mood = mood.to_string();
        }

        assert_eq!(stats(&state).avg_mood, "5.3");
    }

    #[test]
    fn avg_mood_rounds_on_binary_value() {
        let mut state = fresh();
        for day in &mut state.days[..17] {
            day.mood = "1".to_string();
        }
        for day in &mut state.days[17..20] {
            day.mood = "2".to_string();
        }

        // 23 / 20 is stored as 1.149999..., so it stays at 1.1.
        assert_eq!(stats(&state).avg_mood, "1.1");
    }

    #[test]
    fn fixed_tenths_carries_into_whole() {
        assert_eq!(fixed_tenths(9.96), Some(100));
        assert_eq!(fixed_tenths(7.0), Some(70));
        assert_eq!(fixed_tenths(2.75), Some(28));
    }

    #[test]
    fn completion_rate_rounds_over_all_items() {
        let mut state = fresh();
        state.days[0].items[0] = true;
        assert_eq!(stats(&state).completion_rate, 1);

        complete(&mut state, 0..14);
        assert_eq!(stats(&state).completion_rate, 50);
    }

    #[test]
    fn wins_require_text() {
        let mut state = fresh();
        state.days[0].win = "ran 5k".to_string();
        state.days[1].win = "  ".to_string();

        assert_eq!(stats(&state).total_wins, 1);
    }

    #[test]
    fn completed_weeks_counts_finished_checklists() {
        let mut state = fresh();
        state.weeks.one.tasks = vec![true; 4];
        state.weeks.three.tasks = vec![true; 5];

        assert_eq!(stats(&state).completed_weeks, 2);
    }

    #[test]
    fn baseline_stats_per_habit() {
        let mut state = fresh();
        for day in state.days.iter_mut().take(7) {
            day.items[0] = true;
        }
        state.days[0].items[6] = true;

        let baseline = baseline_stats(&state);
        assert_eq!(baseline.len(), 7);
        assert_eq!(baseline[0].habit.id, "morning");
        assert_eq!(baseline[0].completed, 7);
        assert_eq!(baseline[0].total, 28);
        assert_eq!(baseline[0].rate, 25);
        assert_eq!(baseline[6].completed, 1);
        assert_eq!(baseline[6].rate, 4);
        assert_eq!(baseline[3].rate, 0);
    }

    #[test]
    fn daily_and_weekly_progress() {
        let mut state = fresh();
        state.days[3].items = [true, true, true, false, false, false, false];
        complete(&mut state, [7, 8, 9]);

        let daily = daily_progress(&state);
        assert_eq!(daily.len(), 28);
        assert_eq!(daily[3].day, 4);
        assert_eq!(daily[3].completed, 3);
        assert_eq!(daily[3].percentage, 43);

        let weekly = weekly_progress(&state);
        assert_eq!(weekly.len(), 4);
        assert_eq!(weekly[0].completed_days, 0);
        assert_eq!(weekly[1].week, WeekNumber::Two);
        assert_eq!(weekly[1].completed_days, 3);
        assert_eq!(weekly[1].percentage, 43);
        assert_eq!(total_habits(&state), 24);
    }

    #[test]
    fn percent_handles_empty_whole() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(1, 8), 13);
    }
}
