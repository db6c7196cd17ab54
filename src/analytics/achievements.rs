//! Achievement badges.
//!
//! Badges are re-derived from the current state on every call; nothing
//! about them is persisted.

use super::{stats, Stats};
use crate::core::{ChallengeState, WeekNumber, TOTAL_DAYS};
use serde::Serialize;

/// Number of badges in the catalog.
pub const ACHIEVEMENT_COUNT: usize = 10;

/// A badge and whether the current state has earned it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
}

struct Badge {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    earned: fn(&Stats, &ChallengeState) -> bool,
}

fn week_completed(state: &ChallengeState, week: WeekNumber) -> bool {
    state.weeks.get(week).completed()
}

const BADGES: [Badge; ACHIEVEMENT_COUNT] = [
    Badge {
        id: "first-day",
        title: "First Steps",
        description: "Completed your first day",
        icon: "🎯",
        earned: |stats, _| stats.completed_days >= 1,
    },
    Badge {
        id: "week-one",
        title: "Foundation Builder",
        description: "Completed Week 1 challenges",
        icon: "🏗️",
        earned: |_, state| week_completed(state, WeekNumber::One),
    },
    Badge {
        id: "three-day-streak",
        title: "Momentum Builder",
        description: "Maintained a 3-day streak",
        icon: "🔥",
        earned: |stats, _| stats.best_streak >= 3,
    },
    Badge {
        id: "week-two",
        title: "Discipline Master",
        description: "Completed Week 2 challenges",
        icon: "⚡",
        earned: |_, state| week_completed(state, WeekNumber::Two),
    },
    Badge {
        id: "seven-day-streak",
        title: "Consistency Champion",
        description: "Maintained a 7-day streak",
        icon: "💪",
        earned: |stats, _| stats.best_streak >= 7,
    },
    Badge {
        id: "week-three",
        title: "Momentum Keeper",
        description: "Completed Week 3 challenges",
        icon: "🚀",
        earned: |_, state| week_completed(state, WeekNumber::Three),
    },
    Badge {
        id: "halfway",
        title: "Halfway Hero",
        description: "Reached Day 14",
        icon: "🎯",
        earned: |stats, _| stats.completed_days >= 14,
    },
    Badge {
        id: "week-four",
        title: "Integration Expert",
        description: "Completed Week 4 challenges",
        icon: "👑",
        earned: |_, state| week_completed(state, WeekNumber::Four),
    },
    Badge {
        id: "perfect-week",
        title: "Perfect Week",
        description: "Completed all 7 days in a week",
        icon: "⭐",
        earned: |_, state| state.days.iter().take(TOTAL_DAYS).any(|d| d.completed()),
    },
    Badge {
        id: "full-challenge",
        title: "Challenge Complete",
        description: "Finished all 28 days",
        icon: "🏆",
        earned: |stats, _| stats.completed_days >= TOTAL_DAYS,
    },
];

/// Evaluate every badge, in catalog order.
pub fn achievements(state: &ChallengeState) -> Vec<Achievement> {
    let stats = stats(state);
    BADGES
        .iter()
        .map(|badge| Achievement {
            id: badge.id,
            title: badge.title,
            description: badge.description,
            icon: badge.icon,
            unlocked: (badge.earned)(&stats, state),
        })
        .collect()
}
