//! Weekly challenge blocks.
//!
//! The program has four sequential weeks. Each carries its own checklist of
//! tasks and one free-text field (a structured reflection for the last week).

use super::state::WeekStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Days in one weekly block.
pub const DAYS_PER_WEEK: usize = 7;

/// Week number, 1 through 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WeekNumber {
    One,
    Two,
    Three,
    Four,
}

impl WeekNumber {
    pub const ALL: [WeekNumber; 4] = [Self::One, Self::Two, Self::Three, Self::Four];

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// Length of this week's task checklist.
    pub fn task_count(self) -> usize {
        self.task_labels().len()
    }

    /// Program days (1-based) covered by this week.
    pub fn day_range(self) -> RangeInclusive<usize> {
        let first = usize::from(self.number() - 1) * DAYS_PER_WEEK + 1;
        first..=first + DAYS_PER_WEEK - 1
    }

    /// Index into `days` of the last day of this week.
    pub fn last_day_index(self) -> usize {
        usize::from(self.number()) * DAYS_PER_WEEK - 1
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::One => "Foundation",
            Self::Two => "Discipline",
            Self::Three => "Momentum",
            Self::Four => "Integration",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::One => "Prove you can show up when it's boring.",
            Self::Two => "Push through the \"this is boring\" wall.",
            Self::Three => "See tangible evidence you're changing.",
            Self::Four => "Lock in your new baseline, no backsliding.",
        }
    }

    pub fn task_labels(self) -> &'static [&'static str] {
        match self {
            Self::One => &[
                "Complete all 7 Daily Baseline items x7 days",
                "Write: \"What do I actually want to finish this week?\" (1 sentence)",
                "Identify #1 distraction, delete/block it for 7 days",
                "Do 1 thing that scares you slightly",
            ],
            Self::Two => &[
                "Maintain all 7 Daily Baseline items",
                "Upgrade: Phone-free time to 90 min/day",
                "Finish one backlog item (under 90 min)",
                "Have one difficult conversation",
                "Learn 30 min in your field",
            ],
            Self::Three => &[
                "Maintain all 7 Daily Baseline items + 90-min phone-free",
                "Finish what you started in Week 2",
                "Cut one energy vampire (person/app/habit)",
                "Create/share something (output > consumption)",
                "List 3 concrete wins from Days 1-21",
            ],
            Self::Four => &[
                "Maintain all 7 Daily Baseline items",
                "Review all 28 days in writing: \"What actually changed?\"",
                "Identify your ONE sticky habit",
                "Schedule your next 28-day challenge",
                "Tell one person what you completed",
            ],
        }
    }
}

impl From<WeekNumber> for u8 {
    fn from(week: WeekNumber) -> Self {
        week.number()
    }
}

impl TryFrom<u8> for WeekNumber {
    type Error = UnknownWeek;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number).ok_or(UnknownWeek(number))
    }
}

impl fmt::Display for WeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Week {}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no week numbered {0}")]
pub struct UnknownWeek(pub u8);

/// Closing reflection recorded in week 4.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    #[serde(default)]
    pub changed: String,
    #[serde(default)]
    pub next: String,
}

/// State of one weekly block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WeekRecordRepr", into = "WeekRecordRepr")]
pub struct WeekRecord {
    pub unlocked: bool,
    pub tasks: Vec<bool>,
    /// Week 1: the distraction removed.
    pub distraction: Option<String>,
    /// Week 2: the backlog item finished.
    pub backlog: Option<String>,
    /// Week 3: the energy vampire cut.
    pub vampire: Option<String>,
    /// Week 4.
    pub reflection: Option<Reflection>,
}

impl WeekRecord {
    /// Fresh record shaped for `week`; only week 1 starts unlocked.
    pub fn new(week: WeekNumber) -> Self {
        let mut record = Self {
            unlocked: week == WeekNumber::One,
            tasks: vec![false; week.task_count()],
            ..Self::default()
        };
        match week {
            WeekNumber::One => record.distraction = Some(String::new()),
            WeekNumber::Two => record.backlog = Some(String::new()),
            WeekNumber::Three => record.vampire = Some(String::new()),
            WeekNumber::Four => record.reflection = Some(Reflection::default()),
        }
        record
    }

    /// True iff the task list is non-empty and every task is done.
    pub fn completed(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|&task| task)
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|&&task| task).count()
    }

    pub fn status(&self) -> WeekStatus {
        WeekStatus::from_unlocked(self.unlocked)
    }
}

/// Pad with `false` or truncate so `tasks` matches the week's checklist.
pub fn fit_tasks(week: WeekNumber, mut tasks: Vec<bool>) -> Vec<bool> {
    tasks.resize(week.task_count(), false);
    tasks
}

#[derive(Serialize, Deserialize)]
struct WeekRecordRepr {
    #[serde(default)]
    unlocked: bool,
    #[serde(default)]
    tasks: Vec<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    distraction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    backlog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vampire: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reflection: Option<Reflection>,
    #[serde(default)]
    completed: bool,
}

impl From<WeekRecordRepr> for WeekRecord {
    fn from(repr: WeekRecordRepr) -> Self {
        Self {
            unlocked: repr.unlocked,
            tasks: repr.tasks,
            distraction: repr.distraction,
            backlog: repr.backlog,
            vampire: repr.vampire,
            reflection: repr.reflection,
        }
    }
}

impl From<WeekRecord> for WeekRecordRepr {
    fn from(week: WeekRecord) -> Self {
        Self {
            completed: week.completed(),
            unlocked: week.unlocked,
            tasks: week.tasks,
            distraction: week.distraction,
            backlog: week.backlog,
            vampire: week.vampire,
            reflection: week.reflection,
        }
    }
}

/// The four weekly blocks, serialized under keys `"1"` to `"4"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weeks {
    #[serde(rename = "1")]
    pub one: WeekRecord,
    #[serde(rename = "2")]
    pub two: WeekRecord,
    #[serde(rename = "3")]
    pub three: WeekRecord,
    #[serde(rename = "4")]
    pub four: WeekRecord,
}

impl Default for Weeks {
    fn default() -> Self {
        Self {
            one: WeekRecord::new(WeekNumber::One),
            two: WeekRecord::new(WeekNumber::Two),
            three: WeekRecord::new(WeekNumber::Three),
            four: WeekRecord::new(WeekNumber::Four),
        }
    }
}

impl Weeks {
    pub fn get(&self, week: WeekNumber) -> &WeekRecord {
        match week {
            WeekNumber::One => &self.one,
            WeekNumber::Two => &self.two,
            WeekNumber::Three => &self.three,
            WeekNumber::Four => &self.four,
        }
    }

    pub fn get_mut(&mut self, week: WeekNumber) -> &mut WeekRecord {
        match week {
            WeekNumber::One => &mut self.one,
            WeekNumber::Two => &mut self.two,
            WeekNumber::Three => &mut self.three,
            WeekNumber::Four => &mut self.four,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (WeekNumber, &WeekRecord)> {
        WeekNumber::ALL.into_iter().map(move |week| (week, self.get(week)))
    }
}

/// Partial update for a [`WeekRecord`]; unset fields are left alone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distraction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backlog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vampire: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<Reflection>,
}

impl WeekUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unlocked(mut self, unlocked: bool) -> Self {
        self.unlocked = Some(unlocked);
        self
    }

    pub fn tasks(mut self, tasks: Vec<bool>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    pub fn distraction(mut self, text: impl Into<String>) -> Self {
        self.distraction = Some(text.into());
        self
    }

    pub fn backlog(mut self, text: impl Into<String>) -> Self {
        self.backlog = Some(text.into());
        self
    }

    pub fn vampire(mut self, text: impl Into<String>) -> Self {
        self.vampire = Some(text.into());
        self
    }

    pub fn reflection(mut self, reflection: Reflection) -> Self {
        self.reflection = Some(reflection);
        self
    }

    /// Shallow-merge into `record`.
    ///
    /// `unlocked` only ever moves from false to true here; tasks are fitted
    /// to the week's checklist length.
    pub fn apply_to(&self, week: WeekNumber, record: &mut WeekRecord) {
        if let Some(unlocked) = self.unlocked {
            record.unlocked |= unlocked;
        }
        if let Some(tasks) = &self.tasks {
            record.tasks = fit_tasks(week, tasks.clone());
        }
        if let Some(text) = &self.distraction {
            record.distraction = Some(text.clone());
        }
        if let Some(text) = &self.backlog {
            record.backlog = Some(text.clone());
        }
        if let Some(text) = &self.vampire {
            record.vampire = Some(text.clone());
        }
        if let Some(reflection) = &self.reflection {
            record.reflection = Some(reflection.clone());
        }
    }
}
