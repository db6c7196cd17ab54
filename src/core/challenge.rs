//! The root challenge aggregate.

use super::day::DayRecord;
use super::week::{WeekNumber, Weeks};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Current snapshot schema tag.
pub const SCHEMA_VERSION: &str = "2.0";

/// Length of the program in days.
pub const TOTAL_DAYS: usize = 28;

/// Today's date on the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Colour theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Presentation preferences. The engine stores them but never reads them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub auto_save: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            theme: Theme::Light,
            auto_save: true,
        }
    }
}

/// Partial update for [`Settings`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,
}

impl SettingsUpdate {
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(notifications) = self.notifications {
            settings.notifications = notifications;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(auto_save) = self.auto_save {
            settings.auto_save = auto_save;
        }
    }
}

/// Everything the tracker persists: 28 days, four weeks and settings.
///
/// The active day is not stored; derive it with
/// [`active_day_index`](Self::active_day_index).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeState {
    pub version: String,
    pub start_date: NaiveDate,
    pub days: Vec<DayRecord>,
    pub weeks: Weeks,
    #[serde(default)]
    pub settings: Settings,
}

impl ChallengeState {
    /// Fresh state for a program starting on `start_date`.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            start_date,
            days: vec![DayRecord::default(); TOTAL_DAYS],
            weeks: Weeks::default(),
            settings: Settings::default(),
        }
    }

    /// Index of the program day `today` falls on, clamped to `0..=27`.
    pub fn active_day_index(&self, today: NaiveDate) -> usize {
        let elapsed = (today - self.start_date).num_days();
        usize::try_from(elapsed.max(0))
            .unwrap_or(0)
            .min(TOTAL_DAYS - 1)
    }

    /// 1-based program day for `today`.
    pub fn active_day_number(&self, today: NaiveDate) -> usize {
        self.active_day_index(today) + 1
    }

    /// Week containing the active day.
    pub fn active_week(&self, today: NaiveDate) -> WeekNumber {
        let index = self.active_day_index(today);
        WeekNumber::ALL
            .into_iter()
            .find(|week| index <= week.last_day_index())
            .unwrap_or(WeekNumber::Four)
    }

    pub fn day(&self, index: usize) -> Option<&DayRecord> {
        self.days.get(index)
    }
}

impl Default for ChallengeState {
    /// Fresh state starting today.
    fn default() -> Self {
        Self::new(today())
    }
}
