//! Daily checklist records.

use serde::{Deserialize, Serialize};

/// Number of baseline habits tracked every day.
pub const BASELINE_COUNT: usize = 7;

/// Lowest and highest mood score accepted by the analytics.
pub const MOOD_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// A baseline habit, bound to a day's `items` by position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Habit {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// The seven baseline habits in checklist order.
pub const BASELINE_HABITS: [Habit; BASELINE_COUNT] = [
    Habit {
        id: "morning",
        name: "Morning Routine",
        description: "Wake up, make bed, basic hygiene",
    },
    Habit {
        id: "hydration",
        name: "Hydration",
        description: "Drink water throughout the day",
    },
    Habit {
        id: "movement",
        name: "Movement",
        description: "Exercise or physical activity",
    },
    Habit {
        id: "learning",
        name: "Learning",
        description: "Read, study, or skill practice",
    },
    Habit {
        id: "cleaning",
        name: "Cleaning",
        description: "Tidy your living space",
    },
    Habit {
        id: "planning",
        name: "Planning",
        description: "Review day, plan tomorrow",
    },
    Habit {
        id: "sleep",
        name: "Sleep",
        description: "7-9 hours of quality sleep",
    },
];

/// One program day: the habit checklist plus a mood and a logged win.
///
/// `completed` is never stored in memory. It is written to snapshots for
/// consumers of the raw JSON and ignored when reading them back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DayRecordRepr", into = "DayRecordRepr")]
pub struct DayRecord {
    pub items: [bool; BASELINE_COUNT],
    /// Integer 1..10 as text; empty when unset.
    pub mood: String,
    pub win: String,
}

impl DayRecord {
    /// True iff every baseline item is checked.
    pub fn completed(&self) -> bool {
        self.items.iter().all(|&item| item)
    }

    pub fn completed_items(&self) -> usize {
        self.items.iter().filter(|&&item| item).count()
    }

    /// The mood as a score within [`MOOD_RANGE`], if it parses as one.
    ///
    /// Parsing takes the leading integer of the trimmed text, so `"7/10"`
    /// scores 7 while `"bad"` scores nothing.
    pub fn mood_score(&self) -> Option<u8> {
        leading_integer(&self.mood)
            .and_then(|n| u8::try_from(n).ok())
            .filter(|n| MOOD_RANGE.contains(n))
    }

    pub fn has_win(&self) -> bool {
        !self.win.trim().is_empty()
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[derive(Serialize, Deserialize)]
struct DayRecordRepr {
    #[serde(default)]
    items: [bool; BASELINE_COUNT],
    #[serde(default)]
    mood: String,
    #[serde(default)]
    win: String,
    #[serde(default)]
    completed: bool,
}

impl From<DayRecordRepr> for DayRecord {
    fn from(repr: DayRecordRepr) -> Self {
        Self {
            items: repr.items,
            mood: repr.mood,
            win: repr.win,
        }
    }
}

impl From<DayRecord> for DayRecordRepr {
    fn from(day: DayRecord) -> Self {
        Self {
            completed: day.completed(),
            items: day.items,
            mood: day.mood,
            win: day.win,
        }
    }
}

/// Partial update for a [`DayRecord`]; unset fields are left alone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<[bool; BASELINE_COUNT]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win: Option<String>,
}

impl DayUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(mut self, items: [bool; BASELINE_COUNT]) -> Self {
        self.items = Some(items);
        self
    }

    pub fn mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    pub fn win(mut self, win: impl Into<String>) -> Self {
        self.win = Some(win.into());
        self
    }

    /// Shallow-merge into `day`.
    pub fn apply_to(&self, day: &mut DayRecord) {
        if let Some(items) = self.items {
            day.items = items;
        }
        if let Some(mood) = &self.mood {
            day.mood.clone_from(mood);
        }
        if let Some(win) = &self.win {
            day.win.clone_from(win);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_tracks_items() {
        let mut day = DayRecord::default();
        assert!(!day.completed());

        day.items = [true, true, true, true, true, true, false];
        assert!(!day.completed());
        assert_eq!(day.completed_items(), 6);

        day.items = [true; BASELINE_COUNT];
        assert!(day.completed());
    }

    #[test]
    fn mood_score_accepts_only_range() {
        let score = |mood: &str| {
            DayRecord {
                mood: mood.to_string(),
                ..DayRecord::default()
            }
            .mood_score()
        };

        assert_eq!(score("3"), Some(3));
        assert_eq!(score(" 10"), Some(10));
        assert_eq!(score("7/10"), Some(7));
        assert_eq!(score("bad"), None);
        assert_eq!(score("11"), None);
        assert_eq!(score("0"), None);
        assert_eq!(score("-4"), None);
        assert_eq!(score(""), None);
    }

    #[test]
    fn has_win_ignores_whitespace() {
        let mut day = DayRecord::default();
        assert!(!day.has_win());
        day.win = "   ".to_string();
        assert!(!day.has_win());
        day.win = " shipped it ".to_string();
        assert!(day.has_win());
    }

    #[test]
    fn serialized_day_carries_completed_flag() {
        let day = DayRecord {
            items: [true; BASELINE_COUNT],
            mood: "8".to_string(),
            win: String::new(),
        };
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["completed"], true);
        assert_eq!(json["mood"], "8");
    }

    #[test]
    fn stale_completed_flag_is_ignored_on_read() {
        let json = r#"{"items":[true,false,true,true,true,true,true],"mood":"","win":"","completed":true}"#;
        let day: DayRecord = serde_json::from_str(json).unwrap();
        assert!(!day.completed());
    }

    #[test]
    fn update_merges_only_set_fields() {
        let mut day = DayRecord {
            items: [false; BASELINE_COUNT],
            mood: "5".to_string(),
            win: "walked".to_string(),
        };

        DayUpdate::new().mood("9").apply_to(&mut day);
        assert_eq!(day.mood, "9");
        assert_eq!(day.win, "walked");

        DayUpdate::new().items([true; BASELINE_COUNT]).apply_to(&mut day);
        assert!(day.completed());
        assert_eq!(day.mood, "9");
    }

    #[test]
    fn habit_catalog_is_positional() {
        let ids: Vec<_> = BASELINE_HABITS.iter().map(|h| h.id).collect();
        assert_eq!(
            ids,
            vec!["morning", "hydration", "movement", "learning", "cleaning", "planning", "sleep"]
        );
    }
}
