//! Upgrade of pre-2.0 snapshots.
//!
//! Legacy payloads are read as loose JSON and copied field by field onto a
//! fresh default state. Derived flags from the old payload are discarded.

use crate::core::{
    fit_tasks, ChallengeState, DayRecord, Reflection, WeekNumber, BASELINE_COUNT, SCHEMA_VERSION,
    TOTAL_DAYS,
};
use crate::storage::StorageError;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::{debug, info};

/// True when the payload's version is absent or sorts before the current one.
///
/// Versions compare as plain strings.
pub fn needs_migration(raw: &Value) -> bool {
    match raw.get("version").and_then(Value::as_str) {
        Some(version) => version < SCHEMA_VERSION,
        None => true,
    }
}

/// Decode a raw payload, upgrading it first when it predates the current schema.
///
/// `today` becomes the start date when a legacy payload has no usable one.
pub fn migrate(raw: Value, today: NaiveDate) -> Result<ChallengeState, StorageError> {
    if !needs_migration(&raw) {
        let mut state: ChallengeState = serde_json::from_value(raw)
            .map_err(|e| StorageError::DeserializationFailed(e.to_string()))?;
        fit_week_tasks(&mut state);
        return Ok(state);
    }

    let from = raw
        .get("version")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("none");
    info!(from, to = SCHEMA_VERSION, "migrating legacy challenge snapshot");
    Ok(migrate_legacy(&raw, today))
}

/// Truncate or pad every week's tasks to that week's task count.
///
/// Earlier writers stored week 1 with five task slots; the extra entry is
/// dropped rather than rejecting the whole snapshot.
pub fn fit_week_tasks(state: &mut ChallengeState) {
    for week in WeekNumber::ALL {
        let record = state.weeks.get_mut(week);
        if record.tasks.len() != week.task_count() {
            debug!(
                week = week.number(),
                found = record.tasks.len(),
                expected = week.task_count(),
                "fitting stored task list"
            );
            record.tasks = fit_tasks(week, std::mem::take(&mut record.tasks));
        }
    }
}

/// Rebuild a current-schema state from a legacy payload.
pub fn migrate_legacy(raw: &Value, today: NaiveDate) -> ChallengeState {
    let start_date = raw
        .get("startDate")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<NaiveDate>().ok())
        .unwrap_or(today);
    let mut state = ChallengeState::new(start_date);

    if let Some(days) = raw.get("days").and_then(Value::as_array) {
        for (slot, legacy) in state.days.iter_mut().zip(days.iter().take(TOTAL_DAYS)) {
            *slot = legacy_day(legacy);
        }
    }

    if let Some(weeks) = raw.get("weeks").and_then(Value::as_object) {
        for (key, legacy) in weeks {
            let Some(week) = key.trim().parse::<u8>().ok().and_then(WeekNumber::from_number)
            else {
                continue;
            };
            if let Some(legacy) = legacy.as_object() {
                copy_legacy_week(&mut state, week, legacy);
            }
        }
    }

    if let Some(unlocked) = raw.get("unlockedWeeks").and_then(Value::as_array) {
        for week in unlocked.iter().filter_map(week_from_value) {
            state.weeks.get_mut(week).unlocked = true;
        }
    }

    state
}

fn legacy_day(legacy: &Value) -> DayRecord {
    let mut day = DayRecord::default();
    if let Some(items) = legacy.get("items").and_then(Value::as_array) {
        for (slot, item) in day.items.iter_mut().zip(items.iter().take(BASELINE_COUNT)) {
            *slot = item.as_bool().unwrap_or(false);
        }
    }
    day.mood = text(legacy.get("mood"));
    day.win = text(legacy.get("win"));
    day
}

fn copy_legacy_week(state: &mut ChallengeState, week: WeekNumber, legacy: &Map<String, Value>) {
    let record = state.weeks.get_mut(week);

    record.unlocked = legacy.get("unlocked").and_then(Value::as_bool) != Some(false);

    if let Some(tasks) = legacy.get("tasks").and_then(Value::as_array) {
        let tasks = tasks
            .iter()
            .map(|task| task.as_bool().unwrap_or(false))
            .collect();
        record.tasks = fit_tasks(week, tasks);
    }

    match week {
        WeekNumber::One => record.distraction = Some(text(legacy.get("distraction"))),
        WeekNumber::Two => record.backlog = Some(text(legacy.get("backlog"))),
        WeekNumber::Three => record.vampire = Some(text(legacy.get("vampire"))),
        WeekNumber::Four => {
            let reflection = legacy.get("reflection");
            record.reflection = Some(Reflection {
                changed: text(reflection.and_then(|r| r.get("changed"))),
                next: text(reflection.and_then(|r| r.get("next"))),
            });
        }
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn week_from_value(value: &Value) -> Option<WeekNumber> {
    let number = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    u8::try_from(number).ok().and_then(WeekNumber::from_number)
}
