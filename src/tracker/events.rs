//! Change notification for tracker consumers.

use crate::core::{DayUpdate, SettingsUpdate, WeekNumber, WeekUpdate};
use serde::Serialize;
use uuid::Uuid;

/// Something that happened to the tracked state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum ChallengeEvent {
    /// The snapshot was written to the slot.
    Saved,
    /// Writing the snapshot failed; in-memory state is still current.
    SaveError(String),
    /// Settings changed.
    Updated(SettingsUpdate),
    /// Serialized as `{dayIndex, updates}`.
    DayUpdated {
        #[serde(rename = "dayIndex")]
        day_index: usize,
        #[serde(rename = "updates")]
        update: DayUpdate,
    },
    /// Serialized as `{weekNum, updates}`.
    WeekUpdated {
        #[serde(rename = "weekNum")]
        week: WeekNumber,
        #[serde(rename = "updates")]
        update: WeekUpdate,
    },
    WeekUnlocked(WeekNumber),
    Reset,
}

impl ChallengeEvent {
    /// Stable event name, e.g. `"week-unlocked"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::SaveError(_) => "save-error",
            Self::Updated(_) => "updated",
            Self::DayUpdated { .. } => "day-updated",
            Self::WeekUpdated { .. } => "week-updated",
            Self::WeekUnlocked(_) => "week-unlocked",
            Self::Reset => "reset",
        }
    }
}

/// Handle returned by `add_listener`, used to remove the listener again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

pub type Listener = Box<dyn FnMut(&ChallengeEvent) + Send>;

/// Ordered list of listeners, called synchronously in registration order.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ChallengeEvent) + Send + 'static,
    {
        let id = ListenerId(Uuid::new_v4());
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, event: &ChallengeEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
