//! Durable persistence for the challenge state.
//!
//! The whole [`ChallengeState`] lives as one JSON document in a single named
//! slot. Reading is forgiving: a missing, unreadable, or malformed slot yields
//! a fresh default state and a warning rather than an error. Writing reports
//! failures to the caller, which decides how loudly to surface them.

use crate::core::{today, ChallengeState};
use crate::enforcement::check_snapshot;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use stillwater::validation::Validation;
use tracing::warn;

pub mod error;
pub mod migrate;

pub use error::StorageError;
pub use migrate::{fit_week_tasks, migrate, needs_migration};

/// A single durable key-value slot holding the serialized snapshot.
pub trait StorageSlot {
    /// Read the stored payload, `None` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored payload.
    fn write(&mut self, payload: &str) -> Result<(), StorageError>;
}

/// In-process slot, for tests and hosts that persist elsewhere.
#[derive(Clone, Debug, Default)]
pub struct MemorySlot {
    payload: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        self.payload = Some(payload.to_string());
        Ok(())
    }
}

/// Slot backed by one JSON file, written atomically via a sibling temp file.
#[derive(Clone, Debug)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, payload).map_err(|e| self.io_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

/// Load the state, falling back to a fresh one on any failure.
pub fn load_state<S: StorageSlot + ?Sized>(slot: &S) -> ChallengeState {
    load_state_at(slot, today())
}

/// [`load_state`] with an explicit date for any state it has to create.
pub fn load_state_at<S: StorageSlot + ?Sized>(slot: &S, today: NaiveDate) -> ChallengeState {
    match try_load(slot, today) {
        Ok(Some(state)) => state,
        Ok(None) => ChallengeState::new(today),
        Err(err) => {
            warn!(error = %err, "failed to load challenge state, starting fresh");
            ChallengeState::new(today)
        }
    }
}

/// Load the state, reporting why a stored payload was unusable.
pub fn try_load<S: StorageSlot + ?Sized>(
    slot: &S,
    today: NaiveDate,
) -> Result<Option<ChallengeState>, StorageError> {
    match slot.read()? {
        Some(payload) => decode(&payload, today).map(Some),
        None => Ok(None),
    }
}

/// Parse, migrate, and shape-check a serialized snapshot.
pub fn decode(payload: &str, today: NaiveDate) -> Result<ChallengeState, StorageError> {
    let raw: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| StorageError::DeserializationFailed(e.to_string()))?;
    let state = migrate(raw, today)?;

    if let Validation::Failure(errors) = check_snapshot(&state) {
        let details = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(StorageError::InvalidShape(details));
    }
    Ok(state)
}

pub fn encode(state: &ChallengeState) -> Result<String, StorageError> {
    serde_json::to_string(state).map_err(|e| StorageError::SerializationFailed(e.to_string()))
}

/// Serialize `state` and write it to `slot`.
pub fn save_state<S: StorageSlot + ?Sized>(
    slot: &mut S,
    state: &ChallengeState,
) -> Result<(), StorageError> {
    let payload = encode(state)?;
    slot.write(&payload)
}
