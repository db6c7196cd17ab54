//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the durable slot
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The slot cannot be used at all (quota, permissions, missing backend)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The stored payload is not valid JSON or does not match the schema
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The payload decoded but breaks the fixed program shape
    #[error("Snapshot validation failed: {0}")]
    InvalidShape(String),
}
