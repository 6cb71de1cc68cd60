//! Structured failure kinds for store operations.
//!
//! No store operation terminates the process; every failure is a value
//! the caller can surface and recover from.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    TaskNotFound(u32),

    #[error("Note not found: {0}")]
    NoteNotFound(u32),

    /// A numeric input fell outside its allowed bounds. The target is
    /// left entirely unchanged.
    #[error("{field} {value} is out of range ({min}-{max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
