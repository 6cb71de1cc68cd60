//! In-memory domain stores for tasks and notes.

pub mod notes;
pub mod tasks;

pub use notes::NoteStore;
pub use tasks::{TaskDraft, TaskStore};
