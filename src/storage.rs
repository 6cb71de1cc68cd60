//! JSON snapshot persistence.
//!
//! The whole application state round-trips through a single snapshot
//! file. Field names stay PascalCase for compatibility with the
//! historical data format, and every field tolerates absence so a
//! partial or older snapshot still loads.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::note::Note;
use crate::domain::pomodoro::PomodoroConfig;
use crate::domain::task::Task;

/// Full persisted state: both collections, the Pomodoro configuration,
/// and the id counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub pomodoro: PomodoroConfig,
    pub next_task_id: u32,
    pub next_note_id: u32,
    pub last_saved: Option<NaiveDateTime>,
}

pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load the snapshot, or an empty one when no file exists yet.
    ///
    /// Id-counter reconciliation against the loaded collections is the
    /// stores' job (`from_parts`), not done here.
    pub fn load(&self) -> Result<Snapshot> {
        if !self.file_path.exists() {
            return Ok(Snapshot::default());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("failed to read {}", self.file_path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.file_path.display()))?;
        Ok(snapshot)
    }

    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("failed to write {}", self.file_path.display()))?;
        Ok(())
    }
}
