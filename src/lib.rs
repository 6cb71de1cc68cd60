//! taskdeck - a single-user terminal task manager.
//!
//! Tasks, free-form notes, and time tracking (ad-hoc timers, countdown,
//! stopwatch, Pomodoro cycles) with JSON snapshot persistence and
//! CSV/text/JSON export.
//!
//! # Architecture
//!
//! - **Domain layer**: `domain` - entities and the Pomodoro state
//!   machine; `store` - in-memory task/note collections with all query
//!   and mutation operations; `stats` - read-only aggregation.
//! - **Persistence layer**: `storage` - JSON snapshot load/save.
//! - **Presentation layer**: `ui`, `format`, `timer`, `export` - the
//!   interactive menu loop, rendering, cooperative timer loops, and
//!   file exports.
//!
//! Everything runs on one thread: the menu loop processes one command
//! at a time and timer loops block cooperatively, polling for
//! cancellation once per tick.
//!
//! # Example
//!
//! ```no_run
//! use taskdeck::{AppContext, TaskDraft};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut ctx = AppContext::open("taskdeck.json")?;
//!     ctx.tasks.add(TaskDraft {
//!         title: "Write report".to_string(),
//!         ..Default::default()
//!     });
//!     ctx.save()?;
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod error;
pub mod export;
pub mod format;
pub mod stats;
pub mod storage;
pub mod store;
pub mod timer;
pub mod ui;

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

pub use domain::note::Note;
pub use domain::pomodoro::{Phase, PomodoroConfig, PomodoroEngine};
pub use domain::task::{Priority, Task, TaskStatus};
pub use error::{StoreError, StoreResult};
pub use stats::Statistics;
pub use storage::{Snapshot, Storage};
pub use store::notes::NoteStore;
pub use store::tasks::{TaskDraft, TaskStore};

/// Application state: the two stores, the Pomodoro engine, and the
/// persistence gateway they round-trip through.
///
/// Constructed once at startup from the loaded snapshot; saved at
/// shutdown and on demand. No ambient globals anywhere.
pub struct AppContext {
    pub tasks: TaskStore,
    pub notes: NoteStore,
    pub pomodoro: PomodoroEngine,
    storage: Storage,
}

impl AppContext {
    /// Load application state from the snapshot at `path`.
    ///
    /// A missing file starts empty; an unreadable or corrupt file is
    /// logged and also degrades to an empty state rather than failing
    /// startup.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let storage = Storage::new(path);
        let snapshot = match storage.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("could not load {}: {e:#}; starting fresh", storage.path().display());
                Snapshot::default()
            }
        };
        info!(
            path = %storage.path().display(),
            tasks = snapshot.tasks.len(),
            notes = snapshot.notes.len(),
            "loaded snapshot"
        );
        Ok(Self::from_snapshot(storage, snapshot))
    }

    fn from_snapshot(storage: Storage, snapshot: Snapshot) -> Self {
        Self {
            tasks: TaskStore::from_parts(snapshot.tasks, snapshot.next_task_id),
            notes: NoteStore::from_parts(snapshot.notes, snapshot.next_note_id),
            pomodoro: PomodoroEngine::new(snapshot.pomodoro),
            storage,
        }
    }

    /// Current state as a persistable snapshot
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.tasks().to_vec(),
            notes: self.notes.notes().to_vec(),
            pomodoro: self.pomodoro.config().clone(),
            next_task_id: self.tasks.next_id(),
            next_note_id: self.notes.next_id(),
            last_saved: Some(domain::task::local_now()),
        }
    }

    /// Persist the current state.
    ///
    /// Failure is reported to the caller, never fatal.
    pub fn save(&self) -> Result<()> {
        self.storage.save(&self.snapshot())?;
        info!(path = %self.storage.path().display(), "saved snapshot");
        Ok(())
    }
}
