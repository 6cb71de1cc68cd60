use chrono::NaiveDate;
use std::time::Duration;

use crate::domain::task::{Priority, Task, TaskStatus, local_now};
use crate::error::{StoreError, StoreResult};

/// Fields supplied by the user when creating a task.
///
/// Everything else (id, status, progress, tracked time, creation
/// timestamp) is assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub estimated: Option<Duration>,
    pub tags: Vec<String>,
}

/// Owns the task collection.
///
/// Vec is the primary storage: it preserves insertion order, which
/// breaks sorting ties deterministically and keeps snapshot diffs
/// stable. At single-user scales a linear id scan is not worth
/// indexing around.
pub struct TaskStore {
    tasks: Vec<Task>,
    /// Next id to assign; ids are never reused, even after deletion
    next_id: u32,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a loaded snapshot.
    ///
    /// The id counter is reconciled to `max(loaded counter, max
    /// existing id + 1)` so a stale snapshot counter can never cause an
    /// id collision.
    pub fn from_parts(tasks: Vec<Task>, next_id: u32) -> Self {
        let max_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            next_id: next_id.max(max_id + 1).max(1),
            tasks,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Count of tasks not yet completed (welcome-screen summary)
    pub fn open_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Completed)
            .count()
    }

    /// Create a task from a draft and return it.
    ///
    /// Always succeeds; an empty title is permitted (input validation
    /// stops at type parsing).
    pub fn add(&mut self, draft: TaskDraft) -> &Task {
        let task = Task {
            id: self.next_id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: TaskStatus::Pending,
            created_at: local_now(),
            due_date: draft.due_date,
            estimated: draft.estimated,
            actual: Duration::ZERO,
            progress: 0,
            tags: draft.tags,
        };
        self.next_id += 1;
        self.tasks.push(task);
        self.tasks.last().unwrap()
    }

    /// Find a task by its id
    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u32) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Set the completion percentage and derive the status from it.
    ///
    /// 100 completes the task, anything above zero marks it in
    /// progress, zero leaves the status as it was. A value outside
    /// 0-100 fails with `OutOfRange` and leaves the task entirely
    /// unchanged.
    pub fn set_progress(&mut self, id: u32, progress: i64) -> StoreResult<&Task> {
        if !(0..=100).contains(&progress) {
            return Err(StoreError::OutOfRange {
                field: "progress",
                value: progress,
                min: 0,
                max: 100,
            });
        }
        let task = self.get_mut(id).ok_or(StoreError::TaskNotFound(id))?;
        task.progress = progress as u8;
        if progress == 100 {
            task.status = TaskStatus::Completed;
        } else if progress > 0 {
            task.status = TaskStatus::InProgress;
        }
        Ok(task)
    }

    /// Force a task to Completed with full progress.
    ///
    /// Deliberately bypasses the progress-derivation rule of
    /// `set_progress`; both entry points are part of the contract.
    pub fn mark_complete(&mut self, id: u32) -> StoreResult<&Task> {
        let task = self.get_mut(id).ok_or(StoreError::TaskNotFound(id))?;
        task.status = TaskStatus::Completed;
        task.progress = 100;
        Ok(task)
    }

    /// Remove a task; returns whether it existed.
    ///
    /// Confirmation is the caller's concern, not enforced here.
    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() < before
    }

    /// Mark a task in progress at the start of a tracked session
    pub fn start_tracking(&mut self, id: u32) -> StoreResult<&Task> {
        let task = self.get_mut(id).ok_or(StoreError::TaskNotFound(id))?;
        task.status = TaskStatus::InProgress;
        Ok(task)
    }

    /// Bank elapsed session time against a task.
    ///
    /// Tracked time only ever accumulates; the task is also marked in
    /// progress as a side effect of having had a session run on it.
    pub fn record_elapsed(&mut self, id: u32, elapsed: Duration) -> StoreResult<&Task> {
        let task = self.get_mut(id).ok_or(StoreError::TaskNotFound(id))?;
        task.actual += elapsed;
        task.status = TaskStatus::InProgress;
        Ok(task)
    }

    /// All tasks in display order.
    ///
    /// Sorted by priority ordinal ascending (Low first — historical
    /// display order, preserved for compatibility), then due date
    /// ascending with undated tasks last. The stable sort breaks the
    /// remaining ties by insertion order.
    pub fn list(&self) -> Vec<&Task> {
        let mut items: Vec<&Task> = self.tasks.iter().collect();
        items.sort_by_key(|t| (t.priority.ordinal(), t.due_date.is_none(), t.due_date));
        items
    }

    /// Case-insensitive substring search over title, description, and
    /// tags. An empty or whitespace-only term matches nothing.
    pub fn search(&self, term: &str) -> Vec<&Task> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.tasks
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle)
                    || t.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn filter_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn filter_by_priority(&self, priority: Priority) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.priority == priority).collect()
    }

    /// Tasks due within `[today, today + days]`, comparing calendar
    /// dates only. Undated tasks never match.
    pub fn filter_due_within(&self, days: i64, today: NaiveDate) -> Vec<&Task> {
        let limit = today + chrono::Duration::days(days);
        self.tasks
            .iter()
            .filter(|t| t.due_date.is_some_and(|due| due >= today && due <= limit))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn store_with(titles: &[&str]) -> TaskStore {
        let mut store = TaskStore::new();
        for t in titles {
            store.add(draft(t));
        }
        store
    }

    #[test]
    fn add_assigns_monotonic_ids_and_defaults() {
        let mut store = TaskStore::new();
        let id1 = store.add(draft("first")).id;
        let id2 = store.add(draft("second")).id;
        assert_eq!(id1, 1);
        assert_eq!(id2, 2);

        let task = store.get(id1).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.progress, 0);
        assert_eq!(task.actual, Duration::ZERO);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = store_with(&["a", "b"]);
        assert!(store.delete(2));
        let id = store.add(draft("c")).id;
        assert_eq!(id, 3);
    }

    #[test]
    fn from_parts_reconciles_stale_counter() {
        let store = store_with(&["a", "b", "c"]);
        let tasks = store.tasks().to_vec();

        // Counter behind the max id: bumped past it
        let rebuilt = TaskStore::from_parts(tasks.clone(), 2);
        assert_eq!(rebuilt.next_id(), 4);

        // Counter ahead: kept
        let rebuilt = TaskStore::from_parts(tasks, 10);
        assert_eq!(rebuilt.next_id(), 10);

        // Empty store never hands out id 0
        let rebuilt = TaskStore::from_parts(Vec::new(), 0);
        assert_eq!(rebuilt.next_id(), 1);
    }

    #[test]
    fn set_progress_derives_status() {
        let mut store = store_with(&["task"]);
        let task = store.set_progress(1, 50).unwrap();
        assert_eq!(task.progress, 50);
        assert_eq!(task.status, TaskStatus::InProgress);

        let task = store.set_progress(1, 100).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn set_progress_zero_leaves_status_alone() {
        let mut store = store_with(&["task"]);
        store.set_progress(1, 0).unwrap();
        assert_eq!(store.get(1).unwrap().status, TaskStatus::Pending);

        // Also after the task has moved on
        store.set_progress(1, 40).unwrap();
        store.set_progress(1, 0).unwrap();
        assert_eq!(store.get(1).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn set_progress_out_of_range_is_a_no_op() {
        let mut store = store_with(&["task"]);
        store.set_progress(1, 30).unwrap();

        for bad in [-1, 101, 1000] {
            let err = store.set_progress(1, bad).unwrap_err();
            assert!(matches!(err, StoreError::OutOfRange { .. }));
        }
        let task = store.get(1).unwrap();
        assert_eq!(task.progress, 30);
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[test]
    fn set_progress_unknown_id_is_not_found() {
        let mut store = TaskStore::new();
        assert_eq!(
            store.set_progress(9, 10).unwrap_err(),
            StoreError::TaskNotFound(9)
        );
    }

    #[test]
    fn mark_complete_overrides_any_prior_progress() {
        let mut store = store_with(&["task"]);
        store.set_progress(1, 30).unwrap();
        let task = store.mark_complete(1).unwrap();
        assert_eq!(task.progress, 100);
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn record_elapsed_accumulates() {
        let mut store = store_with(&["task"]);
        store.record_elapsed(1, Duration::from_secs(90)).unwrap();
        store.record_elapsed(1, Duration::from_secs(30)).unwrap();
        let task = store.get(1).unwrap();
        assert_eq!(task.actual, Duration::from_secs(120));
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[test]
    fn delete_reports_presence() {
        let mut store = store_with(&["task"]);
        assert!(store.delete(1));
        assert!(!store.delete(1));
        assert!(store.is_empty());
    }

    #[test]
    fn list_orders_by_priority_ordinal_then_due_date() {
        let mut store = TaskStore::new();
        store.add(TaskDraft {
            title: "high".into(),
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        });
        store.add(TaskDraft {
            title: "low-later".into(),
            priority: Priority::Low,
            due_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            ..Default::default()
        });
        store.add(TaskDraft {
            title: "low-sooner".into(),
            priority: Priority::Low,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            ..Default::default()
        });

        let titles: Vec<&str> = store.list().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["low-sooner", "low-later", "high"]);
    }

    #[test]
    fn list_puts_undated_tasks_last_within_priority() {
        let mut store = TaskStore::new();
        store.add(draft("undated"));
        store.add(TaskDraft {
            title: "dated".into(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..Default::default()
        });
        let titles: Vec<&str> = store.list().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["dated", "undated"]);
    }

    #[test]
    fn search_matches_title_description_and_tags() {
        let mut store = TaskStore::new();
        store.add(TaskDraft {
            title: "Write report".into(),
            ..Default::default()
        });
        store.add(TaskDraft {
            title: "other".into(),
            description: "quarterly REPORT review".into(),
            ..Default::default()
        });
        store.add(TaskDraft {
            title: "third".into(),
            tags: vec!["reports".into()],
            ..Default::default()
        });
        store.add(draft("unrelated"));

        assert_eq!(store.search("report").len(), 3);
        assert_eq!(store.search("REPORT").len(), 3);
    }

    #[test]
    fn blank_search_matches_nothing() {
        let store = store_with(&["a", "b"]);
        assert!(store.search("").is_empty());
        assert!(store.search("   ").is_empty());
    }

    #[test]
    fn filter_due_within_uses_inclusive_date_window() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut store = TaskStore::new();
        for (title, due) in [
            ("today", NaiveDate::from_ymd_opt(2024, 6, 1)),
            ("boundary", NaiveDate::from_ymd_opt(2024, 6, 8)),
            ("past", NaiveDate::from_ymd_opt(2024, 5, 30)),
            ("beyond", NaiveDate::from_ymd_opt(2024, 6, 9)),
            ("undated", None),
        ] {
            store.add(TaskDraft {
                title: title.into(),
                due_date: due,
                ..Default::default()
            });
        }

        let titles: Vec<&str> = store
            .filter_due_within(7, today)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, ["today", "boundary"]);
    }

    #[test]
    fn filters_by_status_and_priority() {
        let mut store = TaskStore::new();
        store.add(TaskDraft {
            title: "a".into(),
            priority: Priority::Critical,
            ..Default::default()
        });
        store.add(draft("b"));
        store.mark_complete(2).unwrap();

        assert_eq!(store.filter_by_priority(Priority::Critical).len(), 1);
        assert_eq!(store.filter_by_status(TaskStatus::Completed).len(), 1);
        assert_eq!(store.filter_by_status(TaskStatus::Pending).len(), 1);
    }
}
