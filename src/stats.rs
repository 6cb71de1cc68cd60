//! Read-only statistics over the stores.
//!
//! `Statistics::collect` is a pure function of the current store
//! states; nothing is cached and nothing is mutated. The reference
//! date is injected so reports are testable.

use chrono::NaiveDate;
use std::time::Duration;

use crate::domain::pomodoro::PomodoroConfig;
use crate::domain::task::{Priority, TaskStatus};
use crate::store::notes::NoteStore;
use crate::store::tasks::TaskStore;

/// How many soonest-due tasks the report lists
pub const UPCOMING_LIMIT: usize = 5;

/// One entry in the upcoming-deadlines list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingTask {
    pub id: u32,
    pub title: String,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
}

/// Snapshot of summary metrics, computed fresh on every call
#[derive(Debug, Clone)]
pub struct Statistics {
    pub total_tasks: usize,
    /// Count per status, in `TaskStatus::ALL` order
    pub by_status: Vec<(TaskStatus, usize)>,
    /// Count per priority, in ordinal order
    pub by_priority: Vec<(Priority, usize)>,
    /// Tasks past their due date and not completed
    pub overdue_tasks: usize,
    /// Completed fraction of all tasks, 0.0 when there are none
    pub completion_rate: f64,
    pub total_tracked: Duration,
    /// Mean tracked time per task, zero when there are no tasks
    pub average_tracked: Duration,
    /// Up to five soonest-due incomplete tasks with future due dates
    pub upcoming: Vec<UpcomingTask>,
    pub note_count: usize,
    /// Character count summed over all note contents
    pub note_content_chars: usize,
    /// Lifetime completed Pomodoro work sessions
    pub pomodoro_sessions: u32,
}

impl Statistics {
    pub fn collect(
        tasks: &TaskStore,
        notes: &NoteStore,
        pomodoro: &PomodoroConfig,
        today: NaiveDate,
    ) -> Self {
        let all = tasks.tasks();
        let total_tasks = all.len();

        let by_status = TaskStatus::ALL
            .iter()
            .map(|&s| (s, all.iter().filter(|t| t.status == s).count()))
            .collect::<Vec<_>>();
        let by_priority = Priority::ALL
            .iter()
            .map(|&p| (p, all.iter().filter(|t| t.priority == p).count()))
            .collect::<Vec<_>>();

        let completed = all
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
        let completion_rate = if total_tasks > 0 {
            completed as f64 / total_tasks as f64
        } else {
            0.0
        };

        let overdue_tasks = all.iter().filter(|t| t.is_overdue(today)).count();

        let total_tracked: Duration = all.iter().map(|t| t.actual).sum();
        let average_tracked = if total_tasks > 0 {
            total_tracked / total_tasks as u32
        } else {
            Duration::ZERO
        };

        let mut upcoming: Vec<UpcomingTask> = all
            .iter()
            .filter(|t| t.status != TaskStatus::Completed)
            .filter_map(|t| {
                let due = t.due_date?;
                (due > today).then(|| UpcomingTask {
                    id: t.id,
                    title: t.title.clone(),
                    due_date: due,
                    days_until_due: (due - today).num_days(),
                })
            })
            .collect();
        upcoming.sort_by_key(|u| u.due_date);
        upcoming.truncate(UPCOMING_LIMIT);

        Self {
            total_tasks,
            by_status,
            by_priority,
            overdue_tasks,
            completion_rate,
            total_tracked,
            average_tracked,
            upcoming,
            note_count: notes.len(),
            note_content_chars: notes.notes().iter().map(|n| n.content.chars().count()).sum(),
            pomodoro_sessions: pomodoro.completed_work_sessions,
        }
    }

    /// Count for one status
    pub fn status_count(&self, status: TaskStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tasks::TaskDraft;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn empty_stores_produce_zeroes() {
        let stats = Statistics::collect(
            &TaskStore::new(),
            &NoteStore::new(),
            &PomodoroConfig::default(),
            today(),
        );
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.average_tracked, Duration::ZERO);
        assert!(stats.upcoming.is_empty());
        assert_eq!(stats.note_content_chars, 0);
    }

    #[test]
    fn counts_statuses_priorities_and_overdue() {
        let mut tasks = TaskStore::new();
        tasks.add(TaskDraft {
            title: "late".into(),
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 20),
            ..Default::default()
        });
        tasks.add(TaskDraft {
            title: "done".into(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 20),
            ..Default::default()
        });
        tasks.mark_complete(2).unwrap();

        let stats = Statistics::collect(
            &tasks,
            &NoteStore::new(),
            &PomodoroConfig::default(),
            today(),
        );
        assert_eq!(stats.total_tasks, 2);
        assert_eq!(stats.status_count(TaskStatus::Completed), 1);
        assert_eq!(stats.status_count(TaskStatus::Pending), 1);
        assert_eq!(stats.overdue_tasks, 1); // completed one doesn't count
        assert_eq!(stats.completion_rate, 0.5);
        let high = stats
            .by_priority
            .iter()
            .find(|(p, _)| *p == Priority::High)
            .unwrap();
        assert_eq!(high.1, 1);
    }

    #[test]
    fn tracked_time_totals_and_average() {
        let mut tasks = TaskStore::new();
        tasks.add(TaskDraft::default());
        tasks.add(TaskDraft::default());
        tasks.record_elapsed(1, Duration::from_secs(600)).unwrap();
        tasks.record_elapsed(2, Duration::from_secs(1200)).unwrap();

        let stats = Statistics::collect(
            &tasks,
            &NoteStore::new(),
            &PomodoroConfig::default(),
            today(),
        );
        assert_eq!(stats.total_tracked, Duration::from_secs(1800));
        assert_eq!(stats.average_tracked, Duration::from_secs(900));
    }

    #[test]
    fn upcoming_excludes_completed_past_and_undated_and_limits_to_five() {
        let mut tasks = TaskStore::new();
        for day in 2..=8 {
            tasks.add(TaskDraft {
                title: format!("due-{day}"),
                due_date: NaiveDate::from_ymd_opt(2024, 6, day),
                ..Default::default()
            });
        }
        tasks.add(TaskDraft {
            title: "past".into(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..Default::default()
        });
        tasks.add(TaskDraft {
            title: "undated".into(),
            ..Default::default()
        });
        // Soonest one gets completed, so it drops out
        tasks.mark_complete(1).unwrap();

        let stats = Statistics::collect(
            &tasks,
            &NoteStore::new(),
            &PomodoroConfig::default(),
            today(),
        );
        assert_eq!(stats.upcoming.len(), UPCOMING_LIMIT);
        assert_eq!(stats.upcoming[0].title, "due-3");
        assert_eq!(stats.upcoming[0].days_until_due, 2);
        assert_eq!(stats.upcoming[4].title, "due-7");
    }

    #[test]
    fn note_metrics_count_characters() {
        let mut notes = NoteStore::new();
        notes.add("a".into(), "hello".into(), Vec::new());
        notes.add("b".into(), "世界".into(), Vec::new());

        let stats = Statistics::collect(
            &TaskStore::new(),
            &notes,
            &PomodoroConfig::default(),
            today(),
        );
        assert_eq!(stats.note_count, 2);
        assert_eq!(stats.note_content_chars, 7);
    }
}
