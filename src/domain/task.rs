use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Get the current date and time in local timezone
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Task priority
///
/// The numeric ordinal (Low=1 .. Critical=4) drives list ordering:
/// tasks sort ascending by ordinal, so Low-priority tasks come first.
/// This matches the historical file format and display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// All priorities in ordinal order
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    /// Numeric ordinal, 1-based (Low=1, Medium=2, High=3, Critical=4)
    pub fn ordinal(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Critical => 4,
        }
    }

    /// Look up a priority by its 1-based ordinal
    pub fn from_ordinal(n: i64) -> Option<Priority> {
        match n {
            1 => Some(Priority::Low),
            2 => Some(Priority::Medium),
            3 => Some(Priority::High),
            4 => Some(Priority::Critical),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    /// Accepts a name ("High") or a 1-based ordinal ("3")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Priority::from_ordinal(n)
                .ok_or_else(|| format!("Invalid priority '{}'. Valid range: 1-4", n));
        }
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: Low, Medium, High, Critical (or 1-4)",
                s
            )),
        }
    }
}

/// Task lifecycle status
///
/// Pending and InProgress are derived from progress updates
/// (see `TaskStore::set_progress`); Completed and Cancelled can also
/// be set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// All statuses in declaration order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    /// Accepts a name ("InProgress") or a 1-based menu number ("2")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return match n {
                1 => Ok(TaskStatus::Pending),
                2 => Ok(TaskStatus::InProgress),
                3 => Ok(TaskStatus::Completed),
                4 => Ok(TaskStatus::Cancelled),
                _ => Err(format!("Invalid status '{}'. Valid range: 1-4", n)),
            };
        }
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "inprogress" | "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: Pending, InProgress, Completed, Cancelled (or 1-4)",
                s
            )),
        }
    }
}

/// A single task
///
/// Owned exclusively by `TaskStore`; identity is never reused, even
/// after deletion. `actual` only ever grows, fed by completed timer
/// sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Unique numeric identifier, assigned monotonically by the store
    pub id: u32,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Set once at creation
    pub created_at: NaiveDateTime,
    pub due_date: Option<NaiveDate>,
    /// User-supplied estimate
    pub estimated: Option<Duration>,
    /// Tracked time accumulated across timer sessions
    pub actual: Duration,
    /// Completion percentage, 0-100
    pub progress: u8,
    /// Insertion order preserved for display
    pub tags: Vec<String>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            status: TaskStatus::Pending,
            created_at: local_now(),
            due_date: None,
            estimated: None,
            actual: Duration::ZERO,
            progress: 0,
            tags: Vec::new(),
        }
    }
}

impl Task {
    /// Days from `today` until the due date, negative when overdue.
    ///
    /// Returns `None` when the task has no due date. Derived on demand
    /// for display and statistics, never stored.
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (due - today).num_days())
    }

    /// Whether the task is past due and still open
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && self.status != TaskStatus::Completed,
            None => false,
        }
    }
}
