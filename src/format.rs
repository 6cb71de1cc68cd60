//! Display formatting for tasks, notes, timers, and reports.
//!
//! Everything here builds plain strings; printing is the UI's job.

use chrono::NaiveDate;
use std::time::Duration;

use crate::domain::note::{Note, PREVIEW_LEN};
use crate::domain::task::Task;
use crate::stats::Statistics;

const BAR_LENGTH: usize = 20;

/// Render a 0-100 progress value as `[████░░...] NN%`
pub fn progress_bar(progress: u8) -> String {
    let progress = progress.min(100) as usize;
    let filled = BAR_LENGTH * progress / 100;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(BAR_LENGTH - filled),
        progress
    )
}

/// Render a duration as `hh:mm:ss`
pub fn hms(duration: Duration) -> String {
    let total = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Render seconds as `MM:SS` for countdown displays
pub fn mmss(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

fn hours(duration: Duration) -> f64 {
    duration.as_secs_f64() / 3600.0
}

/// Multi-line task card for list and search views
pub fn task(task: &Task, today: NaiveDate) -> String {
    let mut out = format!("[{}] {} ({})\n", task.id, task.title, task.status);
    if !task.description.is_empty() {
        out.push_str(&format!("    Description: {}\n", task.description));
    }
    out.push_str(&format!(
        "    Priority: {} | Progress: {}\n",
        task.priority,
        progress_bar(task.progress)
    ));
    if let (Some(due), Some(days)) = (task.due_date, task.days_until_due(today)) {
        if days < 0 {
            out.push_str(&format!("    Due: {} (OVERDUE by {} days)\n", due, -days));
        } else {
            out.push_str(&format!("    Due: {} (Due in {} days)\n", due, days));
        }
    }
    if !task.tags.is_empty() {
        out.push_str(&format!("    Tags: {}\n", task.tags.join(", ")));
    }
    if !task.actual.is_zero() {
        out.push_str(&format!("    Time spent: {}\n", hms(task.actual)));
    }
    out
}

/// Note card with a bounded content preview
pub fn note(note: &Note) -> String {
    let mut out = format!("[{}] {}\n", note.id, note.title);
    out.push_str(&format!(
        "Created: {}\n",
        note.created_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(modified) = note.modified_at {
        out.push_str(&format!("Modified: {}\n", modified.format("%Y-%m-%d %H:%M")));
    }
    if !note.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", note.tags.join(", ")));
    }
    out.push_str(&format!("Preview: {}\n", note.preview(PREVIEW_LEN)));
    out
}

/// Full statistics report
pub fn statistics(stats: &Statistics) -> String {
    let mut out = String::from("TASK OVERVIEW\n");
    out.push_str(&format!("Total Tasks: {}\n", stats.total_tasks));
    for (status, count) in &stats.by_status {
        out.push_str(&format!("{}: {}\n", status, count));
    }
    out.push_str(&format!("Overdue: {}\n", stats.overdue_tasks));
    if stats.total_tasks > 0 {
        let percent = (stats.completion_rate * 100.0).round() as u8;
        out.push_str(&format!("\nCompletion Rate: {}\n", progress_bar(percent)));
    }

    out.push_str("\nPRIORITY DISTRIBUTION\n");
    for (priority, count) in &stats.by_priority {
        out.push_str(&format!("{}: {} tasks\n", priority, count));
    }

    out.push_str("\nTIME TRACKING\n");
    out.push_str(&format!(
        "Total time logged: {:.1} hours\n",
        hours(stats.total_tracked)
    ));
    out.push_str(&format!(
        "Average time per task: {:.1} hours\n",
        hours(stats.average_tracked)
    ));
    out.push_str(&format!(
        "Pomodoro sessions completed: {}\n",
        stats.pomodoro_sessions
    ));

    if !stats.upcoming.is_empty() {
        out.push_str("\nUPCOMING TASKS (Next 5)\n");
        for task in &stats.upcoming {
            out.push_str(&format!(
                "- {} - Due in {} day(s)\n",
                task.title, task.days_until_due
            ));
        }
    }

    out.push_str("\nNOTES\n");
    out.push_str(&format!("Total Notes: {}\n", stats.note_count));
    out.push_str(&format!("Total Characters: {}\n", stats.note_content_chars));
    out
}
