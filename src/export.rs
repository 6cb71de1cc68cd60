//! Data export: CSV tasks, plain-text notes, JSON backup.
//!
//! Exporters produce strings from read-only snapshots of the stores;
//! thin wrappers write them to timestamped files in the working
//! directory.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::domain::note::Note;
use crate::domain::pomodoro::PomodoroConfig;
use crate::domain::task::{Task, local_now};

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn hours(duration: std::time::Duration) -> f64 {
    duration.as_secs_f64() / 3600.0
}

/// Tabular task export.
///
/// One row per task in store order; text fields quoted, tags joined
/// with semicolons, durations in fractional hours.
pub fn tasks_to_csv(tasks: &[Task]) -> String {
    let mut out = String::from(
        "ID,Title,Description,Priority,Status,Progress,DueDate,EstimatedHours,ActualHours,Tags\n",
    );
    for task in tasks {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{:.2},{:.2},{}\n",
            task.id,
            csv_quote(&task.title),
            csv_quote(&task.description),
            task.priority,
            task.status,
            task.progress,
            task.due_date.map(|d| d.to_string()).unwrap_or_default(),
            task.estimated.map(hours).unwrap_or(0.0),
            hours(task.actual),
            csv_quote(&task.tags.join(";")),
        ));
    }
    out
}

/// Plain-text note export, newest note first, full content.
pub fn notes_to_text(notes: &[&Note], exported_at: NaiveDateTime) -> String {
    let mut out = String::from("TASKDECK - NOTES EXPORT\n");
    out.push_str(&format!(
        "Exported on: {}\n",
        exported_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");

    for note in notes {
        out.push_str(&format!("[{}] {}\n", note.id, note.title));
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
        out.push('\n');
        out.push_str(&note.content);
        out.push_str("\n\n");
        out.push_str(&"-".repeat(30));
        out.push_str("\n\n");
    }
    out
}

/// Full backup payload, PascalCase keys as in the snapshot format
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Backup<'a> {
    export_date: NaiveDateTime,
    tasks: &'a [Task],
    notes: &'a [Note],
    pomodoro_stats: &'a PomodoroConfig,
}

/// Everything as pretty-printed JSON with an export timestamp
pub fn backup_to_json(
    tasks: &[Task],
    notes: &[Note],
    pomodoro: &PomodoroConfig,
    exported_at: NaiveDateTime,
) -> Result<String> {
    let backup = Backup {
        export_date: exported_at,
        tasks,
        notes,
        pomodoro_stats: pomodoro,
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

fn timestamped(prefix: &str, ext: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}.{}",
        prefix,
        local_now().format("%Y%m%d_%H%M%S"),
        ext
    ))
}

fn write_export(path: PathBuf, content: &str) -> Result<PathBuf> {
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "exported");
    Ok(path)
}

/// Write the CSV task export to `tasks_export_<timestamp>.csv`
pub fn write_tasks_csv(tasks: &[Task]) -> Result<PathBuf> {
    write_export(timestamped("tasks_export", "csv"), &tasks_to_csv(tasks))
}

/// Write the text note export to `notes_export_<timestamp>.txt`
pub fn write_notes_text(notes: &[&Note]) -> Result<PathBuf> {
    write_export(
        timestamped("notes_export", "txt"),
        &notes_to_text(notes, local_now()),
    )
}

/// Write the JSON backup to `taskdeck_backup_<timestamp>.json`
pub fn write_backup_json(tasks: &[Task], notes: &[Note], pomodoro: &PomodoroConfig) -> Result<PathBuf> {
    write_export(
        timestamped("taskdeck_backup", "json"),
        &backup_to_json(tasks, notes, pomodoro, local_now())?,
    )
}
