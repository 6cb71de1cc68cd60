//! Interactive menu loop.
//!
//! One command at a time on a single thread. Malformed numeric or date
//! input is never an error: the field just keeps its default and the
//! operation continues. Destructive actions ask for confirmation here,
//! not in the stores.

use anyhow::Result;
use chrono::NaiveDate;
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

use crate::domain::task::{Priority, TaskStatus, local_date_today};
use crate::format;
use crate::stats::Statistics;
use crate::store::tasks::TaskDraft;
use crate::timer::{
    CancelKeys, KeyPollTicker, RawModeGuard, TimerOutcome, run_countdown, run_stopwatch,
};
use crate::{AppContext, export};

/// Run the main menu until the user exits
pub fn run(ctx: &mut AppContext) -> Result<()> {
    welcome(ctx);

    loop {
        println!("\n=== MAIN MENU ===");
        println!("1. Task Management");
        println!("2. Notes Management");
        println!("3. Timer & Stopwatch");
        println!("4. Pomodoro Technique");
        println!("5. Statistics & Reports");
        println!("6. Export Data");
        println!("7. Help");
        println!("8. Exit");

        let Some(choice) = prompt("\nSelect an option (1-8 or type name): ") else {
            break;
        };
        match choice.to_lowercase().as_str() {
            "1" | "tasks" => task_menu(ctx),
            "2" | "notes" => notes_menu(ctx),
            "3" | "timer" => timer_menu(),
            "4" | "pomodoro" => pomodoro_menu(ctx),
            "5" | "stats" => show_statistics(ctx),
            "6" | "export" => export_menu(ctx),
            "7" | "help" => show_help(),
            "8" | "exit" | "quit" => break,
            "save" => match ctx.save() {
                Ok(()) => println!("Data saved."),
                Err(e) => println!("Error saving data: {e:#}"),
            },
            _ => println!("Invalid option. Please try again."),
        }
    }
    Ok(())
}

fn welcome(ctx: &AppContext) {
    println!("==========================================");
    println!("          TASKDECK - stay organized        ");
    println!("==========================================");
    println!(
        "\nWelcome! Today is {}",
        local_date_today().format("%A, %B %d, %Y")
    );
    println!("You have {} pending tasks.", ctx.tasks.open_count());
}

// ---------------------------------------------------------------------------
// Input helpers

/// Print a prompt and read one trimmed line; `None` on EOF
fn prompt(message: &str) -> Option<String> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Prompt and parse; parse failures yield `None` and are silently
/// ignored by callers (the field keeps its default)
fn prompt_parse<T: std::str::FromStr>(message: &str) -> Option<T> {
    prompt(message).and_then(|s| s.parse().ok())
}

/// Read lines until a line containing only `END`
fn read_multiline() -> String {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let line = line.trim_end_matches(['\r', '\n']);
                if line == "END" {
                    break;
                }
                lines.push(line.to_string());
            }
        }
    }
    lines.join("\n")
}

fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn confirm(message: &str) -> bool {
    prompt(message).is_some_and(|answer| answer.eq_ignore_ascii_case("y"))
}

fn pause() {
    prompt("\nPress Enter to continue...");
}

// ---------------------------------------------------------------------------
// Tasks

fn task_menu(ctx: &mut AppContext) {
    loop {
        println!("\n=== TASK MANAGEMENT ===");
        println!("1. Add New Task");
        println!("2. View All Tasks");
        println!("3. Update Task");
        println!("4. Mark Task Complete");
        println!("5. Delete Task");
        println!("6. Search Tasks");
        println!("7. Filter Tasks");
        println!("8. Start Task Timer");
        println!("9. Back to Main Menu");

        let Some(choice) = prompt("\nSelect an option: ") else {
            return;
        };
        match choice.as_str() {
            "1" => add_task(ctx),
            "2" => view_tasks(ctx),
            "3" => update_task(ctx),
            "4" => complete_task(ctx),
            "5" => delete_task(ctx),
            "6" => search_tasks(ctx),
            "7" => filter_tasks(ctx),
            "8" => start_task_timer(ctx),
            "9" => return,
            _ => println!("Invalid option."),
        }
        if choice != "9" {
            pause();
        }
    }
}

fn add_task(ctx: &mut AppContext) {
    println!("\n=== ADD NEW TASK ===");
    let Some(title) = prompt("Task Title: ") else {
        return;
    };
    let description = prompt("Description (optional): ").unwrap_or_default();
    let priority =
        prompt_parse::<Priority>("Priority (1=Low, 2=Medium, 3=High, 4=Critical): ")
            .unwrap_or_default();
    let due_date = prompt("Due Date (yyyy-mm-dd, or press Enter to skip): ")
        .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok());
    let estimated = prompt_parse::<f64>("Estimated time in hours (or press Enter to skip): ")
        .filter(|h| h.is_finite() && *h >= 0.0)
        .map(|h| Duration::from_secs_f64(h * 3600.0));
    let tags = prompt("Tags (comma-separated, optional): ")
        .map(|s| parse_tags(&s))
        .unwrap_or_default();

    let task = ctx.tasks.add(TaskDraft {
        title,
        description,
        priority,
        due_date,
        estimated,
        tags,
    });
    debug!(id = task.id, "task added");
    println!("\nTask '{}' added successfully!", task.title);
}

fn view_tasks(ctx: &AppContext) {
    println!("\n=== ALL TASKS ===\n");
    let tasks = ctx.tasks.list();
    if tasks.is_empty() {
        println!("No tasks found. Add some tasks to get started!");
        return;
    }
    let today = local_date_today();
    for task in tasks {
        println!("{}", format::task(task, today));
    }
}

fn update_task(ctx: &mut AppContext) {
    let Some(id) = prompt_parse::<u32>("Enter task ID to update: ") else {
        return;
    };
    let Some(task) = ctx.tasks.get(id) else {
        println!("Task not found.");
        return;
    };
    println!("Updating task: {}", task.title);
    let message = format!("New progress (0-100, current: {}): ", task.progress);
    let Some(progress) = prompt_parse::<i64>(&message) else {
        return;
    };
    match ctx.tasks.set_progress(id, progress) {
        Ok(_) => println!("Task updated successfully!"),
        Err(e) => println!("{e}"),
    }
}

fn complete_task(ctx: &mut AppContext) {
    let Some(id) = prompt_parse::<u32>("Enter task ID to mark complete: ") else {
        return;
    };
    match ctx.tasks.mark_complete(id) {
        Ok(task) => println!("Task '{}' marked as completed!", task.title),
        Err(_) => println!("Task not found."),
    }
}

fn delete_task(ctx: &mut AppContext) {
    let Some(id) = prompt_parse::<u32>("Enter task ID to delete: ") else {
        return;
    };
    let Some(task) = ctx.tasks.get(id) else {
        println!("Task not found.");
        return;
    };
    let question = format!("Are you sure you want to delete '{}'? (y/n): ", task.title);
    if confirm(&question) && ctx.tasks.delete(id) {
        debug!(id, "task deleted");
        println!("Task deleted successfully!");
    }
}

fn search_tasks(ctx: &AppContext) {
    let Some(term) = prompt("Enter search term: ") else {
        return;
    };
    let matches = ctx.tasks.search(&term);
    println!("\n=== SEARCH RESULTS for '{}' ===", term);
    if matches.is_empty() {
        println!("No matching tasks found.");
        return;
    }
    let today = local_date_today();
    for task in matches {
        println!("{}", format::task(task, today));
    }
}

fn filter_tasks(ctx: &AppContext) {
    println!("Filter by:");
    println!("1. Status");
    println!("2. Priority");
    println!("3. Due within 7 days");
    let Some(choice) = prompt("Select filter: ") else {
        return;
    };

    let filtered = match choice.as_str() {
        "1" => {
            match prompt_parse::<TaskStatus>("Status: 1=Pending, 2=InProgress, 3=Completed, 4=Cancelled: ")
            {
                Some(status) => ctx.tasks.filter_by_status(status),
                None => Vec::new(),
            }
        }
        "2" => match prompt_parse::<Priority>("Priority: 1=Low, 2=Medium, 3=High, 4=Critical: ") {
            Some(priority) => ctx.tasks.filter_by_priority(priority),
            None => Vec::new(),
        },
        "3" => ctx.tasks.filter_due_within(7, local_date_today()),
        _ => Vec::new(),
    };

    println!("\n=== FILTERED TASKS ===");
    let today = local_date_today();
    for task in filtered {
        println!("{}", format::task(task, today));
    }
}

fn start_task_timer(ctx: &mut AppContext) {
    let Some(id) = prompt_parse::<u32>("Enter task ID to start timer: ") else {
        return;
    };
    let title = match ctx.tasks.start_tracking(id) {
        Ok(task) => task.title.clone(),
        Err(_) => {
            println!("Task not found.");
            return;
        }
    };

    println!("\n=== TIMER: {} ===", title);
    println!("Press 'q' to quit timer\n");

    let elapsed_secs = {
        let _raw = RawModeGuard::enter();
        let mut ticker = KeyPollTicker::new(CancelKeys::Quit);
        run_stopwatch(&mut ticker, |elapsed| {
            print!("\rTime: {}", format::hms(Duration::from_secs(elapsed)));
            io::stdout().flush().ok();
        })
    };
    println!();

    let elapsed = Duration::from_secs(elapsed_secs);
    match ctx.tasks.record_elapsed(id, elapsed) {
        Ok(task) => {
            debug!(id, secs = elapsed_secs, "session recorded");
            println!("Timer stopped. Total time for this session: {}", format::hms(elapsed));
            println!("Total time on task: {}", format::hms(task.actual));
        }
        Err(_) => println!("Task not found."),
    }
}

// ---------------------------------------------------------------------------
// Notes

fn notes_menu(ctx: &mut AppContext) {
    loop {
        println!("\n=== NOTES MANAGEMENT ===");
        println!("1. Add New Note");
        println!("2. View All Notes");
        println!("3. Edit Note");
        println!("4. Search Notes");
        println!("5. Delete Note");
        println!("6. Back to Main Menu");

        let Some(choice) = prompt("\nSelect an option: ") else {
            return;
        };
        match choice.as_str() {
            "1" => add_note(ctx),
            "2" => view_notes(ctx),
            "3" => edit_note(ctx),
            "4" => search_notes(ctx),
            "5" => delete_note(ctx),
            "6" => return,
            _ => println!("Invalid option."),
        }
        if choice != "6" {
            pause();
        }
    }
}

fn add_note(ctx: &mut AppContext) {
    println!("\n=== ADD NEW NOTE ===");
    let Some(title) = prompt("Note Title: ") else {
        return;
    };
    println!("Note Content (type 'END' on a new line to finish):");
    let content = read_multiline();
    let tags = prompt("Tags (comma-separated, optional): ")
        .map(|s| parse_tags(&s))
        .unwrap_or_default();

    let note = ctx.notes.add(title, content, tags);
    debug!(id = note.id, "note added");
    println!("\nNote '{}' added successfully!", note.title);
}

fn view_notes(ctx: &AppContext) {
    println!("\n=== ALL NOTES ===\n");
    let notes = ctx.notes.list();
    if notes.is_empty() {
        println!("No notes found. Add some notes to get started!");
        return;
    }
    for note in notes {
        println!("{}{}", format::note(note), "-".repeat(50));
    }
}

fn edit_note(ctx: &mut AppContext) {
    let Some(id) = prompt_parse::<u32>("Enter note ID to edit: ") else {
        return;
    };
    let Some(note) = ctx.notes.get(id) else {
        println!("Note not found.");
        return;
    };
    println!("Editing note: {}", note.title);
    println!("Current content:");
    println!("{}", note.content);
    println!("\nNew content (type 'END' on a new line to finish):");
    let content = read_multiline();
    match ctx.notes.edit(id, content) {
        Ok(_) => println!("Note updated successfully!"),
        Err(_) => println!("Note not found."),
    }
}

fn search_notes(ctx: &AppContext) {
    let Some(term) = prompt("Enter search term: ") else {
        return;
    };
    let matches = ctx.notes.search(&term);
    println!("\n=== SEARCH RESULTS for '{}' ===", term);
    if matches.is_empty() {
        println!("No matching notes found.");
        return;
    }
    for note in matches {
        println!("[{}] {}", note.id, note.title);
        println!("Preview: {}\n", note.preview(crate::domain::PREVIEW_LEN));
    }
}

fn delete_note(ctx: &mut AppContext) {
    let Some(id) = prompt_parse::<u32>("Enter note ID to delete: ") else {
        return;
    };
    let Some(note) = ctx.notes.get(id) else {
        println!("Note not found.");
        return;
    };
    let question = format!("Are you sure you want to delete '{}'? (y/n): ", note.title);
    if confirm(&question) && ctx.notes.delete(id) {
        debug!(id, "note deleted");
        println!("Note deleted successfully!");
    }
}

// ---------------------------------------------------------------------------
// Timers

fn timer_menu() {
    println!("\n=== TIMER & STOPWATCH ===");
    println!("1. Countdown Timer");
    println!("2. Stopwatch");
    println!("3. Back to Main Menu");

    match prompt("\nSelect an option: ").as_deref() {
        Some("1") => countdown_timer(),
        Some("2") => stopwatch(),
        _ => {}
    }
}

fn countdown_timer() {
    let Some(minutes) = prompt_parse::<u64>("Enter minutes for countdown: ") else {
        return;
    };
    println!("\n=== COUNTDOWN: {} MINUTES ===", minutes);
    println!("Press any key to stop");

    let outcome = {
        let _raw = RawModeGuard::enter();
        let mut ticker = KeyPollTicker::new(CancelKeys::AnyKey);
        run_countdown(minutes * 60, &mut ticker, |remaining| {
            print!("\rTime remaining: {}", format::mmss(remaining));
            io::stdout().flush().ok();
        })
    };
    println!();
    if outcome == TimerOutcome::Finished {
        println!("\nTIME'S UP!");
    }
}

fn stopwatch() {
    println!("\n=== STOPWATCH ===");
    println!("Press any key to stop");

    let elapsed = {
        let _raw = RawModeGuard::enter();
        let mut ticker = KeyPollTicker::new(CancelKeys::AnyKey);
        run_stopwatch(&mut ticker, |elapsed| {
            print!("\rElapsed: {}", format::hms(Duration::from_secs(elapsed)));
            io::stdout().flush().ok();
        })
    };
    println!();
    println!("\nFinal time: {}", format::hms(Duration::from_secs(elapsed)));
}

// ---------------------------------------------------------------------------
// Pomodoro

fn pomodoro_menu(ctx: &mut AppContext) {
    let config = ctx.pomodoro.config();
    println!("\n=== POMODORO TECHNIQUE ===");
    println!(
        "Work: {} min | Short Break: {} min | Long Break: {} min",
        config.work_minutes, config.short_break_minutes, config.long_break_minutes
    );
    println!(
        "Sessions completed: {}",
        ctx.pomodoro.completed_work_sessions()
    );
    println!("\n1. Start Pomodoro Session");
    println!("2. Configure Settings");
    println!("3. Back to Main Menu");

    match prompt("\nSelect an option: ").as_deref() {
        Some("1") => start_pomodoro(ctx),
        Some("2") => configure_pomodoro(ctx),
        _ => {}
    }
}

fn start_pomodoro(ctx: &mut AppContext) {
    ctx.pomodoro.start_cycle();

    loop {
        let (phase, minutes) = ctx.pomodoro.next_phase();
        println!("\n=== POMODORO: {} ({} min) ===", phase.label(), minutes);
        println!("Press 'q' to quit, 's' to skip session");

        let total_secs = u64::from(minutes) * 60;
        let outcome = {
            let _raw = RawModeGuard::enter();
            let mut ticker = KeyPollTicker::new(CancelKeys::QuitOrSkip);
            run_countdown(total_secs, &mut ticker, |remaining| {
                let done = ((total_secs - remaining) * 100 / total_secs.max(1)) as u8;
                print!(
                    "\rTime remaining: {} {}",
                    format::mmss(remaining),
                    format::progress_bar(done)
                );
                io::stdout().flush().ok();
            })
        };
        println!();

        match outcome {
            TimerOutcome::Cancelled => break,
            TimerOutcome::Finished | TimerOutcome::Skipped => {
                // Skipping a phase advances and counts exactly like
                // finishing it.
                ctx.pomodoro.complete_phase(true);
                debug!(
                    sessions = ctx.pomodoro.completed_work_sessions(),
                    "phase complete"
                );
                println!("\n{} SESSION COMPLETE!", phase.label());
                let Some(answer) = prompt("\nPress Enter to continue or 'q' to quit... ") else {
                    break;
                };
                if answer.eq_ignore_ascii_case("q") {
                    break;
                }
            }
        }
    }
}

fn configure_pomodoro(ctx: &mut AppContext) {
    let config = ctx.pomodoro.config();
    println!("Current settings:");
    println!("Work session: {} minutes", config.work_minutes);
    println!("Short break: {} minutes", config.short_break_minutes);
    println!("Long break: {} minutes", config.long_break_minutes);
    println!(
        "Sessions until long break: {}",
        config.sessions_until_long_break
    );

    let work = prompt_parse::<i64>("\nEnter new work session minutes (or press Enter to keep current): ");
    let short_break = prompt_parse::<i64>("Enter new short break minutes (or press Enter to keep current): ");
    let long_break = prompt_parse::<i64>("Enter new long break minutes (or press Enter to keep current): ");
    let sessions = prompt_parse::<i64>("Enter new sessions until long break (or press Enter to keep current): ");

    ctx.pomodoro.configure(work, short_break, long_break, sessions);
    println!("\nPomodoro settings updated!");
}

// ---------------------------------------------------------------------------
// Statistics, export, help

fn show_statistics(ctx: &AppContext) {
    println!("\n=== STATISTICS & REPORTS ===");
    let stats = Statistics::collect(
        &ctx.tasks,
        &ctx.notes,
        ctx.pomodoro.config(),
        local_date_today(),
    );
    println!("{}", format::statistics(&stats));
    pause();
}

fn export_menu(ctx: &AppContext) {
    println!("\n=== EXPORT DATA ===");
    println!("1. Export Tasks to CSV");
    println!("2. Export Notes to Text File");
    println!("3. Export All Data to JSON");
    println!("4. Back to Main Menu");

    let result = match prompt("\nSelect export option: ").as_deref() {
        Some("1") => export::write_tasks_csv(ctx.tasks.tasks()),
        Some("2") => export::write_notes_text(&ctx.notes.list()),
        Some("3") => export::write_backup_json(
            ctx.tasks.tasks(),
            ctx.notes.notes(),
            ctx.pomodoro.config(),
        ),
        _ => return,
    };
    match result {
        Ok(path) => println!("Data exported to {}", path.display()),
        Err(e) => println!("Error exporting data: {e:#}"),
    }
    pause();
}

fn show_help() {
    println!("\n=== HELP & GUIDE ===");
    println!("\nTASK MANAGEMENT");
    println!("- Create tasks with priorities, due dates, and time estimates");
    println!("- Track progress with percentage completion");
    println!("- Use tags to organize and categorize tasks");
    println!("- Start timers to track actual time spent");
    println!("\nNOTES");
    println!("- Create quick notes and longer documents");
    println!("- Search through all notes by content, title, or tags");
    println!("\nTIME MANAGEMENT");
    println!("- Built-in countdown timer and stopwatch");
    println!("- Pomodoro cycles with configurable work/break lengths");
    println!("\nDATA");
    println!("- State is saved to the data file on exit (or type 'save')");
    println!("- Export tasks to CSV, notes to text, everything to JSON");
    println!("\nKEYBOARD");
    println!("- In timers: 'q' to quit, 's' to skip (Pomodoro)");
    println!("- In menus: type numbers or command names");
    pause();
}
