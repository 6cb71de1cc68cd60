//! taskdeck - main entry point.
//!
//! The actual implementation is in the `taskdeck` library; this just
//! parses arguments, wires up logging, and runs the menu loop.

use anyhow::Result;
use clap::Parser;
use taskdeck::AppContext;
use taskdeck::ui;
use tracing_subscriber::EnvFilter;

/// taskdeck - single-user task manager with notes, timers, and Pomodoro
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the data file
    #[arg(short, long, default_value = "taskdeck.json")]
    file: std::path::PathBuf,

    /// Log filter (e.g. "debug", "taskdeck=trace")
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut ctx = AppContext::open(&args.file)?;
    ui::run(&mut ctx)?;

    if let Err(e) = ctx.save() {
        eprintln!("Error saving data: {e:#}");
    } else {
        println!("Thanks for using taskdeck! Goodbye!");
    }
    Ok(())
}
