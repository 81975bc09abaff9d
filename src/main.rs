//! # Planner - weekly and daily project schedules
//!
//! An in-memory project planner. Each project owns a schedule of weekly and
//! daily tasks whose start dates are derived from the project's start date.
//!
//! ## Key Features
//!
//! - **Derived dates**: the k-th weekly task starts `7·(k-1)` days after the
//!   project start, the k-th daily task `k-1` days after it
//! - **Week/day linkage**: each daily task is linked into the week whose
//!   seven-day window contains it
//! - **Repairing removals**: removing a week that has started cascades into its
//!   days and pulls later weeks back one slot
//! - **Keyed updates**: `name=...`, `startDate=...` updates that report what was
//!   applied and what was ignored
//!
//! ## Quick Start
//!
//! ```bash
//! # Preview a schedule
//! planner plan "Website relaunch" --days 21 --start "next monday" \
//!     --week Design --week Build --week Launch --daily Kickoff --daily Wireframes
//!
//! # Work interactively
//! planner shell
//! planner> new Relaunch --days 21 --start 2024-06-03
//! planner> add-week Relaunch Design
//! planner> add-day Relaunch Kickoff
//! planner> show Relaunch
//!
//! # Replay a script against a pinned date
//! planner --today 2024-06-10 shell --script plan.txt
//! ```
//!
//! Nothing is written to disk; a session's projects live until it exits.

use chrono::Local;
use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod dates;
pub mod env;
pub mod error;
pub mod fields;
pub mod logging;
pub mod manager;
pub mod project;
pub mod report;
pub mod shell;
pub mod task;

use cli::Cli;
use cmd::*;
use dates::parse_date_input;
use env::{Clock, FixedClock, IdSupplier, RandomIds, SequentialIds, SystemClock};
use logging::init_tracing;
use manager::ProjectManager;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let clock: Box<dyn Clock> = match cli.today.as_deref() {
        Some(raw) => match parse_date_input(raw, Local::now().date_naive()) {
            Some(today) => Box::new(FixedClock(today)),
            None => {
                eprintln!("Invalid --today date: {raw}");
                std::process::exit(1);
            }
        },
        None => Box::new(SystemClock),
    };
    let ids: Box<dyn IdSupplier> = if cli.sequential_ids {
        Box::new(SequentialIds::new())
    } else {
        Box::new(RandomIds)
    };
    let mut manager = ProjectManager::new(clock, ids);

    let result = match cli.command {
        Commands::Plan { name, desc, days, start, weeks, daily, json } => {
            let stdout = std::io::stdout();
            cmd_plan(&mut manager, &mut stdout.lock(), name, desc, days, start, weeks, daily, json)
        }
        Commands::Shell { script } => cmd_shell(&mut manager, script),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
