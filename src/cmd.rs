//! Command implementations for the CLI interface.
//!
//! `plan` previews a schedule in one shot, `shell` runs an interactive (or
//! scripted) session over one in-memory manager, and `completions` prints
//! shell completion scripts.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::{estimate_parser, Cli};
use crate::dates::parse_date_input;
use crate::error::{PlannerError, Result};
use crate::manager::ProjectManager;
use crate::project::NewProject;
use crate::report::render_schedule;
use crate::shell::run_session;

#[derive(Subcommand)]
pub enum Commands {
    /// Preview the schedule for a project and its tasks.
    Plan {
        /// Project name.
        name: String,
        /// Optional longer description.
        #[arg(long, default_value = "")]
        desc: String,
        /// Estimated duration in days.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true, value_parser = estimate_parser())]
        days: i64,
        /// Start date: YYYY-MM-DD, "today", "next monday", "in 3d", ...
        #[arg(long)]
        start: Option<String>,
        /// Weekly task title. May be repeated; weeks are appended in order.
        #[arg(long = "week")]
        weeks: Vec<String>,
        /// Daily task title. May be repeated; days are appended after the weeks.
        #[arg(long = "daily")]
        daily: Vec<String>,
        /// Print the project as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session (type `help` for commands).
    Shell {
        /// Read commands from a file instead of stdin.
        #[arg(long)]
        script: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Build a project from the arguments and print its schedule.
pub fn cmd_plan(
    manager: &mut ProjectManager,
    out: &mut impl Write,
    name: String,
    desc: String,
    days: i64,
    start: Option<String>,
    weeks: Vec<String>,
    daily: Vec<String>,
    json: bool,
) -> Result<()> {
    let today = manager.today();
    let start_date = match start {
        Some(s) => Some(parse_date_input(&s, today).ok_or(PlannerError::InvalidDate(s))?),
        None => None,
    };

    let id = manager
        .create_project(NewProject {
            name,
            description: desc,
            estimated_days: days,
            is_done: false,
            start_date,
        })
        .id;
    for title in &weeks {
        manager.append_weekly_task(id, title, "")?;
    }
    for title in &daily {
        manager.append_daily_task(id, title, "")?;
    }

    let project = manager
        .get_project_by_id(id)
        .ok_or(PlannerError::ProjectNotFound(id))?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(project)?)?;
    } else {
        write!(out, "{}", render_schedule(project, today))?;
    }
    Ok(())
}

/// Run a session over stdin, or over a script file when given.
pub fn cmd_shell(manager: &mut ProjectManager, script: Option<PathBuf>) -> Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    match script {
        Some(path) => {
            info!(script = %path.display(), "running script");
            let file = File::open(&path)?;
            run_session(manager, BufReader::new(file), &mut out, &mut err, None)
        }
        None => {
            let stdin = io::stdin();
            let prompt = if stdin.is_terminal() { Some("planner> ") } else { None };
            run_session(manager, stdin.lock(), &mut out, &mut err, prompt)
        }
    }
}

/// Print a completion script for `shell` to stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedClock, SequentialIds};
    use chrono::NaiveDate;

    fn manager() -> ProjectManager {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ProjectManager::new(Box::new(FixedClock(today)), Box::new(SequentialIds::new()))
    }

    #[test]
    fn test_cmd_plan_prints_schedule() {
        let mut m = manager();
        let mut out = Vec::new();
        cmd_plan(
            &mut m,
            &mut out,
            "Launch".into(),
            String::new(),
            14,
            None,
            vec!["Design".into(), "Build".into()],
            vec!["Kickoff".into(), "Sketch".into()],
            false,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("2024-01-01 -> 2024-01-15"));
        assert!(text.contains("Build"));
        assert!(text.contains("in 7d"));
        assert!(text.contains("Sketch"));
    }

    #[test]
    fn test_cmd_plan_json_and_start_date() {
        let mut m = manager();
        let mut out = Vec::new();
        cmd_plan(
            &mut m,
            &mut out,
            "Launch".into(),
            String::new(),
            7,
            Some("in 2d".into()),
            vec!["Design".into()],
            vec!["Kickoff".into()],
            true,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["startDate"], "2024-01-03");
        assert_eq!(value["endDate"], "2024-01-10");
        assert_eq!(value["weeklyTasks"]["1"]["dailyTasks"][0], 1);
    }

    #[test]
    fn test_cmd_plan_rejects_bad_start() {
        let mut m = manager();
        let mut out = Vec::new();
        let err = cmd_plan(
            &mut m,
            &mut out,
            "Launch".into(),
            String::new(),
            7,
            Some("someday".into()),
            vec![],
            vec![],
            false,
        )
        .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidDate(_)));
        assert!(m.get_all_projects().is_empty());
    }

    #[test]
    fn test_cmd_plan_rejects_start_outside_calendar() {
        let mut m = manager();
        let mut out = Vec::new();
        let err = cmd_plan(
            &mut m,
            &mut out,
            "Launch".into(),
            String::new(),
            7,
            Some("in 99999999999d".into()),
            vec![],
            vec![],
            false,
        )
        .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidDate(_)));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
