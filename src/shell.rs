//! Line-oriented session over one in-memory project manager.
//!
//! Each input line is split shell-style and parsed with clap into a
//! [`ShellCommand`]. Project arguments accept a name, a full id or an id
//! prefix. Errors are reported and the session continues.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::cli::estimate_parser;
use crate::dates::parse_date_input;
use crate::error::{PlannerError, Result};
use crate::fields::build_updates;
use crate::manager::ProjectManager;
use crate::project::NewProject;
use crate::report::{render_outcome, render_projects, render_schedule};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true, name = "planner shell")]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Create a project.
    New {
        name: String,
        /// Longer description.
        #[arg(long, default_value = "")]
        desc: String,
        /// Estimated duration in days.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true, value_parser = estimate_parser())]
        days: i64,
        /// Start date (defaults to today).
        #[arg(long)]
        start: Option<String>,
        /// Create the project already completed.
        #[arg(long)]
        done: bool,
    },

    /// List projects.
    Projects,

    /// Show a project's schedule.
    Show {
        project: String,
        /// Print the project as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Update project fields: name, description, estimatedDays, isDone, startDate.
    Set {
        project: String,
        /// key=value pairs.
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Mark a project complete.
    Done { project: String },

    /// Delete a project.
    Rm { project: String },

    /// Recompute a project's end date from its start date and estimate.
    EndDate { project: String },

    /// Append a weekly task.
    AddWeek {
        project: String,
        title: String,
        #[arg(long, default_value = "")]
        desc: String,
    },

    /// Append a daily task.
    AddDay {
        project: String,
        title: String,
        #[arg(long, default_value = "")]
        desc: String,
    },

    /// Remove a weekly task and its linked days.
    RmWeek { project: String, week: u32 },

    /// Remove a daily task.
    RmDay { project: String, day: u32 },

    /// Mark a weekly task complete.
    DoneWeek { project: String, week: u32 },

    /// Mark a daily task complete.
    DoneDay { project: String, day: u32 },

    /// Update weekly task fields: name, description, estimatedDays, isDone, startDate.
    SetWeek {
        project: String,
        week: u32,
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Update daily task fields: name, description, estimatedDays, isDone, startDate.
    SetDay {
        project: String,
        day: u32,
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Leave the session.
    #[command(alias = "exit")]
    Quit,
}

/// Which task collection an add command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cadence {
    Weekly,
    Daily,
}

impl Cadence {
    fn label(&self) -> &'static str {
        match self {
            Cadence::Weekly => "week",
            Cadence::Daily => "day",
        }
    }
}

/// Whether the session should keep reading.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Split a line into words. Single or double quotes group words, a backslash
/// escapes the next character outside single quotes, and an unquoted `#` at
/// the start of a word begins a comment.
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('"') if c == '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_word = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_word = true;
                }
                '#' if !in_word => break,
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }

    if let Some(q) = quote {
        return Err(PlannerError::Parse(format!("unterminated {q} quote")));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    /// Blank or comment-only.
    Blank,
    Command(ShellCommand),
    /// `help` or `--help` was requested; holds the rendered text.
    Help(String),
}

pub fn parse_line(line: &str) -> Result<Line> {
    let words = split_line(line)?;
    if words.is_empty() {
        return Ok(Line::Blank);
    }
    match ShellLine::try_parse_from(words) {
        Ok(parsed) => Ok(Line::Command(parsed.command)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Ok(Line::Help(e.render().to_string()))
            }
            _ => Err(PlannerError::Parse(e.render().to_string().trim_end().to_string())),
        },
    }
}

fn parse_date_arg(raw: &str, today: NaiveDate) -> Result<NaiveDate> {
    parse_date_input(raw, today).ok_or_else(|| PlannerError::InvalidDate(raw.to_string()))
}

/// Execute one command against the manager, writing user output to `out`.
pub fn execute(manager: &mut ProjectManager, command: ShellCommand, out: &mut impl Write) -> Result<Flow> {
    let today = manager.today();
    match command {
        ShellCommand::New { name, desc, days, start, done } => {
            let start_date = start.as_deref().map(|s| parse_date_arg(s, today)).transpose()?;
            let project = manager.create_project(NewProject {
                name,
                description: desc,
                estimated_days: days,
                is_done: done,
                start_date,
            });
            writeln!(out, "Created project {} ({})", project.name, project.id)?;
        }
        ShellCommand::Projects => {
            write!(out, "{}", render_projects(manager.get_all_projects()))?;
        }
        ShellCommand::Show { project, json } => {
            let id = manager.resolve_project(&project)?;
            let project = manager
                .get_project_by_id(id)
                .ok_or(PlannerError::ProjectNotFound(id))?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(project)?)?;
            } else {
                write!(out, "{}", render_schedule(project, today))?;
            }
        }
        ShellCommand::Set { project, fields } => {
            let id = manager.resolve_project(&project)?;
            let project = manager
                .get_project_by_id(id)
                .ok_or(PlannerError::ProjectNotFound(id))?;
            let updates = build_updates(project, &fields, today)?;
            let outcome = manager.update_project(id, &updates)?;
            write!(out, "{}", render_outcome(&outcome))?;
        }
        ShellCommand::Done { project } => {
            let id = manager.resolve_project(&project)?;
            let project = manager.project_mut(id)?;
            project.mark_complete();
            writeln!(out, "Completed project {}", project.name)?;
        }
        ShellCommand::Rm { project } => {
            let id = manager.resolve_project(&project)?;
            if let Some(removed) = manager.delete_project_by_id(id) {
                writeln!(out, "Deleted project {}", removed.name)?;
            }
        }
        ShellCommand::EndDate { project } => {
            let id = manager.resolve_project(&project)?;
            let project = manager.project_mut(id)?;
            if !project.set_end_date() {
                return Err(PlannerError::InvalidValue {
                    key: "estimatedDays".into(),
                    reason: format!(
                        "{} days from {} is outside the calendar",
                        project.estimated_days, project.start_date
                    ),
                });
            }
            writeln!(out, "End date {}", project.end_date)?;
        }
        ShellCommand::AddWeek { project, title, desc } => {
            add_task(manager, &project, Cadence::Weekly, &title, &desc, out)?;
        }
        ShellCommand::AddDay { project, title, desc } => {
            add_task(manager, &project, Cadence::Daily, &title, &desc, out)?;
        }
        ShellCommand::RmWeek { project, week } => {
            let id = manager.resolve_project(&project)?;
            let removed = manager
                .remove_weekly_task(id, week)?
                .ok_or(PlannerError::WeekNotFound(week))?;
            writeln!(
                out,
                "Removed week {} ({}) and {} linked day(s)",
                removed.week,
                removed.task.name,
                removed.daily_tasks().len()
            )?;
        }
        ShellCommand::RmDay { project, day } => {
            let id = manager.resolve_project(&project)?;
            let removed = manager
                .remove_daily_task(id, day)?
                .ok_or(PlannerError::DayNotFound(day))?;
            writeln!(out, "Removed day {} ({})", removed.day, removed.task.name)?;
        }
        ShellCommand::DoneWeek { project, week } => {
            let id = manager.resolve_project(&project)?;
            if !manager.project_mut(id)?.complete_weekly_task(week) {
                return Err(PlannerError::WeekNotFound(week));
            }
            writeln!(out, "Completed week {week}")?;
        }
        ShellCommand::DoneDay { project, day } => {
            let id = manager.resolve_project(&project)?;
            if !manager.project_mut(id)?.complete_daily_task(day) {
                return Err(PlannerError::DayNotFound(day));
            }
            writeln!(out, "Completed day {day}")?;
        }
        ShellCommand::SetWeek { project, week, fields } => {
            let id = manager.resolve_project(&project)?;
            let project = manager.project_mut(id)?;
            let task = project.weekly_task(week).ok_or(PlannerError::WeekNotFound(week))?;
            let updates = build_updates(&task.task, &fields, today)?;
            let outcome = project
                .update_weekly_task(week, &updates)
                .ok_or(PlannerError::WeekNotFound(week))?;
            write!(out, "{}", render_outcome(&outcome))?;
        }
        ShellCommand::SetDay { project, day, fields } => {
            let id = manager.resolve_project(&project)?;
            let project = manager.project_mut(id)?;
            let task = project.daily_task(day).ok_or(PlannerError::DayNotFound(day))?;
            let updates = build_updates(&task.task, &fields, today)?;
            let outcome = project
                .update_daily_task(day, &updates)
                .ok_or(PlannerError::DayNotFound(day))?;
            write!(out, "{}", render_outcome(&outcome))?;
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn add_task(
    manager: &mut ProjectManager,
    project: &str,
    cadence: Cadence,
    title: &str,
    desc: &str,
    out: &mut impl Write,
) -> Result<()> {
    let id = manager.resolve_project(project)?;
    let number = match cadence {
        Cadence::Weekly => manager.append_weekly_task(id, title, desc)?,
        Cadence::Daily => manager.append_daily_task(id, title, desc)?,
    };
    let project = manager
        .get_project_by_id(id)
        .ok_or(PlannerError::ProjectNotFound(id))?;
    let start = match cadence {
        Cadence::Weekly => project.weekly_task(number).map(|w| w.task.start_date),
        Cadence::Daily => project.daily_task(number).map(|t| t.task.start_date),
    };
    match start {
        Some(start) => writeln!(out, "Added {} {} starting {}", cadence.label(), number, start)?,
        None => writeln!(out, "Added {} {}", cadence.label(), number)?,
    }
    if cadence == Cadence::Daily {
        match project.week_of_day(number) {
            Some(week) => writeln!(out, "  linked to week {week}")?,
            None => writeln!(out, "  not inside any week")?,
        }
    }
    Ok(())
}

/// Read commands from `input` until end of input or `quit`.
///
/// `prompt` is written before each line when reading interactively. Command
/// errors go to `err`; in non-interactive mode they are also logged with the
/// line number.
pub fn run_session(
    manager: &mut ProjectManager,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
    prompt: Option<&str>,
) -> Result<()> {
    if let Some(p) = prompt {
        write!(out, "{p}")?;
        out.flush()?;
    }
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let result = parse_line(&line).and_then(|parsed| match parsed {
            Line::Command(cmd) => execute(manager, cmd, out),
            Line::Help(text) => {
                write!(out, "{text}")?;
                Ok(Flow::Continue)
            }
            Line::Blank => Ok(Flow::Continue),
        });
        match result {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                if prompt.is_none() {
                    warn!(line = idx + 1, "command failed: {e}");
                }
                writeln!(err, "error: {e}")?;
            }
        }
        if let Some(p) = prompt {
            write!(out, "{p}")?;
            out.flush()?;
        }
    }
    Ok(())
}
