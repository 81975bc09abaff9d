//! Plain-text tables for projects and schedules.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::dates::format_date_relative;
use crate::fields::UpdateOutcome;
use crate::project::Project;

fn format_done(is_done: bool) -> &'static str {
    if is_done { "Done" } else { "Open" }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// One line per project.
pub fn render_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<6} {:<11} {:<11} {:>5} {:>5} {}",
        "ID", "Status", "Start", "End", "Weeks", "Days", "Name"
    );
    for p in projects {
        let id = p.id.to_string();
        let _ = writeln!(
            out,
            "{:<10} {:<6} {:<11} {:<11} {:>5} {:>5} {}",
            &id[..8],
            format_done(p.is_done),
            p.start_date,
            p.end_date,
            p.weekly_tasks().count(),
            p.daily_tasks().count(),
            p.name
        );
    }
    out
}

/// Project header followed by the weekly and daily tables.
pub fn render_schedule(project: &Project, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", project.name, project.id);
    if !project.description.is_empty() {
        let _ = writeln!(out, "  {}", project.description);
    }
    let _ = writeln!(
        out,
        "  {} -> {} ({} days) [{}]",
        project.start_date,
        project.end_date,
        project.estimated_days,
        format_done(project.is_done)
    );
    let next_day = project
        .next_daily_task_date()
        .map(|d| d.to_string())
        .unwrap_or_else(|| project.start_date.to_string());
    let _ = writeln!(
        out,
        "  {} week(s) and {} day(s) appended; next week slot {}, next day slot {}",
        project.week_count(),
        project.day_count(),
        project.next_weekly_task_date(),
        next_day
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Weeks");
    if project.weekly_tasks().next().is_none() {
        let _ = writeln!(out, "  (none)");
    } else {
        let _ = writeln!(
            out,
            "  {:<5} {:<6} {:<11} {:<10} {:<24} {}",
            "Week", "Status", "Start", "When", "Title", "Days"
        );
        for w in project.weekly_tasks() {
            let days = w
                .daily_tasks()
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(
                out,
                "  {:<5} {:<6} {:<11} {:<10} {:<24} {}",
                w.week,
                format_done(w.task.is_done),
                w.task.start_date,
                format_date_relative(Some(w.task.start_date), today),
                truncate(&w.task.name, 24),
                if days.is_empty() { "-".to_string() } else { days }
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Days");
    if project.daily_tasks().next().is_none() {
        let _ = writeln!(out, "  (none)");
    } else {
        let _ = writeln!(
            out,
            "  {:<5} {:<6} {:<11} {:<10} {:<5} {}",
            "Day", "Status", "Start", "When", "Week", "Title"
        );
        for t in project.daily_tasks() {
            let week = project
                .week_of_day(t.day)
                .map(|w| w.to_string())
                .unwrap_or_else(|| "-".into());
            let _ = writeln!(
                out,
                "  {:<5} {:<6} {:<11} {:<10} {:<5} {}",
                t.day,
                format_done(t.task.is_done),
                t.task.start_date,
                format_date_relative(Some(t.task.start_date), today),
                week,
                t.task.name
            );
        }
    }
    out
}

/// Summarise an update: which keys landed and which were dropped.
pub fn render_outcome(outcome: &UpdateOutcome) -> String {
    let mut out = String::new();
    if outcome.is_noop() {
        out.push_str("Nothing updated.\n");
    } else {
        let _ = writeln!(out, "Updated {}.", outcome.applied.join(", "));
    }
    for (key, reason) in &outcome.ignored {
        let _ = writeln!(out, "Ignored {key}: {reason}.");
    }
    out
}
