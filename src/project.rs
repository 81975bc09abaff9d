//! The project aggregate and its scheduling rules.
//!
//! A project owns two ordered collections keyed by sequence number: weekly
//! tasks and daily tasks. New tasks are appended at the next free date of
//! their cadence (7 days for weeks, 1 day for days). Each daily task is linked
//! into the first week whose window contains its start date. Removing a week
//! cascades into its linked days and, for weeks already underway, pulls later
//! weeks back so the cadence stays continuous.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dates::{add_days, in_week_window, WEEK_LENGTH_DAYS};
use crate::env::IdSupplier;
use crate::fields::{apply_updates, FieldKind, FieldSlot, FieldValue, Updatable, UpdateOutcome, Updates};
use crate::task::{DailyTask, Task, TaskRecord, WeeklyTask};

/// Largest estimate, in either direction, the command line accepts. Larger
/// values put the end date outside the representable calendar.
pub const MAX_ESTIMATED_DAYS: i64 = 1_000_000;

/// Input for creating a project. Values arrive already typed.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub estimated_days: i64,
    pub is_done: bool,
    /// Defaults to the clock's current date.
    pub start_date: Option<NaiveDate>,
}

/// A project with its weekly and daily schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub estimated_days: i64,
    pub is_done: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    week_count: u32,
    day_count: u32,
    next_weekly_task_date: NaiveDate,
    next_daily_task_date: Option<NaiveDate>,
    weekly_tasks: BTreeMap<u32, WeeklyTask>,
    daily_tasks: BTreeMap<u32, DailyTask>,
}

impl Project {
    pub fn new(input: NewProject, id: Uuid, today: NaiveDate) -> Self {
        let start_date = input.start_date.unwrap_or(today);
        let mut project = Project {
            id,
            name: input.name,
            description: input.description,
            estimated_days: input.estimated_days,
            is_done: input.is_done,
            start_date,
            end_date: start_date,
            week_count: 0,
            day_count: 0,
            next_weekly_task_date: start_date,
            next_daily_task_date: Some(start_date),
            weekly_tasks: BTreeMap::new(),
            daily_tasks: BTreeMap::new(),
        };
        project.set_end_date();
        project
    }

    pub fn mark_complete(&mut self) {
        self.is_done = true;
    }

    /// Recompute `end_date` from `start_date` and `estimated_days`.
    /// Not automatic: call again after changing either field.
    ///
    /// Returns `false` and leaves `end_date` unchanged when the sum falls
    /// outside the calendar.
    pub fn set_end_date(&mut self) -> bool {
        match add_days(self.start_date, self.estimated_days) {
            Some(end) => {
                self.end_date = end;
                true
            }
            None => {
                warn!(
                    project = %self.id,
                    start = %self.start_date,
                    estimated_days = self.estimated_days,
                    "end date out of range; keeping {}",
                    self.end_date
                );
                false
            }
        }
    }

    /// Overwrite the project fields named in `updates`.
    pub fn update_project(&mut self, updates: &Updates) -> UpdateOutcome {
        apply_updates(self, updates)
    }

    pub fn week_count(&self) -> u32 {
        self.week_count
    }

    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    /// Start date the next appended weekly task will receive.
    pub fn next_weekly_task_date(&self) -> NaiveDate {
        self.next_weekly_task_date
    }

    /// Start date the next appended daily task will receive; `None` once every
    /// daily task has been removed, in which case appends restart at the
    /// project start date.
    pub fn next_daily_task_date(&self) -> Option<NaiveDate> {
        self.next_daily_task_date
    }

    pub fn weekly_task(&self, week: u32) -> Option<&WeeklyTask> {
        self.weekly_tasks.get(&week)
    }

    pub fn daily_task(&self, day: u32) -> Option<&DailyTask> {
        self.daily_tasks.get(&day)
    }

    /// Weekly tasks in week-number order.
    pub fn weekly_tasks(&self) -> impl Iterator<Item = &WeeklyTask> {
        self.weekly_tasks.values()
    }

    /// Daily tasks in day-number order.
    pub fn daily_tasks(&self) -> impl Iterator<Item = &DailyTask> {
        self.daily_tasks.values()
    }

    /// The week a daily task is linked into, if any.
    pub fn week_of_day(&self, day: u32) -> Option<u32> {
        self.weekly_tasks
            .values()
            .find(|w| w.daily_tasks().contains(&day))
            .map(|w| w.week)
    }

    /// Append a weekly task at the next weekly slot and return its week number.
    pub fn append_to_weekly_tasks(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        ids: &dyn IdSupplier,
    ) -> u32 {
        let start_date = self.next_weekly_task_date;
        self.week_count += 1;
        let week = self.week_count;

        let task = WeeklyTask::new(Task::new(title, description, start_date), self.id, ids.next_id(), week);
        self.weekly_tasks.insert(week, task);
        self.next_weekly_task_date = add_days(start_date, WEEK_LENGTH_DAYS).unwrap_or(NaiveDate::MAX);

        debug!(project = %self.id, week, %start_date, "appended weekly task");
        week
    }

    /// Append a daily task at the next daily slot, link it into the week that
    /// contains it, and return its day number.
    pub fn append_to_daily_tasks(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        ids: &dyn IdSupplier,
    ) -> u32 {
        let start_date = self.next_daily_task_date.unwrap_or(self.start_date);
        self.day_count += 1;
        let day = self.day_count;

        let task = DailyTask::new(Task::new(title, description, start_date), self.id, ids.next_id(), day);
        self.daily_tasks.insert(day, task);
        self.next_daily_task_date = Some(add_days(start_date, 1).unwrap_or(NaiveDate::MAX));

        let week = self
            .weekly_tasks
            .values_mut()
            .find(|w| in_week_window(start_date, w.task.start_date));
        match week {
            Some(week) => {
                week.link_day(day);
                debug!(project = %self.id, day, week = week.week, %start_date, "appended daily task");
            }
            None => debug!(project = %self.id, day, %start_date, "appended unassigned daily task"),
        }
        day
    }

    /// Remove a weekly task together with its linked daily tasks.
    ///
    /// When the removed week had already started (`start_date <= today`) and
    /// week `week + 1` exists, the run of consecutively numbered weeks after it
    /// each move back into their predecessor's slot; the next weekly date is
    /// left alone. A started week with no `week + 1` instead hands its start
    /// date back as the next weekly date. Removing a week that has not
    /// started leaves every other date untouched.
    pub fn remove_from_weekly_tasks(&mut self, week: u32, today: NaiveDate) -> Option<WeeklyTask> {
        let Some(removed) = self.weekly_tasks.remove(&week) else {
            debug!(project = %self.id, week, "no weekly task to remove");
            return None;
        };

        for &day in removed.daily_tasks() {
            self.remove_from_daily_tasks(day);
        }

        let removed_start = removed.task.start_date;
        if removed_start <= today {
            let mut next = week.saturating_add(1);
            if self.weekly_tasks.contains_key(&next) {
                let mut vacated = removed_start;
                while let Some(later) = self.weekly_tasks.get_mut(&next) {
                    vacated = std::mem::replace(&mut later.task.start_date, vacated);
                    match next.checked_add(1) {
                        Some(n) => next = n,
                        None => break,
                    }
                }
                debug!(project = %self.id, week, through = next - 1, "shifted later weeks back");
            } else {
                self.next_weekly_task_date = removed_start;
                debug!(project = %self.id, week, next = %removed_start, "reclaimed weekly slot");
            }
        }

        info!(
            project = %self.id,
            week,
            cascaded = removed.daily_tasks().len(),
            "removed weekly task"
        );
        Some(removed)
    }

    /// Remove a daily task and unlink it from its week.
    pub fn remove_from_daily_tasks(&mut self, day: u32) -> Option<DailyTask> {
        let Some(removed) = self.daily_tasks.remove(&day) else {
            debug!(project = %self.id, day, "no daily task to remove");
            return None;
        };

        self.next_daily_task_date = self.daily_tasks.values().map(|t| t.task.start_date).min();

        if let Some(week) = self
            .weekly_tasks
            .values_mut()
            .find(|w| w.daily_tasks().contains(&day))
        {
            week.unlink_day(day);
        }

        info!(project = %self.id, day, "removed daily task");
        Some(removed)
    }

    /// Mark a weekly task done. Returns `false` if the week does not exist.
    pub fn complete_weekly_task(&mut self, week: u32) -> bool {
        match self.weekly_tasks.get_mut(&week) {
            Some(w) => {
                w.mark_complete();
                true
            }
            None => false,
        }
    }

    /// Mark a daily task done. Returns `false` if the day does not exist.
    pub fn complete_daily_task(&mut self, day: u32) -> bool {
        match self.daily_tasks.get_mut(&day) {
            Some(t) => {
                t.mark_complete();
                true
            }
            None => false,
        }
    }

    /// Update a weekly task's own fields. `None` if the week does not exist.
    pub fn update_weekly_task(&mut self, week: u32, updates: &Updates) -> Option<UpdateOutcome> {
        self.weekly_tasks.get_mut(&week).map(|w| w.update_task(updates))
    }

    /// Update a daily task's own fields. `None` if the day does not exist.
    /// Links are not re-evaluated when the start date changes.
    pub fn update_daily_task(&mut self, day: u32, updates: &Updates) -> Option<UpdateOutcome> {
        self.daily_tasks.get_mut(&day).map(|t| t.update_task(updates))
    }
}

impl Updatable for Project {
    fn field_slot(&self, key: &str) -> Option<FieldSlot> {
        match key {
            "name" | "description" => Some(FieldSlot::Editable(FieldKind::Text)),
            "estimateddays" => Some(FieldSlot::Editable(FieldKind::Integer)),
            "isdone" => Some(FieldSlot::Editable(FieldKind::Bool)),
            "startdate" => Some(FieldSlot::Editable(FieldKind::Date)),
            "id" | "enddate" | "weekcount" | "daycount" | "weeklytasks" | "dailytasks"
            | "nextweeklytaskdate" | "nextdailytaskdate" => Some(FieldSlot::Protected),
            _ => None,
        }
    }

    fn assign(&mut self, key: &str, value: FieldValue) {
        match (key, value) {
            ("name", FieldValue::Text(v)) => self.name = v,
            ("description", FieldValue::Text(v)) => self.description = v,
            ("estimateddays", FieldValue::Integer(v)) => self.estimated_days = v,
            ("isdone", FieldValue::Bool(v)) => self.is_done = v,
            ("startdate", FieldValue::Date(v)) => self.start_date = v,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequentialIds;
    use crate::fields::IgnoreReason;

    fn day0() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn day(n: i64) -> NaiveDate {
        add_days(day0(), n).unwrap()
    }

    fn project(estimated_days: i64) -> Project {
        Project::new(
            NewProject {
                name: "Launch".into(),
                description: "Ship it".into(),
                estimated_days,
                is_done: false,
                start_date: Some(day0()),
            },
            Uuid::from_u128(100),
            day(30),
        )
    }

    #[test]
    fn test_new_project_defaults() {
        let p = project(14);
        assert_eq!(p.end_date, day(14));
        assert_eq!(p.next_weekly_task_date(), day0());
        assert_eq!(p.next_daily_task_date(), Some(day0()));
        assert_eq!(p.week_count(), 0);
        assert_eq!(p.day_count(), 0);

        let p = Project::new(NewProject::default(), Uuid::from_u128(1), day(5));
        assert_eq!(p.start_date, day(5));
        assert_eq!(p.end_date, day(5));
    }

    #[test]
    fn test_weekly_tasks_advance_seven_days() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        for k in 1..=5u32 {
            assert_eq!(p.append_to_weekly_tasks(format!("w{k}"), "", &ids), k);
        }
        for (k, w) in p.weekly_tasks().enumerate() {
            assert_eq!(w.task.start_date, day(7 * k as i64));
            assert_eq!(w.project_id, p.id);
            assert!(!w.task.is_done);
        }
        assert_eq!(p.next_weekly_task_date(), day(35));
        assert_eq!(p.week_count(), 5);
    }

    #[test]
    fn test_daily_tasks_advance_one_day() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        for k in 1..=10u32 {
            assert_eq!(p.append_to_daily_tasks(format!("d{k}"), "", &ids), k);
        }
        for (k, t) in p.daily_tasks().enumerate() {
            assert_eq!(t.task.start_date, day(k as i64));
        }
        assert_eq!(p.next_daily_task_date(), Some(day(10)));
    }

    #[test]
    fn test_daily_task_links_into_containing_week_only() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        p.append_to_weekly_tasks("w1", "", &ids);
        p.append_to_weekly_tasks("w2", "", &ids);
        for k in 0..9 {
            p.append_to_daily_tasks(format!("d{k}"), "", &ids);
        }

        assert_eq!(p.weekly_task(1).unwrap().daily_tasks(), &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(p.weekly_task(2).unwrap().daily_tasks(), &[8, 9]);
        for t in p.daily_tasks() {
            let linked = p.weekly_tasks().filter(|w| w.daily_tasks().contains(&t.day)).count();
            assert_eq!(linked, 1);
        }
    }

    #[test]
    fn test_daily_task_without_week_is_unassigned() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        p.append_to_weekly_tasks("w1", "", &ids);
        for _ in 0..8 {
            p.append_to_daily_tasks("d", "", &ids);
        }
        assert_eq!(p.week_of_day(7), Some(1));
        assert_eq!(p.week_of_day(8), None);
        assert_eq!(p.weekly_task(1).unwrap().daily_tasks().len(), 7);
    }

    #[test]
    fn test_scenario_remove_started_first_week() {
        let ids = SequentialIds::new();
        let mut p = project(14);
        assert_eq!(p.end_date, day(14));

        p.append_to_weekly_tasks("Design", "", &ids);
        p.append_to_weekly_tasks("Build", "", &ids);
        assert_eq!(p.weekly_task(1).unwrap().task.start_date, day(0));
        assert_eq!(p.weekly_task(2).unwrap().task.start_date, day(7));

        for name in ["Kickoff", "Sketch", "Review"] {
            p.append_to_daily_tasks(name, "", &ids);
        }
        assert_eq!(p.daily_task(1).unwrap().task.start_date, day(0));
        assert_eq!(p.daily_task(2).unwrap().task.start_date, day(1));
        assert_eq!(p.daily_task(3).unwrap().task.start_date, day(2));
        assert_eq!(p.weekly_task(1).unwrap().daily_tasks(), &[1, 2, 3]);

        let removed = p.remove_from_weekly_tasks(1, day(3)).unwrap();
        assert_eq!(removed.week, 1);
        assert_eq!(p.weekly_task(2).unwrap().task.start_date, day(0));
        assert_eq!(p.daily_tasks().count(), 0);
        assert_eq!(p.next_weekly_task_date(), day(14));
        assert_eq!(p.next_daily_task_date(), None);
    }

    #[test]
    fn test_remove_started_week_shifts_every_successor() {
        let ids = SequentialIds::new();
        let mut p = project(60);
        for _ in 0..4 {
            p.append_to_weekly_tasks("w", "", &ids);
        }

        p.remove_from_weekly_tasks(2, day(7));

        let starts: Vec<_> = p.weekly_tasks().map(|w| (w.week, w.task.start_date)).collect();
        assert_eq!(starts, vec![(1, day(0)), (3, day(7)), (4, day(14))]);
        // Shifting leaves the next slot where it was.
        assert_eq!(p.next_weekly_task_date(), day(28));
        assert_eq!(p.append_to_weekly_tasks("w5", "", &ids), 5);
        assert_eq!(p.weekly_task(5).unwrap().task.start_date, day(28));
    }

    #[test]
    fn test_remove_started_week_without_next_number_reclaims_slot() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        for _ in 0..3 {
            p.append_to_weekly_tasks("w", "", &ids);
        }

        // Week 2 has not started yet, so nothing moves.
        p.remove_from_weekly_tasks(2, day0());
        assert_eq!(p.next_weekly_task_date(), day(21));

        p.remove_from_weekly_tasks(1, day(3));

        assert_eq!(p.weekly_task(3).unwrap().task.start_date, day(14));
        assert_eq!(p.next_weekly_task_date(), day0());
    }

    #[test]
    fn test_remove_started_week_shift_stops_at_gap() {
        let ids = SequentialIds::new();
        let mut p = project(60);
        for _ in 0..5 {
            p.append_to_weekly_tasks("w", "", &ids);
        }
        p.remove_from_weekly_tasks(4, day0());

        p.remove_from_weekly_tasks(1, day(3));

        let starts: Vec<_> = p.weekly_tasks().map(|w| (w.week, w.task.start_date)).collect();
        assert_eq!(starts, vec![(2, day(0)), (3, day(7)), (5, day(28))]);
        assert_eq!(p.next_weekly_task_date(), day(35));
    }

    #[test]
    fn test_remove_last_started_week_reclaims_slot() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        p.append_to_weekly_tasks("w1", "", &ids);
        p.append_to_weekly_tasks("w2", "", &ids);
        assert_eq!(p.next_weekly_task_date(), day(14));

        p.remove_from_weekly_tasks(2, day(7));

        assert_eq!(p.weekly_task(1).unwrap().task.start_date, day(0));
        assert_eq!(p.next_weekly_task_date(), day(7));
    }

    #[test]
    fn test_remove_future_week_repairs_nothing() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        for _ in 0..3 {
            p.append_to_weekly_tasks("w", "", &ids);
        }

        p.remove_from_weekly_tasks(2, day(6));

        assert_eq!(p.weekly_task(1).unwrap().task.start_date, day(0));
        assert_eq!(p.weekly_task(3).unwrap().task.start_date, day(14));
        assert_eq!(p.next_weekly_task_date(), day(21));
    }

    #[test]
    fn test_remove_week_cascades_only_linked_days() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        p.append_to_weekly_tasks("w1", "", &ids);
        p.append_to_weekly_tasks("w2", "", &ids);
        for _ in 0..10 {
            p.append_to_daily_tasks("d", "", &ids);
        }

        p.remove_from_weekly_tasks(2, day0());

        let remaining: Vec<u32> = p.daily_tasks().map(|t| t.day).collect();
        assert_eq!(remaining, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(p.weekly_task(1).unwrap().daily_tasks().len(), 7);
    }

    #[test]
    fn test_remove_missing_entries_is_noop() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        p.append_to_weekly_tasks("w1", "", &ids);
        p.append_to_daily_tasks("d1", "", &ids);
        let before = p.clone();

        assert!(p.remove_from_weekly_tasks(9, day(30)).is_none());
        assert!(p.remove_from_daily_tasks(9).is_none());
        assert_eq!(p, before);
    }

    #[test]
    fn test_remove_daily_task_recomputes_next_date_and_unlinks() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        p.append_to_weekly_tasks("w1", "", &ids);
        for _ in 0..3 {
            p.append_to_daily_tasks("d", "", &ids);
        }

        let removed = p.remove_from_daily_tasks(1).unwrap();
        assert_eq!(removed.day, 1);
        assert_eq!(p.next_daily_task_date(), Some(day(1)));
        assert_eq!(p.weekly_task(1).unwrap().daily_tasks(), &[2, 3]);

        p.remove_from_daily_tasks(2);
        p.remove_from_daily_tasks(3);
        assert_eq!(p.next_daily_task_date(), None);
        assert!(p.weekly_task(1).unwrap().daily_tasks().is_empty());

        // Numbering is monotonic and the schedule restarts at the project start.
        assert_eq!(p.append_to_daily_tasks("d4", "", &ids), 4);
        assert_eq!(p.daily_task(4).unwrap().task.start_date, day0());
        assert_eq!(p.weekly_task(1).unwrap().daily_tasks(), &[4]);
    }

    #[test]
    fn test_week_numbers_never_reused() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        p.append_to_weekly_tasks("w1", "", &ids);
        p.remove_from_weekly_tasks(1, day(30));
        assert_eq!(p.append_to_weekly_tasks("w2", "", &ids), 2);
        assert!(p.weekly_task(1).is_none());
        assert_eq!(p.weekly_task(2).unwrap().task.start_date, day0());
    }

    #[test]
    fn test_task_ids_are_unique() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        p.append_to_weekly_tasks("w1", "", &ids);
        p.append_to_daily_tasks("d1", "", &ids);
        p.append_to_daily_tasks("d2", "", &ids);
        let mut all: Vec<Uuid> = p.weekly_tasks().map(|w| w.id).collect();
        all.extend(p.daily_tasks().map(|t| t.id));
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_complete_and_update_tasks_through_project() {
        let ids = SequentialIds::new();
        let mut p = project(30);
        p.append_to_weekly_tasks("w1", "", &ids);
        p.append_to_daily_tasks("d1", "", &ids);

        assert!(p.complete_weekly_task(1));
        assert!(p.complete_weekly_task(1));
        assert!(!p.complete_weekly_task(2));
        assert!(p.weekly_task(1).unwrap().task.is_done);
        assert!(p.complete_daily_task(1));
        assert!(!p.complete_daily_task(7));

        let mut updates = Updates::new();
        updates.insert("description".into(), FieldValue::Text("notes".into()));
        let outcome = p.update_daily_task(1, &updates).unwrap();
        assert_eq!(outcome.applied, vec!["description".to_string()]);
        assert_eq!(p.daily_task(1).unwrap().task.description, "notes");
        assert!(p.update_weekly_task(3, &updates).is_none());
    }

    #[test]
    fn test_update_project_and_end_date() {
        let mut p = project(14);
        let mut updates = Updates::new();
        updates.insert("estimatedDays".into(), FieldValue::Integer(21));
        updates.insert("endDate".into(), FieldValue::Date(day(99)));
        updates.insert("owner".into(), FieldValue::Text("sam".into()));

        let outcome = p.update_project(&updates);

        assert_eq!(outcome.applied, vec!["estimatedDays".to_string()]);
        assert!(outcome.ignored.contains(&("endDate".to_string(), IgnoreReason::Protected)));
        assert!(outcome.ignored.contains(&("owner".to_string(), IgnoreReason::Unknown)));
        assert_eq!(p.estimated_days, 21);
        assert_eq!(p.end_date, day(14));

        assert!(p.set_end_date());
        assert_eq!(p.end_date, day(21));

        p.mark_complete();
        p.mark_complete();
        assert!(p.is_done);
    }

    #[test]
    fn test_out_of_range_estimate_keeps_end_date() {
        let p = project(100_000_000);
        assert_eq!(p.end_date, day0());

        let mut p = project(14);
        let mut updates = Updates::new();
        updates.insert("estimatedDays".into(), FieldValue::Integer(i64::MAX));
        p.update_project(&updates);

        assert!(!p.set_end_date());
        assert_eq!(p.end_date, day(14));
    }

    #[test]
    fn test_appends_at_calendar_end_do_not_overflow() {
        let ids = SequentialIds::new();
        let mut p = Project::new(
            NewProject {
                start_date: Some(NaiveDate::MAX),
                ..NewProject::default()
            },
            Uuid::from_u128(1),
            day0(),
        );
        p.append_to_weekly_tasks("w1", "", &ids);
        p.append_to_daily_tasks("d1", "", &ids);

        assert_eq!(p.next_weekly_task_date(), NaiveDate::MAX);
        assert_eq!(p.next_daily_task_date(), Some(NaiveDate::MAX));
        assert_eq!(p.week_of_day(1), Some(1));
    }

    #[test]
    fn test_snapshot_field_names() {
        let ids = SequentialIds::new();
        let mut p = project(14);
        p.append_to_weekly_tasks("w1", "", &ids);
        p.append_to_daily_tasks("d1", "", &ids);

        let json = serde_json::to_value(&p).unwrap();
        for key in [
            "id", "name", "description", "estimatedDays", "isDone", "startDate", "endDate",
            "weekCount", "dayCount", "weeklyTasks", "dailyTasks",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["endDate"], "2024-01-15");
        assert_eq!(json["weeklyTasks"]["1"]["dailyTasks"][0], 1);
        assert_eq!(json["dailyTasks"]["1"]["startDate"], "2024-01-01");
    }
}
