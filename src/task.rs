//! Task records owned by a project.
//!
//! Weekly and daily tasks share the same base record ([`Task`]) and expose the
//! same completion/update behaviour through [`TaskRecord`]. A weekly task also
//! keeps the day numbers of the daily tasks that fall inside its window; those
//! are foreign keys into the project's daily-task map, not owned values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fields::{apply_updates, FieldKind, FieldSlot, FieldValue, Updatable, UpdateOutcome, Updates};

/// Fields common to every scheduled work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub name: String,
    pub description: String,
    pub estimated_days: Option<i64>,
    pub is_done: bool,
    pub start_date: NaiveDate,
}

impl Task {
    pub fn new(name: impl Into<String>, description: impl Into<String>, start_date: NaiveDate) -> Self {
        Task {
            name: name.into(),
            description: description.into(),
            estimated_days: None,
            is_done: false,
            start_date,
        }
    }
}

impl Updatable for Task {
    fn field_slot(&self, key: &str) -> Option<FieldSlot> {
        match key {
            "name" | "description" => Some(FieldSlot::Editable(FieldKind::Text)),
            "estimateddays" => Some(FieldSlot::Editable(FieldKind::Integer)),
            "isdone" => Some(FieldSlot::Editable(FieldKind::Bool)),
            "startdate" => Some(FieldSlot::Editable(FieldKind::Date)),
            _ => None,
        }
    }

    fn assign(&mut self, key: &str, value: FieldValue) {
        match (key, value) {
            ("name", FieldValue::Text(v)) => self.name = v,
            ("description", FieldValue::Text(v)) => self.description = v,
            ("estimateddays", FieldValue::Integer(v)) => self.estimated_days = Some(v),
            ("isdone", FieldValue::Bool(v)) => self.is_done = v,
            ("startdate", FieldValue::Date(v)) => self.start_date = v,
            _ => {}
        }
    }
}

/// Shared capability of weekly and daily tasks.
pub trait TaskRecord {
    fn task(&self) -> &Task;
    fn task_mut(&mut self) -> &mut Task;

    /// Key names (normalised) that identify the record or link it to others.
    fn protected_keys(&self) -> &'static [&'static str];

    fn mark_complete(&mut self) {
        self.task_mut().is_done = true;
    }

    /// Overwrite the fields named in `updates`. Identity and linkage fields
    /// are reported as protected; unknown keys are dropped.
    fn update_task(&mut self, updates: &Updates) -> UpdateOutcome
    where
        Self: Sized,
    {
        let mut view = RecordView { record: self };
        apply_updates(&mut view, updates)
    }
}

/// Routes update keys to the base task or to the record's protected set.
struct RecordView<'a, R: TaskRecord> {
    record: &'a mut R,
}

impl<R: TaskRecord> Updatable for RecordView<'_, R> {
    fn field_slot(&self, key: &str) -> Option<FieldSlot> {
        if self.record.protected_keys().contains(&key) {
            return Some(FieldSlot::Protected);
        }
        self.record.task().field_slot(key)
    }

    fn assign(&mut self, key: &str, value: FieldValue) {
        self.record.task_mut().assign(key, value);
    }
}

/// A work item scheduled for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTask {
    #[serde(flatten)]
    pub task: Task,
    #[serde(rename = "projectID")]
    pub project_id: Uuid,
    pub id: Uuid,
    pub day: u32,
}

impl DailyTask {
    pub fn new(task: Task, project_id: Uuid, id: Uuid, day: u32) -> Self {
        DailyTask { task, project_id, id, day }
    }
}

impl TaskRecord for DailyTask {
    fn task(&self) -> &Task {
        &self.task
    }

    fn task_mut(&mut self) -> &mut Task {
        &mut self.task
    }

    fn protected_keys(&self) -> &'static [&'static str] {
        &["id", "projectid", "day"]
    }
}

/// A work item spanning the seven days from its start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTask {
    #[serde(flatten)]
    pub task: Task,
    #[serde(rename = "projectID")]
    pub project_id: Uuid,
    pub id: Uuid,
    pub week: u32,
    daily_tasks: Vec<u32>,
}

impl WeeklyTask {
    pub fn new(task: Task, project_id: Uuid, id: Uuid, week: u32) -> Self {
        WeeklyTask {
            task,
            project_id,
            id,
            week,
            daily_tasks: Vec::new(),
        }
    }

    /// Day numbers of the daily tasks linked into this week.
    pub fn daily_tasks(&self) -> &[u32] {
        &self.daily_tasks
    }

    pub(crate) fn link_day(&mut self, day: u32) {
        self.daily_tasks.push(day);
    }

    /// Drop a linked day number, if present.
    pub(crate) fn unlink_day(&mut self, day: u32) {
        self.daily_tasks.retain(|&d| d != day);
    }
}

impl TaskRecord for WeeklyTask {
    fn task(&self) -> &Task {
        &self.task
    }

    fn task_mut(&mut self) -> &mut Task {
        &mut self.task
    }

    fn protected_keys(&self) -> &'static [&'static str] {
        &["id", "projectid", "week", "dailytasks"]
    }
}
