//! In-memory collection of projects.
//!
//! The manager owns every project plus the clock and id supplier the projects
//! need. It is built once by the entry point and passed explicitly to command
//! handlers.

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::env::{Clock, IdSupplier};
use crate::error::{PlannerError, Result};
use crate::fields::{UpdateOutcome, Updates};
use crate::project::{NewProject, Project};
use crate::task::{DailyTask, WeeklyTask};

/// Owns the projects in creation order.
pub struct ProjectManager {
    projects: Vec<Project>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSupplier>,
}

impl ProjectManager {
    pub fn new(clock: Box<dyn Clock>, ids: Box<dyn IdSupplier>) -> Self {
        ProjectManager {
            projects: Vec::new(),
            clock,
            ids,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Create a project and return it. The start date defaults to today.
    pub fn create_project(&mut self, input: NewProject) -> &Project {
        let project = Project::new(input, self.ids.next_id(), self.clock.today());
        info!(project = %project.id, name = %project.name, start = %project.start_date, "project created");
        self.projects.push(project);
        &self.projects[self.projects.len() - 1]
    }

    /// Apply keyed updates to a project.
    pub fn update_project(&mut self, id: Uuid, updates: &Updates) -> Result<UpdateOutcome> {
        let project = self.project_mut(id)?;
        Ok(project.update_project(updates))
    }

    /// Remove a project. Returns the removed project, or `None` if absent.
    pub fn delete_project_by_id(&mut self, id: Uuid) -> Option<Project> {
        match self.projects.iter().position(|p| p.id == id) {
            Some(idx) => {
                let project = self.projects.remove(idx);
                info!(project = %id, "project deleted");
                Some(project)
            }
            None => {
                debug!(project = %id, "no project to delete");
                None
            }
        }
    }

    pub fn get_project_by_id(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn get_project_by_id_mut(&mut self, id: Uuid) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    /// All projects in creation order.
    pub fn get_all_projects(&self) -> &[Project] {
        &self.projects
    }

    /// Like [`get_project_by_id_mut`](Self::get_project_by_id_mut) but reports a missing project.
    pub fn project_mut(&mut self, id: Uuid) -> Result<&mut Project> {
        self.get_project_by_id_mut(id)
            .ok_or(PlannerError::ProjectNotFound(id))
    }

    /// Resolve a project identifier: a full id, a unique id prefix, or a
    /// case-insensitive name. Ambiguous names report every candidate.
    pub fn resolve_project(&self, identifier: &str) -> Result<Uuid> {
        let identifier = identifier.trim();
        if let Ok(id) = Uuid::parse_str(identifier) {
            return match self.get_project_by_id(id) {
                Some(_) => Ok(id),
                None => Err(PlannerError::ProjectNotFound(id)),
            };
        }

        let lowered = identifier.to_lowercase();
        let mut matches: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| p.name.to_lowercase() == lowered)
            .collect();
        if matches.is_empty() && !lowered.is_empty() {
            matches = self
                .projects
                .iter()
                .filter(|p| p.id.to_string().starts_with(&lowered))
                .collect();
        }

        match matches.len() {
            0 => Err(PlannerError::NoSuchProject(identifier.to_string())),
            1 => Ok(matches[0].id),
            _ => {
                let mut candidates = String::new();
                for p in matches {
                    candidates.push_str(&format!("  {}  {} (starts {})\n", p.id, p.name, p.start_date));
                }
                Err(PlannerError::AmbiguousProject {
                    identifier: identifier.to_string(),
                    candidates,
                })
            }
        }
    }

    /// Append a weekly task to a project, minting its id.
    pub fn append_weekly_task(&mut self, project: Uuid, title: &str, description: &str) -> Result<u32> {
        let ids = &*self.ids;
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == project)
            .ok_or(PlannerError::ProjectNotFound(project))?;
        Ok(project.append_to_weekly_tasks(title, description, ids))
    }

    /// Append a daily task to a project, minting its id.
    pub fn append_daily_task(&mut self, project: Uuid, title: &str, description: &str) -> Result<u32> {
        let ids = &*self.ids;
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == project)
            .ok_or(PlannerError::ProjectNotFound(project))?;
        Ok(project.append_to_daily_tasks(title, description, ids))
    }

    /// Remove a weekly task, judging "already started" against the clock.
    pub fn remove_weekly_task(&mut self, project: Uuid, week: u32) -> Result<Option<WeeklyTask>> {
        let today = self.clock.today();
        Ok(self.project_mut(project)?.remove_from_weekly_tasks(week, today))
    }

    pub fn remove_daily_task(&mut self, project: Uuid, day: u32) -> Result<Option<DailyTask>> {
        Ok(self.project_mut(project)?.remove_from_daily_tasks(day))
    }
}
