//! Error type shared by the manager and the command layer.
//!
//! The scheduling core itself never fails: missing weeks or days come back as
//! `None` and rejected update keys are reported in an `UpdateOutcome`. These
//! variants cover lookups by user-supplied identifiers and input coercion.

use uuid::Uuid;

/// Errors surfaced to the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// No project matches the given id.
    #[error("project {0} not found")]
    ProjectNotFound(Uuid),

    /// No project matches the given name or id prefix.
    #[error("no project found matching '{0}'")]
    NoSuchProject(String),

    /// A name or id prefix matched more than one project.
    #[error("'{identifier}' matches several projects:\n{candidates}Please use the project id instead.")]
    AmbiguousProject {
        identifier: String,
        candidates: String,
    },

    /// The project has no weekly task with this number.
    #[error("week {0} not found")]
    WeekNotFound(u32),

    /// The project has no daily task with this number.
    #[error("day {0} not found")]
    DayNotFound(u32),

    /// Date text could not be understood.
    #[error("invalid date '{0}': expected YYYY-MM-DD, today, tomorrow, 'in 3d', or a weekday")]
    InvalidDate(String),

    /// A `key=value` argument could not be coerced to the field's type.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// A shell line could not be parsed into a command.
    #[error("{0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
