//! Field types for partial record updates.
//!
//! Projects and tasks accept loosely keyed updates (`name`, `startDate`, ...).
//! Each key is checked against the record's own field table: known editable
//! fields with a value of the right type are applied, everything else is
//! dropped and reported back in an [`UpdateOutcome`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use crate::dates::parse_date_input;
use crate::error::{PlannerError, Result};

/// The value type a field stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Bool,
    Date,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Bool => "boolean",
            FieldKind::Date => "date",
        };
        f.write_str(s)
    }
}

/// A typed value supplied for an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Date(_) => FieldKind::Date,
        }
    }

    /// Coerce raw text into a value of `kind`. Dates accept the same
    /// shorthand as [`parse_date_input`], relative to `today`.
    pub fn coerce(key: &str, raw: &str, kind: FieldKind, today: NaiveDate) -> Result<Self> {
        let invalid = |reason: String| PlannerError::InvalidValue {
            key: key.to_string(),
            reason,
        };
        match kind {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|e| invalid(format!("'{raw}' is not an integer ({e})"))),
            FieldKind::Bool => match raw.trim().to_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Ok(FieldValue::Bool(true)),
                "false" | "no" | "n" | "0" => Ok(FieldValue::Bool(false)),
                _ => Err(invalid(format!("'{raw}' is not a boolean"))),
            },
            FieldKind::Date => parse_date_input(raw, today)
                .map(FieldValue::Date)
                .ok_or_else(|| invalid(format!("'{raw}' is not a date"))),
        }
    }
}

/// Update mapping from field key to new value.
pub type Updates = BTreeMap<String, FieldValue>;

/// How a record treats a given key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSlot {
    /// The record owns the field and it may be overwritten.
    Editable(FieldKind),
    /// The record owns the field but it carries identity or structure.
    Protected,
}

/// Why an update key was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Unknown,
    Protected,
    TypeMismatch { expected: FieldKind },
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::Unknown => f.write_str("unknown field"),
            IgnoreReason::Protected => f.write_str("field cannot be changed"),
            IgnoreReason::TypeMismatch { expected } => write!(f, "expected a {expected}"),
        }
    }
}

/// Result of applying an [`Updates`] mapping to a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub applied: Vec<String>,
    pub ignored: Vec<(String, IgnoreReason)>,
}

impl UpdateOutcome {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// A record that accepts keyed partial updates.
pub trait Updatable {
    /// Look up a normalised key (see [`normalise_key`]).
    fn field_slot(&self, key: &str) -> Option<FieldSlot>;

    /// Store `value` under a normalised key. Only called for editable fields
    /// whose kind matches the value.
    fn assign(&mut self, key: &str, value: FieldValue);
}

/// Fold `estimated_days`, `estimatedDays` and `estimated-days` onto one key.
pub fn normalise_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Apply each update key to `record` independently.
pub fn apply_updates<R: Updatable + ?Sized>(record: &mut R, updates: &Updates) -> UpdateOutcome {
    let mut outcome = UpdateOutcome::default();
    for (key, value) in updates {
        let norm = normalise_key(key);
        match record.field_slot(&norm) {
            Some(FieldSlot::Editable(kind)) if kind == value.kind() => {
                record.assign(&norm, value.clone());
                outcome.applied.push(key.clone());
            }
            Some(FieldSlot::Editable(expected)) => {
                outcome
                    .ignored
                    .push((key.clone(), IgnoreReason::TypeMismatch { expected }));
            }
            Some(FieldSlot::Protected) => {
                outcome.ignored.push((key.clone(), IgnoreReason::Protected));
            }
            None => {
                outcome.ignored.push((key.clone(), IgnoreReason::Unknown));
            }
        }
    }
    for (key, reason) in &outcome.ignored {
        debug!(key = %key, reason = %reason, "update key ignored");
    }
    outcome
}

/// Split a `key=value` shell argument.
pub fn parse_assignment(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(PlannerError::Parse(format!(
            "expected key=value, got '{arg}'"
        ))),
    }
}

/// Build an update mapping from `key=value` arguments, coercing each value to
/// the type `record` declares for its key. Keys the record does not know are
/// passed through as text so the record can report them.
pub fn build_updates<R: Updatable + ?Sized>(
    record: &R,
    assignments: &[String],
    today: NaiveDate,
) -> Result<Updates> {
    let mut updates = Updates::new();
    for arg in assignments {
        let (key, raw) = parse_assignment(arg)?;
        let value = match record.field_slot(&normalise_key(&key)) {
            Some(FieldSlot::Editable(kind)) => FieldValue::coerce(&key, &raw, kind, today)?,
            _ => FieldValue::Text(raw),
        };
        updates.insert(key, value);
    }
    Ok(updates)
}
