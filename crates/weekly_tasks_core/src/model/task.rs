//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its wire shape.
//! - Parse and render deadline instants in the local wall clock.
//!
//! # Invariants
//! - `id` is assigned once and never reused for another task.
//! - `deadline` always carries both a date and a time.
//! - `title` is non-empty after trimming.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque unique identifier for a task.
///
/// Kept as plain text so payloads written by older clients (non-UUID ids)
/// still load.
pub type TaskId = String;

const DEADLINE_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DEADLINE_SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DEADLINE_FRACTION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Generates a fresh task identifier.
pub fn new_task_id() -> TaskId {
    Uuid::new_v4().to_string()
}

/// Task priority as chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Weight used by the urgency score.
    pub fn weight(self) -> u32 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Wire name (`low|medium|high`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deadline text that does not resolve to a full date-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineParseError {
    pub input: String,
}

impl Display for DeadlineParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "deadline `{}` is not a date-time (expected YYYY-MM-DDTHH:MM)",
            self.input
        )
    }
}

impl Error for DeadlineParseError {}

/// Point in time a task is due, in the user's local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(NaiveDateTime);

impl Deadline {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    /// Parses `YYYY-MM-DDTHH:MM`, optionally followed by seconds and a
    /// fractional part.
    ///
    /// # Errors
    /// - Returns [`DeadlineParseError`] for date-only, time-only or
    ///   otherwise unresolvable text.
    pub fn parse(value: &str) -> Result<Self, DeadlineParseError> {
        let trimmed = value.trim();
        NaiveDateTime::parse_from_str(trimmed, DEADLINE_FRACTION_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, DEADLINE_MINUTE_FORMAT))
            .map(Self)
            .map_err(|_| DeadlineParseError {
                input: trimmed.to_string(),
            })
    }

    /// Combines separate date (`YYYY-MM-DD`) and time (`HH:MM[:SS[.fff]]`) inputs.
    pub fn from_parts(date: &str, time: &str) -> Result<Self, DeadlineParseError> {
        Self::parse(&format!("{}T{}", date.trim(), time.trim()))
    }

    pub fn at(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for Deadline {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl FromStr for Deadline {
    type Err = DeadlineParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Display for Deadline {
    // Minute precision is the common case and matches what the form writes;
    // finer parts are only emitted when present so parsing stays lossless.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use chrono::Timelike;

        let format = if self.0.nanosecond() != 0 {
            DEADLINE_FRACTION_FORMAT
        } else if self.0.second() != 0 {
            DEADLINE_SECOND_FORMAT
        } else {
            DEADLINE_MINUTE_FORMAT
        };
        write!(f, "{}", self.0.format(format))
    }
}

impl Serialize for Deadline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Validation failures for [`Task`] records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    EmptyTitle { id: TaskId },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::EmptyTitle { id } => write!(f, "task `{id}` has an empty title"),
        }
    }
}

impl Error for TaskValidationError {}

/// Caller-supplied editable fields, used both to create a task and to
/// replace the editable fields of an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub deadline: Deadline,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, deadline: Deadline, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            deadline,
            priority,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Canonical task record.
///
/// Wire shape: `id, title, description, deadline, priority, done, createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deadline: Deadline,
    pub priority: Priority,
    #[serde(default)]
    pub done: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Builds a new, not-done task with a generated id.
    pub fn from_draft(draft: TaskDraft, created_at: i64) -> Self {
        Self::with_id(new_task_id(), draft, created_at)
    }

    /// Builds a task with a caller-provided id.
    ///
    /// Used by tests and imports where identity already exists.
    pub fn with_id(id: impl Into<TaskId>, draft: TaskDraft, created_at: i64) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            deadline: draft.deadline,
            priority: draft.priority,
            done: false,
            created_at,
        }
    }

    /// Replaces the editable fields; `id`, `done` and `created_at` are kept.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.deadline = draft.deadline;
        self.priority = draft.priority;
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Deadline, Priority};

    #[test]
    fn deadline_rejects_partial_inputs() {
        assert!(Deadline::parse("2024-01-01").is_err());
        assert!(Deadline::parse("18:00").is_err());
        assert!(Deadline::parse("").is_err());
        assert!(Deadline::parse("2024-02-30T10:00").is_err());
    }

    #[test]
    fn deadline_display_keeps_minute_form_when_possible() {
        let minute = Deadline::parse("2024-01-01T18:00").unwrap();
        assert_eq!(minute.to_string(), "2024-01-01T18:00");

        let second = Deadline::parse("2024-01-01T18:00:42").unwrap();
        assert_eq!(second.to_string(), "2024-01-01T18:00:42");

        let fraction = Deadline::parse("2024-01-01T18:00:42.125").unwrap();
        assert_eq!(Deadline::parse(&fraction.to_string()).unwrap(), fraction);
    }

    #[test]
    fn deadline_from_parts_combines_form_fields() {
        let deadline = Deadline::from_parts(" 2024-03-04 ", "09:30").unwrap();
        assert_eq!(deadline.to_string(), "2024-03-04T09:30");
    }

    #[test]
    fn priority_weights_and_wire_names() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(
            [Priority::High, Priority::Medium, Priority::Low].map(Priority::weight),
            [3, 2, 1]
        );
        assert_eq!(Priority::High.to_string(), "high");
        assert_eq!(
            serde_json::to_string(&Priority::Low).unwrap(),
            format!("\"{}\"", Priority::Low)
        );
    }
}
