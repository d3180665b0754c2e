//! Create/edit state machine for the task form.
//!
//! # Invariants
//! - The initial state is `Creating` with default form values.
//! - A successful submit always returns to `Creating`.
//! - A rejected submit leaves the store and the mode untouched.

use crate::clock::Clock;
use crate::model::task::{Deadline, DeadlineParseError, Priority, Task, TaskDraft, TaskId};
use crate::repo::task_store::{StoreError, TaskStore};
use crate::schedule::quick_pick::QuickPick;
use crate::storage::StorageBackend;
use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FORM_DATE_FORMAT: &str = "%Y-%m-%d";
const FORM_TIME_FORMAT: &str = "%H:%M";
const FORM_PRECISE_TIME_FORMAT: &str = "%H:%M:%S%.f";
const DEFAULT_DEADLINE_HOUR: i64 = 18;

/// Which store operation a submit maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Creating,
    Editing(TaskId),
}

/// Raw form values as the UI delivers them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`.
    pub deadline_date: String,
    /// `HH:MM`, or `HH:MM:SS[.fff]` when the deadline carries seconds.
    pub deadline_time: String,
    pub priority: Priority,
}

impl TaskForm {
    /// Blank form due today at 18:00 with medium priority.
    pub fn defaults(now: NaiveDateTime) -> Self {
        let mut form = Self {
            title: String::new(),
            description: String::new(),
            deadline_date: String::new(),
            deadline_time: String::new(),
            priority: Priority::Medium,
        };
        form.set_deadline(
            now.date().and_time(NaiveTime::MIN) + Duration::hours(DEFAULT_DEADLINE_HOUR),
        );
        form
    }

    pub fn from_task(task: &Task) -> Self {
        let mut form = Self {
            title: task.title.clone(),
            description: task.description.clone(),
            deadline_date: String::new(),
            deadline_time: String::new(),
            priority: task.priority,
        };
        form.set_deadline(task.deadline.at());
        form
    }

    /// Writes `at` into the date and time inputs.
    ///
    /// Seconds are only written when present, so resubmitting an untouched
    /// form reproduces the same deadline.
    pub fn set_deadline(&mut self, at: NaiveDateTime) {
        let time_format = if at.second() == 0 && at.nanosecond() == 0 {
            FORM_TIME_FORMAT
        } else {
            FORM_PRECISE_TIME_FORMAT
        };
        self.deadline_date = at.format(FORM_DATE_FORMAT).to_string();
        self.deadline_time = at.format(time_format).to_string();
    }

    /// Checks the form and builds the draft to persist.
    ///
    /// Title and description are trimmed.
    pub fn validate(&self) -> Result<TaskDraft, FormValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormValidationError::EmptyTitle);
        }
        if self.deadline_date.trim().is_empty() || self.deadline_time.trim().is_empty() {
            return Err(FormValidationError::MissingDeadline);
        }
        let deadline = Deadline::from_parts(&self.deadline_date, &self.deadline_time)
            .map_err(FormValidationError::InvalidDeadline)?;

        Ok(TaskDraft::new(title, deadline, self.priority)
            .with_description(self.description.trim()))
    }
}

/// Reasons a submit is rejected before touching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValidationError {
    EmptyTitle,
    MissingDeadline,
    InvalidDeadline(DeadlineParseError),
}

impl Display for FormValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be empty"),
            Self::MissingDeadline => write!(f, "deadline date and time are required"),
            Self::InvalidDeadline(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDeadline(err) => Some(err),
            _ => None,
        }
    }
}

/// Submit failure.
#[derive(Debug)]
pub enum SessionError {
    Validation(FormValidationError),
    Store(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid task form: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<FormValidationError> for SessionError {
    fn from(value: FormValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// What a successful submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Task),
    /// `found` is false when the edited task vanished before submit.
    Updated { id: TaskId, found: bool },
}

/// Create/edit state plus the in-progress form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    mode: EditMode,
    form: TaskForm,
}

impl EditSession {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            mode: EditMode::Creating,
            form: TaskForm::defaults(now),
        }
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing(_))
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn begin_create(&mut self, now: NaiveDateTime) {
        self.reset(now);
    }

    pub fn begin_edit(&mut self, task: &Task) {
        self.mode = EditMode::Editing(task.id.clone());
        self.form = TaskForm::from_task(task);
    }

    /// Fills the deadline inputs from a shortcut.
    pub fn apply_quick_pick(&mut self, pick: QuickPick, now: NaiveDateTime) {
        let at = pick.resolve(now);
        // Shortcuts fill minute-precision inputs.
        let at = at
            .with_second(0)
            .and_then(|at| at.with_nanosecond(0))
            .unwrap_or(at);
        self.form.set_deadline(at);
    }

    /// Validates `form` and applies it to the store.
    ///
    /// # Contract
    /// - `Creating` calls `create`; `Editing(id)` calls `update(id, ..)`.
    /// - On success the session returns to `Creating` with a fresh form.
    /// - On failure the mode is unchanged and `form` is kept for correction.
    pub fn submit<B: StorageBackend, C: Clock>(
        &mut self,
        store: &TaskStore<B, C>,
        form: TaskForm,
    ) -> Result<SubmitOutcome, SessionError> {
        self.form = form;
        let draft = match self.form.validate() {
            Ok(draft) => draft,
            Err(err) => {
                warn!(
                    "event=task_submit module=session status=rejected mode={} reason={:?}",
                    self.mode_label(),
                    err
                );
                return Err(err.into());
            }
        };

        let outcome = match &self.mode {
            EditMode::Creating => SubmitOutcome::Created(store.create(draft)?),
            EditMode::Editing(id) => SubmitOutcome::Updated {
                id: id.clone(),
                found: store.update(id, draft)?,
            },
        };

        info!(
            "event=task_submit module=session status=ok mode={}",
            self.mode_label()
        );
        self.reset(store.clock().local_now());
        Ok(outcome)
    }

    /// Discards in-progress input without touching the store.
    pub fn cancel(&mut self, now: NaiveDateTime) {
        self.reset(now);
    }

    fn reset(&mut self, now: NaiveDateTime) {
        self.mode = EditMode::Creating;
        self.form = TaskForm::defaults(now);
    }

    fn mode_label(&self) -> &'static str {
        match self.mode {
            EditMode::Creating => "create",
            EditMode::Editing(_) => "edit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FormValidationError, TaskForm};
    use crate::model::task::Priority;
    use chrono::NaiveDate;

    #[test]
    fn defaults_are_today_at_six_pm_medium() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 3)
            .unwrap()
            .and_hms_opt(7, 12, 44)
            .unwrap();
        let form = TaskForm::defaults(now);
        assert_eq!(form.deadline_date, "2024-01-03");
        assert_eq!(form.deadline_time, "18:00");
        assert_eq!(form.priority, Priority::Medium);
        assert!(form.title.is_empty());
    }

    #[test]
    fn validate_trims_and_rejects_blank_fields() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 3)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        let mut form = TaskForm::defaults(now);
        form.title = "   ".to_string();
        assert_eq!(form.validate(), Err(FormValidationError::EmptyTitle));

        form.title = "  Report ".to_string();
        form.description = " draft ".to_string();
        let draft = form.validate().unwrap();
        assert_eq!(draft.title, "Report");
        assert_eq!(draft.description, "draft");

        form.deadline_time = String::new();
        assert_eq!(form.validate(), Err(FormValidationError::MissingDeadline));

        form.deadline_time = "25:00".to_string();
        assert!(matches!(
            form.validate(),
            Err(FormValidationError::InvalidDeadline(_))
        ));
    }
}
