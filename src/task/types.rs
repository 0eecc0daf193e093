use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for tasks. Assigned sequentially by the store,
/// starting at 1, never reused.
pub type TaskId = u64;

/// Maximum title length in characters, counted after trimming.
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 1000;
/// Maximum tag length in characters, counted after trimming.
pub const MAX_TAG_LEN: usize = 50;

/// Errors surfaced by the task core. All variants are recoverable;
/// a failed operation never mutates stored state.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task {id} not found")]
    NotFound { id: TaskId },

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl TaskError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Task completion status
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Incomplete,
    Complete,
}

impl Status {
    /// The opposite status
    pub fn toggled(self) -> Self {
        match self {
            Status::Incomplete => Status::Complete,
            Status::Complete => Status::Incomplete,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Incomplete => write!(f, "incomplete"),
            Status::Complete => write!(f, "complete"),
        }
    }
}

impl FromStr for Status {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "incomplete" => Ok(Status::Incomplete),
            "complete" => Ok(Status::Complete),
            other => Err(TaskError::validation(
                "status",
                format!("unknown status '{other}', allowed values: incomplete, complete"),
            )),
        }
    }
}

/// Task priority level
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Canonical rank for sorting: High=0, Medium=1, Low=2
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(TaskError::validation(
                "priority",
                format!("unknown priority '{other}', allowed values: high, medium, low"),
            )),
        }
    }
}

/// Recurrence pattern for recurring tasks. Custom carries the number of
/// days between occurrences; Daily and Weekly imply 1 and 7.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceRule {
    Daily,
    Weekly,
    Custom { interval_days: u32 },
}

impl RecurrenceRule {
    /// Days between occurrences. Fails on a zero custom interval, which
    /// validation normally keeps out of the store.
    pub fn interval_days(&self) -> Result<i64, TaskError> {
        match self {
            RecurrenceRule::Daily => Ok(1),
            RecurrenceRule::Weekly => Ok(7),
            RecurrenceRule::Custom { interval_days: 0 } => Err(TaskError::validation(
                "recurrence",
                "custom recurrence requires a positive interval in days",
            )),
            RecurrenceRule::Custom { interval_days } => Ok(i64::from(*interval_days)),
        }
    }
}

/// A single todo item with scheduling metadata and state tracking
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub tags: BTreeSet<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_time: Option<DateTime<Utc>>,
    pub recurrence: Option<RecurrenceRule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reminder_notified: bool,
}

impl Task {
    /// Check if the task is overdue: due date in the past and still incomplete
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due < now && self.status == Status::Incomplete,
            None => false,
        }
    }

    /// Check if the reminder should fire: reminder time reached and not yet notified
    pub fn should_remind(&self, now: DateTime<Utc>) -> bool {
        match self.reminder_time {
            Some(reminder) => reminder <= now && !self.reminder_notified,
            None => false,
        }
    }

    /// Check if the task regenerates on completion
    pub fn has_recurrence(&self) -> bool {
        self.recurrence.is_some()
    }
}

/// Input for creating a task. Carries no id, status, or timestamps;
/// the store assigns those on insert.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub tags: BTreeSet<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_time: Option<DateTime<Utc>>,
    pub recurrence: Option<RecurrenceRule>,
}

impl TaskDraft {
    /// Create a draft with the given title and default fields
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the tags (duplicates collapse via set semantics)
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the reminder time
    pub fn with_reminder(mut self, reminder_time: DateTime<Utc>) -> Self {
        self.reminder_time = Some(reminder_time);
        self
    }

    /// Set the recurrence rule
    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }
}

/// Partial update for a task. Every mutable attribute gets its own slot:
/// `None` leaves the stored value untouched, `Some(..)` replaces it. For
/// attributes that are themselves optional the slot is doubly wrapped, so
/// `Some(None)` clears the stored value. `id` and `created_at` have no
/// slot and therefore cannot be changed.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub tags: Option<BTreeSet<String>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub reminder_time: Option<Option<DateTime<Utc>>>,
    pub recurrence: Option<Option<RecurrenceRule>>,
    pub reminder_notified: Option<bool>,
}

impl TaskPatch {
    /// Create an empty patch (applies no changes beyond bumping `updated_at`)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    pub fn with_reminder(mut self, reminder_time: DateTime<Utc>) -> Self {
        self.reminder_time = Some(Some(reminder_time));
        self
    }

    pub fn clear_reminder(mut self) -> Self {
        self.reminder_time = Some(None);
        self
    }

    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(Some(rule));
        self
    }

    pub fn clear_recurrence(mut self) -> Self {
        self.recurrence = Some(None);
        self
    }

    pub fn with_reminder_notified(mut self, notified: bool) -> Self {
        self.reminder_notified = Some(notified);
        self
    }
}
