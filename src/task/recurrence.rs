//! Successor computation for recurring tasks.
//!
//! Pure functions with no storage access: they derive the next occurrence
//! of a completed recurring task and hand the caller a [`TaskDraft`] to
//! persist. Id assignment and timestamps stay with the store.

use chrono::{DateTime, Duration, Utc};

use crate::task::types::{RecurrenceRule, Task, TaskDraft, TaskError};

/// Compute the due date of the next occurrence: +1 day for daily,
/// +7 days for weekly, +`interval_days` for custom. Fails on a custom
/// rule with a zero interval, or when the shifted date would leave the
/// representable range.
pub fn next_due_date(
    current_due_date: DateTime<Utc>,
    rule: &RecurrenceRule,
) -> Result<DateTime<Utc>, TaskError> {
    current_due_date
        .checked_add_signed(Duration::days(rule.interval_days()?))
        .ok_or_else(|| {
            TaskError::validation(
                "recurrence",
                "interval pushes the next due date out of the representable range",
            )
        })
}

/// Shift the reminder so the reminder-to-due offset is preserved across
/// occurrences. An absent reminder stays absent.
pub fn next_reminder_time(
    current_reminder_time: Option<DateTime<Utc>>,
    current_due_date: DateTime<Utc>,
    next_due_date: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    current_reminder_time.map(|reminder| next_due_date - (current_due_date - reminder))
}

/// Derive the draft for the next occurrence of a completed recurring task.
///
/// The successor keeps the title, description, priority, tags, and rule.
/// The due date shifts per the rule when the completed task had one and is
/// otherwise absent; the reminder shifts only when both a prior reminder
/// and a prior due date existed. Fails if the task has no recurrence rule.
pub fn next_occurrence(completed: &Task) -> Result<TaskDraft, TaskError> {
    let rule = completed.recurrence.ok_or_else(|| {
        TaskError::validation("recurrence", "task has no recurrence rule")
    })?;

    let due_date = match completed.due_date {
        Some(due) => Some(next_due_date(due, &rule)?),
        None => None,
    };

    let reminder_time = match (completed.due_date, due_date) {
        (Some(current_due), Some(next_due)) => {
            next_reminder_time(completed.reminder_time, current_due, next_due)
        }
        _ => None,
    };

    Ok(TaskDraft {
        title: completed.title.clone(),
        description: completed.description.clone(),
        priority: completed.priority,
        tags: completed.tags.clone(),
        due_date,
        reminder_time,
        recurrence: Some(rule),
    })
}
