use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

use crate::task::types::*;

/// In-memory keyed collection of tasks.
///
/// The store is the sole mutator of the collection: it assigns ids,
/// stamps timestamps, and validates every write. A failed `create` or
/// `update` leaves the collection exactly as it was.
#[derive(Debug)]
pub struct TaskStore {
    tasks: HashMap<TaskId, Task>,
    next_id: TaskId,
}

impl TaskStore {
    /// Create an empty store. Ids start at 1 and are never reused,
    /// even after deletion.
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            next_id: 1,
        }
    }

    /// Validate a draft, assign the next id, and persist the new task.
    /// On validation failure nothing is stored and the id counter does
    /// not advance.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, TaskError> {
        let now = Utc::now();
        let mut task = Task {
            id: self.next_id,
            title: draft.title,
            description: draft.description,
            status: Status::Incomplete,
            priority: draft.priority,
            tags: draft.tags,
            due_date: draft.due_date,
            reminder_time: draft.reminder_time,
            recurrence: draft.recurrence,
            created_at: now,
            updated_at: now,
            reminder_notified: false,
        };

        if let Err(err) = validate(&mut task) {
            warn!("Rejected task creation: {}", err);
            return Err(err);
        }

        self.next_id += 1;
        self.tasks.insert(task.id, task.clone());
        debug!("Created task {}", task.id);
        Ok(task)
    }

    /// Retrieve a task by id
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Merge the supplied fields into the stored task, re-validate the
    /// merged record, bump `updated_at`, and persist. Validation failure
    /// leaves the stored record unchanged; `id` and `created_at` are
    /// untouchable by construction of [`TaskPatch`].
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, TaskError> {
        let current = self.tasks.get(&id).ok_or(TaskError::NotFound { id })?;

        let mut merged = current.clone();
        if let Some(title) = patch.title {
            merged.title = title;
        }
        if let Some(description) = patch.description {
            merged.description = description;
        }
        if let Some(status) = patch.status {
            merged.status = status;
        }
        if let Some(priority) = patch.priority {
            merged.priority = priority;
        }
        if let Some(tags) = patch.tags {
            merged.tags = tags;
        }
        if let Some(due_date) = patch.due_date {
            merged.due_date = due_date;
        }
        if let Some(reminder_time) = patch.reminder_time {
            merged.reminder_time = reminder_time;
        }
        if let Some(recurrence) = patch.recurrence {
            merged.recurrence = recurrence;
        }
        if let Some(notified) = patch.reminder_notified {
            merged.reminder_notified = notified;
        }

        if let Err(err) = validate(&mut merged) {
            warn!("Rejected update for task {}: {}", id, err);
            return Err(err);
        }

        merged.updated_at = Utc::now();
        self.tasks.insert(id, merged.clone());
        debug!("Updated task {}", id);
        Ok(merged)
    }

    /// Remove a task by id. Idempotent: deleting an absent id reports
    /// `false` rather than erroring.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.remove(&id).is_some();
        if removed {
            debug!("Deleted task {}", id);
        }
        removed
    }

    /// All tasks in ascending id order, the only ordering this layer
    /// guarantees.
    pub fn list_all(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.tasks.values().cloned().collect();
        tasks.sort_by_key(|task| task.id);
        tasks
    }

    /// Check if a task exists
    pub fn exists(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Number of stored tasks
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a candidate record in place, trimming the title and tags.
/// Runs against the fully merged record so partial updates cannot
/// sidestep cross-field rules.
fn validate(task: &mut Task) -> Result<(), TaskError> {
    let title = task.title.trim();
    if title.is_empty() {
        return Err(TaskError::validation("title", "title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TaskError::validation(
            "title",
            format!("title exceeds maximum length of {MAX_TITLE_LEN} characters"),
        ));
    }
    task.title = title.to_string();

    if let Some(description) = &task.description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(TaskError::validation(
                "description",
                format!("description exceeds maximum length of {MAX_DESCRIPTION_LEN} characters"),
            ));
        }
    }

    let mut tags = BTreeSet::new();
    for tag in &task.tags {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(TaskError::validation("tags", "tags must not be empty"));
        }
        if tag.chars().count() > MAX_TAG_LEN {
            return Err(TaskError::validation(
                "tags",
                format!("tag '{tag}' exceeds maximum length of {MAX_TAG_LEN} characters"),
            ));
        }
        tags.insert(tag.to_string());
    }
    task.tags = tags;

    if let (Some(reminder), Some(due)) = (task.reminder_time, task.due_date) {
        if reminder > due {
            return Err(TaskError::validation(
                "reminder_time",
                "reminder time must be at or before the due date",
            ));
        }
    }

    if let Some(rule) = &task.recurrence {
        rule.interval_days()?;
    }

    Ok(())
}
