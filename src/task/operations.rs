use chrono::Utc;
use std::cmp::Ordering;
use tracing::{debug, info};

use crate::task::recurrence;
use crate::task::store::TaskStore;
use crate::task::types::*;

/// Result of toggling a task's completion status
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    /// The task after the toggle was applied
    pub task: Task,
    /// Successor spawned when completing a recurring task, if any
    pub spawned: Option<Task>,
}

/// Business layer over the task store.
///
/// This is the only surface external callers (CLI, menu) use. All calls
/// are synchronous and run to completion; mutations take `&mut self`, so
/// the borrow checker enforces a single writer.
#[derive(Debug, Default)]
pub struct TaskOps {
    store: TaskStore,
}

impl TaskOps {
    /// Create an operations layer over an empty store
    pub fn new() -> Self {
        Self {
            store: TaskStore::new(),
        }
    }

    /// Create a new task from a draft
    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Task, TaskError> {
        let task = self.store.create(draft)?;
        info!("Created task {} '{}'", task.id, task.title);
        Ok(task)
    }

    /// Apply a partial update to a task. `id` and `created_at` cannot be
    /// patched; [`TaskPatch`] has no slot for them.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, TaskError> {
        self.store.update(id, patch)
    }

    /// Delete a task. Returns whether a removal occurred; deleting an
    /// absent id is not an error.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let deleted = self.store.delete(id);
        if deleted {
            info!("Deleted task {}", id);
        }
        deleted
    }

    /// Retrieve a task by id
    pub fn get_task(&self, id: TaskId) -> Option<Task> {
        self.store.get(id).cloned()
    }

    /// All tasks in store (ascending id) order
    pub fn get_all_tasks(&self) -> Vec<Task> {
        self.store.list_all()
    }

    /// Flip a task between incomplete and complete.
    ///
    /// Completing a recurring task derives its successor from the
    /// pre-toggle record and persists it; the successor is surfaced in
    /// the outcome. Reopening (complete → incomplete) never spawns and
    /// never retracts an already-spawned successor.
    pub fn toggle_complete(&mut self, id: TaskId) -> Result<ToggleOutcome, TaskError> {
        let current = self
            .store
            .get(id)
            .cloned()
            .ok_or(TaskError::NotFound { id })?;

        let task = self
            .store
            .update(id, TaskPatch::new().with_status(current.status.toggled()))?;

        let spawned = if current.status == Status::Incomplete && current.has_recurrence() {
            let draft = recurrence::next_occurrence(&current)?;
            let successor = self.store.create(draft)?;
            info!("Task {} completed, spawned successor {}", id, successor.id);
            Some(successor)
        } else {
            None
        };

        Ok(ToggleOutcome { task, spawned })
    }

    /// Case-insensitive substring search over title and description.
    /// An empty keyword matches every task.
    pub fn search_tasks(&self, keyword: &str) -> Vec<Task> {
        let needle = keyword.to_lowercase();
        self.store
            .list_all()
            .into_iter()
            .filter(|task| {
                task.title.to_lowercase().contains(&needle)
                    || task
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Tasks with the given completion status
    pub fn filter_by_status(&self, status: Status) -> Vec<Task> {
        self.store
            .list_all()
            .into_iter()
            .filter(|task| task.status == status)
            .collect()
    }

    /// Tasks with the given priority
    pub fn filter_by_priority(&self, priority: Priority) -> Vec<Task> {
        self.store
            .list_all()
            .into_iter()
            .filter(|task| task.priority == priority)
            .collect()
    }

    /// Tasks with (or without) a due date
    pub fn filter_by_due_date(&self, has_due_date: bool) -> Vec<Task> {
        self.store
            .list_all()
            .into_iter()
            .filter(|task| task.due_date.is_some() == has_due_date)
            .collect()
    }

    /// Tasks sorted chronologically by due date. Tasks without a due date
    /// sort after all dated tasks regardless of direction; ties break by
    /// id ascending.
    pub fn sort_by_due_date(&self, ascending: bool) -> Vec<Task> {
        let mut tasks = self.store.list_all();
        tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => {
                let order = if ascending { x.cmp(&y) } else { y.cmp(&x) };
                order.then(a.id.cmp(&b.id))
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        tasks
    }

    /// Tasks sorted by priority rank. The default direction
    /// (`ascending = false`) yields high → low; `ascending = true` yields
    /// ascending priority, low → high. Ties break by id ascending.
    pub fn sort_by_priority(&self, ascending: bool) -> Vec<Task> {
        let mut tasks = self.store.list_all();
        tasks.sort_by(|a, b| {
            let (ra, rb) = (a.priority.rank(), b.priority.rank());
            let order = if ascending { rb.cmp(&ra) } else { ra.cmp(&rb) };
            order.then(a.id.cmp(&b.id))
        });
        tasks
    }

    /// Tasks sorted case-insensitively by title; ties break by id ascending
    pub fn sort_by_title(&self, ascending: bool) -> Vec<Task> {
        let mut tasks = self.store.list_all();
        tasks.sort_by(|a, b| {
            let (ta, tb) = (a.title.to_lowercase(), b.title.to_lowercase());
            let order = if ascending { ta.cmp(&tb) } else { tb.cmp(&ta) };
            order.then(a.id.cmp(&b.id))
        });
        tasks
    }

    /// Incomplete tasks whose due date has passed
    pub fn get_overdue_tasks(&self) -> Vec<Task> {
        let now = Utc::now();
        self.store
            .list_all()
            .into_iter()
            .filter(|task| task.is_overdue(now))
            .collect()
    }

    /// Tasks whose reminder time has been reached and not yet acknowledged.
    /// Intended for the caller's polling loop, paired with
    /// [`mark_reminder_notified`](Self::mark_reminder_notified).
    pub fn get_due_reminders(&self) -> Vec<Task> {
        let now = Utc::now();
        self.store
            .list_all()
            .into_iter()
            .filter(|task| task.should_remind(now))
            .collect()
    }

    /// Acknowledge a fired reminder. Idempotent; fails only when the id
    /// is unknown.
    pub fn mark_reminder_notified(&mut self, id: TaskId) -> Result<Task, TaskError> {
        debug!("Acknowledging reminder for task {}", id);
        self.store
            .update(id, TaskPatch::new().with_reminder_notified(true))
    }
}
