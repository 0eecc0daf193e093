//! # taskpad
//!
//! An in-memory task management core: create, update, delete, and organize
//! tasks (priority, tags, search, filter, sort) with time-based behavior
//! layered on top (overdue detection, reminders, recurring task
//! regeneration).
//!
//! ## Architecture Overview
//!
//! Everything lives under the [`task`] module, leaves first:
//!
//! - **[`task::types`]**: the `Task` record, `TaskDraft`/`TaskPatch`
//!   inputs, and the closed `Status`/`Priority`/`RecurrenceRule` enums
//! - **[`task::store`]**: the authoritative keyed collection; assigns
//!   sequential ids and guarantees atomic validate-then-write semantics
//! - **[`task::recurrence`]**: pure successor computation for recurring
//!   tasks, with no storage access
//! - **[`task::operations`]**: the `TaskOps` business layer and the only
//!   surface external callers (CLI, menu) consume
//! - **[`task::parse`]**: date/time/token parsing for the textual inputs
//!   a front end collects
//!
//! Control flow runs strictly downward: callers invoke `TaskOps`, which
//! drives the store and the recurrence engine. All calls are synchronous
//! and run to completion; no state survives the process.
//!
//! ## Quick Start
//!
//! ```rust
//! use taskpad::{Priority, RecurrenceRule, TaskDraft, TaskOps};
//!
//! let mut ops = TaskOps::new();
//! let task = ops
//!     .create_task(
//!         TaskDraft::new("Water the plants")
//!             .with_priority(Priority::High)
//!             .with_recurrence(RecurrenceRule::Weekly),
//!     )
//!     .unwrap();
//! assert_eq!(task.id, 1);
//!
//! // Completing a recurring task spawns its successor.
//! let outcome = ops.toggle_complete(task.id).unwrap();
//! assert!(outcome.spawned.is_some());
//! ```

pub mod task;

pub use task::{
    Priority, RecurrenceRule, Status, Task, TaskDraft, TaskError, TaskId, TaskOps, TaskPatch,
    TaskStore, ToggleOutcome,
};
