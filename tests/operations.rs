//! Integration tests exercising the public `TaskOps` boundary, the only
//! surface an enclosing CLI or menu layer consumes.

use chrono::{DateTime, Duration, TimeZone, Utc};
use taskpad::{Priority, RecurrenceRule, Status, TaskDraft, TaskError, TaskOps, TaskPatch};

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

#[test]
fn completing_a_recurring_task_spawns_its_successor() {
    let mut ops = TaskOps::new();
    let due = date(2026, 5, 4);
    let task = ops
        .create_task(
            TaskDraft::new("Weekly review")
                .with_priority(Priority::High)
                .with_tags(["work"])
                .with_due_date(due)
                .with_reminder(due - Duration::hours(3))
                .with_recurrence(RecurrenceRule::Weekly),
        )
        .unwrap();

    let outcome = ops.toggle_complete(task.id).unwrap();
    assert_eq!(outcome.task.id, task.id);
    assert_eq!(outcome.task.status, Status::Complete);

    let successor = outcome.spawned.expect("recurring task must spawn");
    assert_ne!(successor.id, task.id);
    assert_eq!(successor.title, task.title);
    assert_eq!(successor.tags, task.tags);
    assert_eq!(successor.priority, task.priority);
    assert_eq!(successor.status, Status::Incomplete);
    assert_eq!(successor.due_date, Some(due + Duration::days(7)));
    assert_eq!(
        successor.reminder_time,
        Some(due + Duration::days(7) - Duration::hours(3))
    );
    assert!(!successor.reminder_notified);
    assert_eq!(ops.get_all_tasks().len(), 2);
}

#[test]
fn completing_a_plain_task_never_spawns() {
    let mut ops = TaskOps::new();
    let task = ops.create_task(TaskDraft::new("One-shot")).unwrap();

    let outcome = ops.toggle_complete(task.id).unwrap();
    assert_eq!(outcome.task.status, Status::Complete);
    assert!(outcome.spawned.is_none());
    assert_eq!(ops.get_all_tasks().len(), 1);
}

#[test]
fn reopening_never_spawns_and_never_retracts() {
    let mut ops = TaskOps::new();
    let task = ops
        .create_task(
            TaskDraft::new("Daily standup")
                .with_due_date(date(2026, 5, 4))
                .with_recurrence(RecurrenceRule::Daily),
        )
        .unwrap();

    let completed = ops.toggle_complete(task.id).unwrap();
    assert!(completed.spawned.is_some());
    assert_eq!(ops.get_all_tasks().len(), 2);

    // Reopen: the flip back is a plain status change, the spawned
    // successor stays.
    let reopened = ops.toggle_complete(task.id).unwrap();
    assert_eq!(reopened.task.status, Status::Incomplete);
    assert!(reopened.spawned.is_none());
    assert_eq!(ops.get_all_tasks().len(), 2);
}

#[test]
fn completing_with_an_astronomical_interval_fails_without_panicking() {
    let mut ops = TaskOps::new();
    let task = ops
        .create_task(
            TaskDraft::new("Far future")
                .with_due_date(date(2026, 1, 1))
                .with_recurrence(RecurrenceRule::Custom {
                    interval_days: 4_000_000_000,
                }),
        )
        .unwrap();

    let err = ops.toggle_complete(task.id).unwrap_err();
    assert!(matches!(err, TaskError::Validation { .. }));

    // No successor was stored.
    assert_eq!(ops.get_all_tasks().len(), 1);
}

#[test]
fn toggle_on_unknown_id_is_not_found() {
    let mut ops = TaskOps::new();
    let err = ops.toggle_complete(99).unwrap_err();
    assert!(matches!(err, TaskError::NotFound { id: 99 }));
}

#[test]
fn search_matches_title_and_description_case_insensitively() {
    let mut ops = TaskOps::new();
    ops.create_task(TaskDraft::new("Buy groceries")).unwrap();
    ops.create_task(TaskDraft::new("Clean kitchen").with_description("buy sponges"))
        .unwrap();
    ops.create_task(TaskDraft::new("Walk the dog")).unwrap();

    let hits = ops.search_tasks("BUY");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, 1);
    assert_eq!(hits[1].id, 2);

    assert!(ops.search_tasks("zebra").is_empty());
    assert_eq!(ops.search_tasks("").len(), 3);
}

#[test]
fn filters_return_empty_sequences_rather_than_errors() {
    let mut ops = TaskOps::new();
    assert!(ops.filter_by_priority(Priority::High).is_empty());
    assert!(ops.filter_by_status(Status::Complete).is_empty());

    ops.create_task(TaskDraft::new("low").with_priority(Priority::Low))
        .unwrap();
    ops.create_task(TaskDraft::new("dated").with_due_date(date(2026, 6, 1)))
        .unwrap();

    assert!(ops.filter_by_priority(Priority::High).is_empty());
    assert_eq!(ops.filter_by_priority(Priority::Low).len(), 1);
    assert_eq!(ops.filter_by_status(Status::Incomplete).len(), 2);
    assert_eq!(ops.filter_by_due_date(true).len(), 1);
    assert_eq!(ops.filter_by_due_date(false).len(), 1);
}

#[test]
fn sort_by_due_date_places_undated_tasks_last() {
    let mut ops = TaskOps::new();
    ops.create_task(TaskDraft::new("feb").with_due_date(date(2026, 2, 1)))
        .unwrap();
    ops.create_task(TaskDraft::new("jan").with_due_date(date(2026, 1, 1)))
        .unwrap();
    ops.create_task(TaskDraft::new("undated")).unwrap();

    let ascending: Vec<String> = ops
        .sort_by_due_date(true)
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(ascending, vec!["jan", "feb", "undated"]);

    let descending: Vec<String> = ops
        .sort_by_due_date(false)
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(descending, vec!["feb", "jan", "undated"]);
}

#[test]
fn sort_by_priority_defaults_to_high_first() {
    let mut ops = TaskOps::new();
    ops.create_task(TaskDraft::new("m1")).unwrap();
    ops.create_task(TaskDraft::new("low").with_priority(Priority::Low))
        .unwrap();
    ops.create_task(TaskDraft::new("high").with_priority(Priority::High))
        .unwrap();
    ops.create_task(TaskDraft::new("m2")).unwrap();

    let titles: Vec<String> = ops.sort_by_priority(false).into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["high", "m1", "m2", "low"]);

    let titles: Vec<String> = ops.sort_by_priority(true).into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["low", "m1", "m2", "high"]);
}

#[test]
fn sort_by_title_is_case_insensitive() {
    let mut ops = TaskOps::new();
    ops.create_task(TaskDraft::new("banana")).unwrap();
    ops.create_task(TaskDraft::new("Apple")).unwrap();
    ops.create_task(TaskDraft::new("cherry")).unwrap();

    let titles: Vec<String> = ops.sort_by_title(true).into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["Apple", "banana", "cherry"]);

    let titles: Vec<String> = ops.sort_by_title(false).into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["cherry", "banana", "Apple"]);
}

#[test]
fn overdue_excludes_completed_and_undated_tasks() {
    let mut ops = TaskOps::new();
    let yesterday = Utc::now() - Duration::days(1);
    let tomorrow = Utc::now() + Duration::days(1);

    let late = ops
        .create_task(TaskDraft::new("late").with_due_date(yesterday))
        .unwrap();
    ops.create_task(TaskDraft::new("future").with_due_date(tomorrow))
        .unwrap();
    ops.create_task(TaskDraft::new("undated")).unwrap();

    let overdue = ops.get_overdue_tasks();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id, late.id);

    ops.toggle_complete(late.id).unwrap();
    assert!(ops.get_overdue_tasks().is_empty());
}

#[test]
fn reminder_poll_and_acknowledge_cycle() {
    let mut ops = TaskOps::new();
    let now = Utc::now();

    let due = ops
        .create_task(
            TaskDraft::new("ring me")
                .with_due_date(now + Duration::days(1))
                .with_reminder(now - Duration::minutes(5)),
        )
        .unwrap();
    ops.create_task(
        TaskDraft::new("later")
            .with_due_date(now + Duration::days(2))
            .with_reminder(now + Duration::hours(6)),
    )
    .unwrap();

    let firing = ops.get_due_reminders();
    assert_eq!(firing.len(), 1);
    assert_eq!(firing[0].id, due.id);

    let acked = ops.mark_reminder_notified(due.id).unwrap();
    assert!(acked.reminder_notified);
    assert!(ops.get_due_reminders().is_empty());

    // Acknowledging again is a harmless no-op.
    ops.mark_reminder_notified(due.id).unwrap();

    let err = ops.mark_reminder_notified(404).unwrap_err();
    assert!(matches!(err, TaskError::NotFound { id: 404 }));
}

#[test]
fn rejected_create_leaves_the_store_untouched() {
    let mut ops = TaskOps::new();
    let due = date(2026, 7, 1);

    let err = ops
        .create_task(
            TaskDraft::new("bad reminder")
                .with_due_date(due)
                .with_reminder(due + Duration::hours(1)),
        )
        .unwrap_err();
    assert!(matches!(err, TaskError::Validation { .. }));
    assert!(ops.get_all_tasks().is_empty());
}

#[test]
fn update_through_the_operations_boundary() {
    let mut ops = TaskOps::new();
    let task = ops.create_task(TaskDraft::new("draft")).unwrap();

    let updated = ops
        .update_task(
            task.id,
            TaskPatch::new()
                .with_title("final")
                .with_priority(Priority::High)
                .with_tags(["release"]),
        )
        .unwrap();

    assert_eq!(updated.title, "final");
    assert_eq!(updated.priority, Priority::High);
    assert!(updated.tags.contains("release"));
    assert_eq!(updated.created_at, task.created_at);

    assert!(ops.delete_task(task.id));
    assert!(!ops.delete_task(task.id));
    assert!(ops.get_task(task.id).is_none());
}
