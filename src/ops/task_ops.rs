use std::collections::HashSet;

use crate::model::column::Field;
use crate::model::expansion::ExpansionSet;
use crate::model::task::{Task, TaskStatus};

/// Placeholder title for a task added from the UI
pub const NEW_TASK_TITLE: &str = "New Task";
/// Placeholder title for a sub-task added from the UI
pub const NEW_SUBTASK_TITLE: &str = "New Sub-task";

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Find a task by ID anywhere in the tree (depth-first).
pub fn find_task<'a>(tasks: &'a [Task], task_id: &str) -> Option<&'a Task> {
    for task in tasks {
        if task.id == task_id {
            return Some(task);
        }
        if let Some(t) = find_task(&task.sub_tasks, task_id) {
            return Some(t);
        }
    }
    None
}

/// Find a task by ID anywhere in the tree, return mutable ref.
pub fn find_task_mut<'a>(tasks: &'a mut [Task], task_id: &str) -> Option<&'a mut Task> {
    for task in tasks.iter_mut() {
        if task.id == task_id {
            return Some(task);
        }
        if let Some(t) = find_task_mut(&mut task.sub_tasks, task_id) {
            return Some(t);
        }
    }
    None
}

/// Position of a task in the top-level list (children are not searched).
pub fn top_level_index(tasks: &[Task], task_id: &str) -> Option<usize> {
    tasks.iter().position(|t| t.id == task_id)
}

/// Visit every task in the tree, parents before children.
pub fn for_each_task(tasks: &[Task], f: &mut dyn FnMut(&Task)) {
    for task in tasks {
        f(task);
        for_each_task(&task.sub_tasks, f);
    }
}

/// The first ID that appears more than once in the tree, if any.
pub fn find_duplicate_id(tasks: &[Task]) -> Option<String> {
    let mut seen = HashSet::new();
    let mut dup = None;
    for_each_task(tasks, &mut |task| {
        if dup.is_none() && !seen.insert(task.id.clone()) {
            dup = Some(task.id.clone());
        }
    });
    dup
}

fn id_exists(tasks: &[Task], id: &str) -> bool {
    find_task(tasks, id).is_some()
}

// ---------------------------------------------------------------------------
// Task creation
// ---------------------------------------------------------------------------

/// Next free top-level ID of the form `task-N`.
fn next_task_id(tasks: &[Task]) -> String {
    let mut max = 0usize;
    for_each_task(tasks, &mut |task| {
        if let Some(n) = task
            .id
            .strip_prefix("task-")
            .and_then(|rest| rest.parse::<usize>().ok())
            && n > max
        {
            max = n;
        }
    });
    let mut n = max + 1;
    while id_exists(tasks, &format!("task-{}", n)) {
        n += 1;
    }
    format!("task-{}", n)
}

/// Append a new top-level task with a placeholder title.
/// Returns the assigned ID.
pub fn add_task(tasks: &mut Vec<Task>) -> String {
    let id = next_task_id(tasks);
    tasks.push(Task::new(id.clone(), NEW_TASK_TITLE));
    id
}

/// Append a child to the task identified by `parent_id` and force the parent
/// into the expansion set so the new child is visible.
/// Returns the assigned sub-task ID.
pub fn add_subtask(
    tasks: &mut [Task],
    expanded: &mut ExpansionSet,
    parent_id: &str,
) -> Result<String, TaskError> {
    let sibling_count = find_task(tasks, parent_id)
        .ok_or_else(|| TaskError::NotFound(parent_id.to_string()))?
        .sub_tasks
        .len();

    let mut n = sibling_count + 1;
    while id_exists(tasks, &format!("{}-{}", parent_id, n)) {
        n += 1;
    }
    let sub_id = format!("{}-{}", parent_id, n);

    let parent = find_task_mut(tasks, parent_id)
        .ok_or_else(|| TaskError::NotFound(parent_id.to_string()))?;
    parent
        .sub_tasks
        .push(Task::new(sub_id.clone(), NEW_SUBTASK_TITLE));
    expanded.expand(parent_id);

    Ok(sub_id)
}

// ---------------------------------------------------------------------------
// Field edits
// ---------------------------------------------------------------------------

/// Write edited text into one field of one task.
/// Returns Ok(false) when the text was not valid for the field (task unchanged).
pub fn set_field(
    tasks: &mut [Task],
    task_id: &str,
    field: &Field,
    text: &str,
) -> Result<bool, TaskError> {
    let task =
        find_task_mut(tasks, task_id).ok_or_else(|| TaskError::NotFound(task_id.to_string()))?;
    Ok(field.apply(task, text))
}

/// Cycle status: not started → started → completed → not started
pub fn cycle_status(tasks: &mut [Task], task_id: &str) -> Result<TaskStatus, TaskError> {
    let task =
        find_task_mut(tasks, task_id).ok_or_else(|| TaskError::NotFound(task_id.to_string()))?;
    task.status = task.status.next();
    Ok(task.status)
}

// ---------------------------------------------------------------------------
// Reordering
// ---------------------------------------------------------------------------

/// Remove the top-level task at `from` and reinsert it at `to`.
/// `to` is clamped to the end of the list. Returns the final index.
pub fn reorder_top_level(tasks: &mut Vec<Task>, from: usize, to: usize) -> Result<usize, TaskError> {
    if from >= tasks.len() {
        return Err(TaskError::InvalidPosition(format!(
            "source {} out of range (len {})",
            from,
            tasks.len()
        )));
    }
    let task = tasks.remove(from);
    let to = to.min(tasks.len());
    tasks.insert(to, task);
    Ok(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixture::demo_tasks;
    use pretty_assertions::assert_eq;

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    fn flat_top_level(n: usize) -> Vec<Task> {
        (0..n)
            .map(|i| Task::new(format!("t{}", i), format!("Task {}", i)))
            .collect()
    }

    #[test]
    fn find_nested_task() {
        let tasks = demo_tasks();
        assert_eq!(find_task(&tasks, "1-1-3").unwrap().title, "Design Graphics");
        assert!(find_task(&tasks, "nope").is_none());
    }

    #[test]
    fn duplicate_ids_detected() {
        let mut tasks = demo_tasks();
        assert_eq!(find_duplicate_id(&tasks), None);
        tasks[0].sub_tasks[1].sub_tasks.push(Task::new("1-1-2", "Copy"));
        assert_eq!(find_duplicate_id(&tasks), Some("1-1-2".to_string()));
    }

    #[test]
    fn add_task_appends_placeholder() {
        let mut tasks = demo_tasks();
        let id = add_task(&mut tasks);
        assert_eq!(id, "task-1");
        let added = tasks.last().unwrap();
        assert_eq!(added.title, NEW_TASK_TITLE);
        assert_eq!(added.status, TaskStatus::NotStarted);
        assert!(added.tags.is_empty());
        assert_eq!(add_task(&mut tasks), "task-2");
    }

    #[test]
    fn add_task_skips_taken_ids() {
        let mut tasks = vec![Task::new("task-4", "Old")];
        assert_eq!(add_task(&mut tasks), "task-5");
    }

    #[test]
    fn add_subtask_appends_and_expands_parent() {
        let mut tasks = demo_tasks();
        let mut expanded = ExpansionSet::new();
        let id = add_subtask(&mut tasks, &mut expanded, "1-3").unwrap();
        assert_eq!(id, "1-3-3");
        let parent = find_task(&tasks, "1-3").unwrap();
        assert_eq!(parent.sub_tasks.len(), 3);
        assert_eq!(parent.sub_tasks[2].title, NEW_SUBTASK_TITLE);
        assert_eq!(parent.sub_tasks[2].status, TaskStatus::NotStarted);
        assert!(expanded.is_expanded("1-3"));
        assert_eq!(expanded.len(), 1);
    }

    #[test]
    fn add_subtask_to_leaf() {
        let mut tasks = demo_tasks();
        let mut expanded = ExpansionSet::new();
        let id = add_subtask(&mut tasks, &mut expanded, "1-2").unwrap();
        assert_eq!(id, "1-2-1");
        assert!(find_task(&tasks, "1-2").unwrap().has_children());
    }

    #[test]
    fn add_subtask_unknown_parent() {
        let mut tasks = demo_tasks();
        let mut expanded = ExpansionSet::new();
        let err = add_subtask(&mut tasks, &mut expanded, "zzz").unwrap_err();
        assert!(matches!(err, TaskError::NotFound(ref id) if id == "zzz"));
        assert!(expanded.is_empty());
    }

    #[test]
    fn set_field_touches_only_target() {
        let mut tasks = demo_tasks();
        let before = tasks.clone();
        assert!(set_field(&mut tasks, "1-3", &Field::Title, "Webinar v2").unwrap());

        let webinar = find_task(&tasks, "1-3").unwrap();
        let old = find_task(&before, "1-3").unwrap();
        assert_eq!(webinar.title, "Webinar v2");
        assert_eq!(webinar.tags, old.tags);
        assert_eq!(webinar.status, old.status);
        assert_eq!(webinar.start_date, old.start_date);
        assert_eq!(webinar.due_date, old.due_date);

        // Restore the one field and the whole tree matches again
        let mut restored = tasks.clone();
        set_field(&mut restored, "1-3", &Field::Title, "Webinar").unwrap();
        assert_eq!(restored, before);
        assert_eq!(titles(&tasks[0].sub_tasks), vec!["Social Media", "Landing Page", "Webinar v2"]);
    }

    #[test]
    fn set_field_missing_task() {
        let mut tasks = demo_tasks();
        assert!(set_field(&mut tasks, "gone", &Field::Title, "x").is_err());
    }

    #[test]
    fn cycle_status_on_nested() {
        let mut tasks = demo_tasks();
        assert_eq!(cycle_status(&mut tasks, "1-1-3").unwrap(), TaskStatus::Completed);
        assert_eq!(cycle_status(&mut tasks, "1-1-3").unwrap(), TaskStatus::NotStarted);
    }

    #[test]
    fn reorder_moves_down() {
        let mut tasks = flat_top_level(5);
        assert_eq!(reorder_top_level(&mut tasks, 1, 3).unwrap(), 3);
        assert_eq!(
            titles(&tasks),
            vec!["Task 0", "Task 2", "Task 3", "Task 1", "Task 4"]
        );
    }

    #[test]
    fn reorder_moves_up() {
        let mut tasks = flat_top_level(5);
        reorder_top_level(&mut tasks, 4, 0).unwrap();
        assert_eq!(
            titles(&tasks),
            vec!["Task 4", "Task 0", "Task 1", "Task 2", "Task 3"]
        );
    }

    #[test]
    fn reorder_preserves_relative_order_for_every_pair() {
        let n = 5;
        for from in 0..n {
            for to in 0..n {
                let mut tasks = flat_top_level(n);
                reorder_top_level(&mut tasks, from, to).unwrap();
                assert_eq!(tasks[to].id, format!("t{}", from));

                let others: Vec<&str> = tasks
                    .iter()
                    .filter(|t| t.id != format!("t{}", from))
                    .map(|t| t.id.as_str())
                    .collect();
                let expected: Vec<String> = (0..n)
                    .filter(|&i| i != from)
                    .map(|i| format!("t{}", i))
                    .collect();
                assert_eq!(others, expected, "from {} to {}", from, to);
            }
        }
    }

    #[test]
    fn reorder_clamps_destination() {
        let mut tasks = flat_top_level(3);
        assert_eq!(reorder_top_level(&mut tasks, 0, 99).unwrap(), 2);
        assert_eq!(titles(&tasks), vec!["Task 1", "Task 2", "Task 0"]);
    }

    #[test]
    fn reorder_rejects_bad_source() {
        let mut tasks = flat_top_level(3);
        assert!(matches!(
            reorder_top_level(&mut tasks, 3, 0),
            Err(TaskError::InvalidPosition(_))
        ));
        assert_eq!(titles(&tasks), vec!["Task 0", "Task 1", "Task 2"]);
    }

    #[test]
    fn reorder_keeps_children_attached() {
        let mut tasks = demo_tasks();
        tasks.push(Task::new("2", "Launch"));
        reorder_top_level(&mut tasks, 0, 1).unwrap();
        assert_eq!(titles(&tasks), vec!["Launch", "Blog"]);
        assert_eq!(tasks[1].sub_tasks.len(), 3);
    }
}
