use crate::model::expansion::ExpansionSet;
use crate::model::task::Task;

/// One visible row of the task tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub id: String,
    /// Index at each nesting level, top-level index first
    pub path: Vec<usize>,
    /// Nesting level (0 = top-level)
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
}

impl FlatRow {
    /// Position of this row's top-level ancestor (itself at depth 0)
    pub fn top_level_index(&self) -> usize {
        self.path.first().copied().unwrap_or(0)
    }
}

/// Flatten the visible part of the tree: each task's row is followed by its
/// children's rows (one level deeper) when it is expanded.
pub fn flatten(tasks: &[Task], expanded: &ExpansionSet) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    flatten_inner(tasks, expanded, 0, &[], &mut rows);
    rows
}

fn flatten_inner(
    tasks: &[Task],
    expanded: &ExpansionSet,
    depth: usize,
    parent_path: &[usize],
    rows: &mut Vec<FlatRow>,
) {
    for (i, task) in tasks.iter().enumerate() {
        let mut path = parent_path.to_vec();
        path.push(i);

        let has_children = task.has_children();
        let is_expanded = has_children && expanded.is_expanded(&task.id);

        rows.push(FlatRow {
            id: task.id.clone(),
            path: path.clone(),
            depth,
            has_children,
            is_expanded,
        });

        if is_expanded {
            flatten_inner(&task.sub_tasks, expanded, depth + 1, &path, rows);
        }
    }
}

/// Resolve a task from a path of indices
pub fn resolve_task<'a>(tasks: &'a [Task], path: &[usize]) -> Option<&'a Task> {
    let (first, rest) = path.split_first()?;
    let mut current = tasks.get(*first)?;
    for &idx in rest {
        current = current.sub_tasks.get(idx)?;
    }
    Some(current)
}
