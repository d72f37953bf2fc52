use super::column::{Column, default_columns};
use super::task::Task;

/// The column/order model: ordered top-level tasks plus ordered visible columns
#[derive(Debug, Clone, PartialEq)]
pub struct TaskTable {
    pub tasks: Vec<Task>,
    pub columns: Vec<Column>,
}

impl TaskTable {
    pub fn new(tasks: Vec<Task>, columns: Vec<Column>) -> Self {
        TaskTable { tasks, columns }
    }

    /// Table with the fixed default column set
    pub fn with_default_columns(tasks: Vec<Task>) -> Self {
        TaskTable::new(tasks, default_columns())
    }

    /// Index of the first column bound to `title`, which carries the tree affordances.
    /// Falls back to the first column.
    pub fn tree_column(&self) -> usize {
        self.columns
            .iter()
            .position(|c| c.field == super::Field::Title)
            .unwrap_or(0)
    }

    /// Total number of tasks at every depth
    pub fn task_count(&self) -> usize {
        fn count(tasks: &[Task]) -> usize {
            tasks.iter().map(|t| 1 + count(&t.sub_tasks)).sum()
        }
        count(&self.tasks)
    }
}
