use serde::{Deserialize, Serialize};

use super::task::{Task, TaskStatus};

/// The task attribute a column is bound to.
/// Names that match no known attribute bind to a free-form extension field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Field {
    /// Read-only
    Id,
    Title,
    Tags,
    Assignee,
    Status,
    StartDate,
    DueDate,
    SubCount,
    /// Read-only, shows the number of child tasks
    SubTasks,
    Extra(String),
}

impl Field {
    /// Field name as written in seed and config files
    pub fn name(&self) -> &str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::Tags => "tags",
            Field::Assignee => "assignee",
            Field::Status => "status",
            Field::StartDate => "startDate",
            Field::DueDate => "dueDate",
            Field::SubCount => "subCount",
            Field::SubTasks => "subTasks",
            Field::Extra(name) => name,
        }
    }

    /// Fields backed by task structure rather than editable data
    pub fn is_read_only(&self) -> bool {
        matches!(self, Field::Id | Field::SubTasks)
    }

    /// Read the cell value this field shows for a task
    pub fn value<'a>(&self, task: &'a Task) -> CellValue<'a> {
        match self {
            Field::Id => CellValue::Text(task.id.clone()),
            Field::Title => CellValue::Text(task.title.clone()),
            Field::Tags => CellValue::Tags(&task.tags),
            Field::Status => CellValue::Status(task.status),
            Field::Assignee => text_or_empty(task.assignee.as_deref()),
            Field::StartDate => text_or_empty(task.start_date.as_deref()),
            Field::DueDate => text_or_empty(task.due_date.as_deref()),
            Field::SubCount => match task.sub_count {
                Some(n) => CellValue::Text(n.to_string()),
                None => CellValue::Empty,
            },
            Field::SubTasks => match task.sub_tasks.len() {
                0 => CellValue::Empty,
                n => CellValue::Text(n.to_string()),
            },
            Field::Extra(name) => match task.extra_text(name) {
                Some(text) => CellValue::Text(text),
                None => CellValue::Empty,
            },
        }
    }

    /// Current value as the text an inline editor starts from
    pub fn edit_text(&self, task: &Task) -> String {
        match self.value(task) {
            CellValue::Text(s) => s,
            CellValue::Tags(tags) => tags.join(", "),
            CellValue::Status(status) => status.label().to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Write edited text into the task. Returns false when the text could not
    /// be interpreted for this field and the task was left as it was.
    pub fn apply(&self, task: &mut Task, text: &str) -> bool {
        match self {
            Field::Id | Field::SubTasks => return false,
            Field::Title => task.title = text.to_string(),
            Field::Tags => {
                // Replaced wholesale by a single tag
                task.tags = if text.is_empty() {
                    Vec::new()
                } else {
                    vec![text.to_string()]
                };
            }
            Field::Assignee => task.assignee = non_empty(text),
            Field::StartDate => task.start_date = non_empty(text),
            Field::DueDate => task.due_date = non_empty(text),
            Field::Status => match TaskStatus::parse_loose(text) {
                Some(status) => task.status = status,
                None => return false,
            },
            Field::SubCount => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    task.sub_count = None;
                } else {
                    match trimmed.parse::<u32>() {
                        Ok(n) => task.sub_count = Some(n),
                        Err(_) => return false,
                    }
                }
            }
            Field::Extra(name) => {
                task.extra
                    .insert(name.clone(), serde_json::Value::String(text.to_string()));
            }
        }
        true
    }
}

fn text_or_empty(value: Option<&str>) -> CellValue<'static> {
    match value {
        Some(s) => CellValue::Text(s.to_string()),
        None => CellValue::Empty,
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        match name.as_str() {
            "id" => Field::Id,
            "title" => Field::Title,
            "tags" => Field::Tags,
            "assignee" => Field::Assignee,
            "status" => Field::Status,
            "startDate" => Field::StartDate,
            "dueDate" => Field::DueDate,
            "subCount" => Field::SubCount,
            "subTasks" => Field::SubTasks,
            _ => Field::Extra(name),
        }
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::from(name.to_string())
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.name().to_string()
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a cell displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue<'a> {
    Text(String),
    Tags(&'a [String]),
    Status(TaskStatus),
    /// Absent value or unknown extension field
    Empty,
}

/// A visible table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub field: Field,
    /// Display width in terminal cells; columns without one share the rest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>, field: Field) -> Self {
        Column {
            id: id.into(),
            title: title.into(),
            field,
            width: None,
        }
    }
}

/// The fixed column set shown when neither the seed nor the config supplies one
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new("col-title", "ITEM", Field::Title),
        Column::new("col-tags", "TAGS", Field::Tags),
        Column::new("col-assignee", "ASSIGNEES", Field::Assignee),
        Column::new("col-status", "STATUS", Field::Status),
        Column::new("col-start", "START DATE", Field::StartDate),
        Column::new("col-due", "DUE DATE", Field::DueDate),
    ]
}
