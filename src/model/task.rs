use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Task progress status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    Started,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::NotStarted,
        TaskStatus::Started,
        TaskStatus::Completed,
    ];

    /// The constant name used in seed files (`NOT_STARTED`)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "NOT_STARTED",
            TaskStatus::Started => "STARTED",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    /// Human label shown in the status badge (`NOT STARTED`)
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "NOT STARTED",
            TaskStatus::Started => "STARTED",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    /// Cycle: not started → started → completed → not started
    pub fn next(self) -> TaskStatus {
        match self {
            TaskStatus::NotStarted => TaskStatus::Started,
            TaskStatus::Started => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::NotStarted,
        }
    }

    /// Parse either the label or the constant name, ignoring case.
    /// `started`, `NOT STARTED`, `not_started` and `not-started` are all accepted.
    pub fn parse_loose(s: &str) -> Option<TaskStatus> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A row in the task table. Children nest recursively in `sub_tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique across the whole tree
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Display string, never parsed as a date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Display string, never parsed as a date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_tasks: Vec<Task>,
    /// Displayed sub-task count (`3 subs`), independent of `sub_tasks`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_count: Option<u32>,
    /// Free-form extension fields bound by custom columns, in seed order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Task {
    /// Create a task with the given id and title, status NOT_STARTED, no tags
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            status: TaskStatus::NotStarted,
            tags: Vec::new(),
            assignee: None,
            start_date: None,
            due_date: None,
            sub_tasks: Vec::new(),
            sub_count: None,
            extra: IndexMap::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.sub_tasks.is_empty()
    }

    /// Text of an extension field. Non-string JSON values are shown in their JSON form.
    pub fn extra_text(&self, name: &str) -> Option<String> {
        match self.extra.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
