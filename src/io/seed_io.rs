use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::column::Column;
use crate::model::task::Task;
use crate::ops::task_ops::find_duplicate_id;

/// Transient UI flag some exporters leave on tasks; expansion is never seeded from it
const TRANSIENT_EXPANDED_KEY: &str = "isExpanded";

/// Error type for seed loading
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse seed file: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("seed file must be a task array or an object with \"tasks\"")]
    InvalidShape,
    #[error("duplicate task id in seed: {0}")]
    DuplicateId(String),
}

/// Tasks and optional columns read from a seed file
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    pub tasks: Vec<Task>,
    pub columns: Option<Vec<Column>>,
}

/// Object form of a seed file
#[derive(Deserialize)]
struct SeedTable {
    tasks: Vec<Task>,
    #[serde(default)]
    columns: Option<Vec<Column>>,
}

/// Parse seed JSON text. A seed is either a bare task array or an object with
/// `tasks` and optional `columns`.
pub fn parse_seed(text: &str) -> Result<Seed, SeedError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let (mut tasks, columns) = match value {
        serde_json::Value::Array(_) => (serde_json::from_value::<Vec<Task>>(value)?, None),
        serde_json::Value::Object(_) => {
            let table: SeedTable = serde_json::from_value(value)?;
            (table.tasks, table.columns)
        }
        _ => return Err(SeedError::InvalidShape),
    };
    strip_transient(&mut tasks);
    if let Some(dup) = find_duplicate_id(&tasks) {
        return Err(SeedError::DuplicateId(dup));
    }
    Ok(Seed { tasks, columns })
}

/// Read and parse a seed file
pub fn load_seed(path: &Path) -> Result<Seed, SeedError> {
    let text = fs::read_to_string(path).map_err(|e| SeedError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let seed = parse_seed(&text)?;
    tracing::info!(
        path = %path.display(),
        tasks = seed.tasks.len(),
        has_columns = seed.columns.is_some(),
        "loaded seed"
    );
    Ok(seed)
}

fn strip_transient(tasks: &mut [Task]) {
    for task in tasks {
        task.extra.shift_remove(TRANSIENT_EXPANDED_KEY);
        strip_transient(&mut task.sub_tasks);
    }
}
