use std::path::Path;

use crate::io::config_io::{self, ConfigError, LoadedConfig};
use crate::io::seed_io::{self, SeedError};
use crate::model::fixture::demo_tasks;
use crate::model::{Column, TaskTable, default_columns};

/// Error type for startup loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything the app needs at startup
#[derive(Debug)]
pub struct Inputs {
    pub table: TaskTable,
    pub config: LoadedConfig,
}

/// Load the seed (or the demo tree) and the config, then settle the columns
pub fn load_inputs(
    tasks_path: Option<&Path>,
    config_path: Option<&Path>,
    cwd: &Path,
) -> Result<Inputs, LoadError> {
    let config = config_io::load_config(config_path, cwd)?;

    let (tasks, seed_columns) = match tasks_path {
        Some(path) => {
            let seed = seed_io::load_seed(path)?;
            (seed.tasks, seed.columns)
        }
        None => {
            tracing::info!("no seed file, using demo tasks");
            (demo_tasks(), None)
        }
    };

    let columns = resolve_columns(seed_columns, &config.config.columns);
    Ok(Inputs {
        table: TaskTable::new(tasks, columns),
        config,
    })
}

/// Seed file columns win over config columns, which win over the defaults.
/// An empty list counts as not given.
pub fn resolve_columns(seed: Option<Vec<Column>>, config: &[Column]) -> Vec<Column> {
    match seed {
        Some(columns) if !columns.is_empty() => columns,
        _ if !config.is_empty() => config.to_vec(),
        _ => default_columns(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use std::fs;
    use tempfile::TempDir;

    fn one_column(title: &str) -> Vec<Column> {
        vec![Column::new("c", title, Field::Title)]
    }

    #[test]
    fn column_precedence() {
        assert_eq!(
            resolve_columns(Some(one_column("seed")), &one_column("config"))[0].title,
            "seed"
        );
        assert_eq!(
            resolve_columns(None, &one_column("config"))[0].title,
            "config"
        );
        assert_eq!(
            resolve_columns(Some(vec![]), &one_column("config"))[0].title,
            "config"
        );
        assert_eq!(resolve_columns(None, &[]), default_columns());
    }

    #[test]
    fn defaults_to_demo_tree() {
        let tmp = TempDir::new().unwrap();
        let inputs = load_inputs(None, None, tmp.path()).unwrap();
        assert_eq!(inputs.table.tasks[0].title, "Blog");
        assert_eq!(inputs.table.columns, default_columns());
    }

    #[test]
    fn seed_and_config_together() {
        let tmp = TempDir::new().unwrap();
        let seed = tmp.path().join("tree.json");
        fs::write(&seed, r#"[{"id":"x","title":"Only"}]"#).unwrap();
        fs::write(
            tmp.path().join("tasktree.toml"),
            "[[columns]]\nid = \"c1\"\ntitle = \"WHAT\"\nfield = \"title\"\n",
        )
        .unwrap();

        let inputs = load_inputs(Some(&seed), None, tmp.path()).unwrap();
        assert_eq!(inputs.table.tasks.len(), 1);
        assert_eq!(inputs.table.columns.len(), 1);
        assert_eq!(inputs.table.columns[0].title, "WHAT");
    }

    #[test]
    fn missing_seed_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_inputs(Some(&tmp.path().join("nope.json")), None, tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::Seed(SeedError::ReadError { .. })));
        assert!(err.to_string().contains("nope.json"));
    }
}
