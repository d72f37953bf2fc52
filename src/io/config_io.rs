use std::fs;
use std::path::{Path, PathBuf};

use crate::model::column::Column;
use crate::model::config::Config;

use super::atomic_write;

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "tasktree.toml";

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A parsed config plus the editable document it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// Where column changes are written back to
    pub path: PathBuf,
    /// Round-trip-safe document; empty when the file does not exist yet
    pub doc: toml_edit::DocumentMut,
}

/// Read the config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing.
pub fn read_config(path: &Path) -> Result<(Config, toml_edit::DocumentMut), ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text)?;
    let doc: toml_edit::DocumentMut = text.parse()?;
    Ok((config, doc))
}

/// Load an explicit config path (which must exist), or `tasktree.toml` in `cwd`
/// when present, or the defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedConfig, ConfigError> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (cwd.join(DEFAULT_CONFIG_FILE), false),
    };

    if !required && !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(LoadedConfig {
            config: Config::default(),
            path,
            doc: toml_edit::DocumentMut::new(),
        });
    }

    let (config, doc) = read_config(&path)?;
    tracing::info!(path = %path.display(), columns = config.columns.len(), "loaded config");
    Ok(LoadedConfig { config, path, doc })
}

/// Replace the `[[columns]]` array in the document, leaving everything else as written.
pub fn set_columns(doc: &mut toml_edit::DocumentMut, columns: &[Column]) {
    let mut tables = toml_edit::ArrayOfTables::new();
    for column in columns {
        let mut table = toml_edit::Table::new();
        table["id"] = toml_edit::value(&column.id);
        table["title"] = toml_edit::value(&column.title);
        table["field"] = toml_edit::value(column.field.name());
        if let Some(width) = column.width {
            table["width"] = toml_edit::value(i64::from(width));
        }
        tables.push(table);
    }
    doc["columns"] = toml_edit::Item::ArrayOfTables(tables);
}

/// Write the column list into the config document and save it atomically.
pub fn persist_columns(
    path: &Path,
    doc: &mut toml_edit::DocumentMut,
    columns: &[Column],
) -> Result<(), ConfigError> {
    set_columns(doc, columns);
    atomic_write(path, doc.to_string().as_bytes()).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), columns = columns.len(), "persisted columns");
    Ok(())
}
