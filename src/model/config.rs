use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::column::Column;

/// Configuration from tasktree.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    /// Column layout. Empty means "use the seed's columns or the defaults".
    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Theme overrides, e.g. `background = "#0C001B"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default)]
    pub tag_colors: HashMap<String, String>,
    /// Keyed by status constant (`NOT_STARTED`, `STARTED`, `COMPLETED`)
    #[serde(default)]
    pub status_colors: HashMap<String, String>,
    /// Two presses on the same cell within this window count as a double click
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
            tag_colors: HashMap::new(),
            status_colors: HashMap::new(),
            double_click_ms: default_double_click_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_double_click_ms() -> u64 {
    400
}
