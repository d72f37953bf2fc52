use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{CellValue, ExpansionSet, Field, TaskTable};
use crate::tui::tree;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ColumnJson {
    pub id: String,
    pub title: String,
    pub field: String,
}

#[derive(Serialize)]
pub struct RowJson {
    pub id: String,
    pub depth: usize,
    #[serde(rename = "hasChildren")]
    pub has_children: bool,
    pub expanded: bool,
    /// Cell values keyed by column id
    pub cells: IndexMap<String, serde_json::Value>,
}

#[derive(Serialize)]
pub struct TableJson {
    pub columns: Vec<ColumnJson>,
    pub rows: Vec<RowJson>,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

fn cell_json(field: &Field, task: &crate::model::Task) -> serde_json::Value {
    match field.value(task) {
        CellValue::Text(s) => serde_json::Value::String(s),
        CellValue::Tags(tags) => serde_json::Value::from(tags.to_vec()),
        CellValue::Status(status) => serde_json::Value::String(status.as_str().to_string()),
        CellValue::Empty => serde_json::Value::Null,
    }
}

/// The visible rows of the table as JSON-ready structs
pub fn table_to_json(table: &TaskTable, expanded: &ExpansionSet) -> TableJson {
    let columns = table
        .columns
        .iter()
        .map(|c| ColumnJson {
            id: c.id.clone(),
            title: c.title.clone(),
            field: c.field.name().to_string(),
        })
        .collect();

    let rows = tree::flatten(&table.tasks, expanded)
        .into_iter()
        .filter_map(|row| {
            let task = tree::resolve_task(&table.tasks, &row.path)?;
            let cells = table
                .columns
                .iter()
                .map(|c| (c.id.clone(), cell_json(&c.field, task)))
                .collect();
            Some(RowJson {
                id: row.id,
                depth: row.depth,
                has_children: row.has_children,
                expanded: row.is_expanded,
                cells,
            })
        })
        .collect();

    TableJson { columns, rows }
}
