use crate::model::column::{Column, Field};

/// Placeholder title for a column added from the UI
pub const NEW_COLUMN_TITLE: &str = "New Column";

/// Error type for column operations
#[derive(Debug, thiserror::Error)]
pub enum ColumnError {
    #[error("column not found: {0}")]
    NotFound(String),
}

/// Highest N among ids of the form `col-N`, or 0.
fn max_column_number(columns: &[Column]) -> usize {
    columns
        .iter()
        .filter_map(|c| c.id.strip_prefix("col-")?.parse::<usize>().ok())
        .max()
        .unwrap_or(0)
}

/// Append a column with a generated id and placeholder title and field.
/// The placeholder field is a fresh extension field (`newColumnN`).
pub fn add_column(columns: &mut Vec<Column>) -> &Column {
    let n = max_column_number(columns) + 1;
    let column = Column::new(
        format!("col-{}", n),
        NEW_COLUMN_TITLE,
        Field::Extra(format!("newColumn{}", n)),
    );
    columns.push(column);
    &columns[columns.len() - 1]
}

/// Set the display title of a column.
pub fn rename_column(
    columns: &mut [Column],
    column_id: &str,
    title: &str,
) -> Result<(), ColumnError> {
    let column = columns
        .iter_mut()
        .find(|c| c.id == column_id)
        .ok_or_else(|| ColumnError::NotFound(column_id.to_string()))?;
    column.title = title.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::column::default_columns;

    #[test]
    fn add_to_defaults_starts_at_one() {
        let mut columns = default_columns();
        let added = add_column(&mut columns).clone();
        assert_eq!(added.id, "col-1");
        assert_eq!(added.title, NEW_COLUMN_TITLE);
        assert_eq!(added.field, Field::Extra("newColumn1".into()));
        assert_eq!(added.width, None);
        assert_eq!(columns.len(), 7);
        assert_eq!(columns.last(), Some(&added));
    }

    #[test]
    fn add_continues_numbering() {
        let mut columns = vec![Column::new("col-7", "Seven", Field::Title)];
        assert_eq!(add_column(&mut columns).id, "col-8");
        assert_eq!(add_column(&mut columns).id, "col-9");
        // existing order untouched
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["col-7", "col-8", "col-9"]);
    }

    #[test]
    fn rename_sets_title_only() {
        let mut columns = default_columns();
        rename_column(&mut columns, "col-due", "DEADLINE").unwrap();
        let due = columns.iter().find(|c| c.id == "col-due").unwrap();
        assert_eq!(due.title, "DEADLINE");
        assert_eq!(due.field, Field::DueDate);
    }

    #[test]
    fn rename_unknown_column() {
        let mut columns = default_columns();
        let err = rename_column(&mut columns, "col-x", "X").unwrap_err();
        assert_eq!(err.to_string(), "column not found: col-x");
    }
}
