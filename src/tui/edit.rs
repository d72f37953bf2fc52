use crate::model::column::{Column, Field};
use crate::model::task::Task;
use crate::util::unicode;

/// What an inline editor writes to when it commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// One field of one task
    Cell { task_id: String, field: Field },
    /// A column header title
    ColumnTitle { column_id: String },
}

/// A cell in Edit state: the draft buffer and its text cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub target: EditTarget,
    pub buffer: String,
    /// Byte offset into `buffer`, always on a grapheme boundary
    pub cursor: usize,
    /// Value the editor was seeded with
    pub original: String,
}

impl CellEdit {
    fn seeded(target: EditTarget, text: String) -> Self {
        CellEdit {
            target,
            cursor: text.len(),
            original: text.clone(),
            buffer: text,
        }
    }

    /// Display → Edit for a task field, seeded with its current value
    pub fn for_cell(task: &Task, field: &Field) -> Self {
        CellEdit::seeded(
            EditTarget::Cell {
                task_id: task.id.clone(),
                field: field.clone(),
            },
            field.edit_text(task),
        )
    }

    /// Display → Edit for a column header
    pub fn for_column(column: &Column) -> Self {
        CellEdit::seeded(
            EditTarget::ColumnTitle {
                column_id: column.id.clone(),
            },
            column.title.clone(),
        )
    }

    /// True if this editor belongs to the given task and field
    pub fn is_cell(&self, task_id: &str, field: &Field) -> bool {
        matches!(&self.target, EditTarget::Cell { task_id: t, field: f } if t == task_id && f == field)
    }

    pub fn is_column(&self, column_id: &str) -> bool {
        matches!(&self.target, EditTarget::ColumnTitle { column_id: c } if c == column_id)
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer != self.original
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' || c == '\r' {
            return;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, text: &str) {
        let clean = text.replace(['\n', '\r'], " ");
        self.buffer.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Clear the whole buffer (Ctrl+U)
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Cursor position in terminal cells from the start of the buffer
    pub fn cursor_col(&self) -> usize {
        unicode::byte_offset_to_display_col(&self.buffer, self.cursor)
    }
}
