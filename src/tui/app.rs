use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::model::{Column, ExpansionSet, Task, TaskTable, UiConfig};
use crate::ops::column_ops;
use crate::ops::task_ops::{self, TaskError};

use super::edit::{CellEdit, EditTarget};
use super::input;
use super::render;
use super::theme::Theme;
use super::tree::{self, FlatRow};

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// A cell or column header is being edited
    Edit,
    /// A top-level row is being moved with the keyboard
    Move,
}

/// Keyboard move of a top-level task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveState {
    pub task_id: String,
    /// Where the task was when move mode started, restored on cancel
    pub original_index: usize,
}

/// Mouse drag of a top-level task, from press to release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub task_id: String,
    pub from_index: usize,
    /// Top-level index under the pointer, if it has moved onto a row
    pub hover_index: Option<usize>,
}

/// The previous left click, for double-click detection
#[derive(Debug, Clone, Copy)]
pub struct LastClick {
    pub at: Instant,
    /// Flat row index, None for the header row
    pub row: Option<usize>,
    pub column: usize,
}

impl LastClick {
    pub fn is_double(&self, row: Option<usize>, column: usize, window: Duration) -> bool {
        self.row == row && self.column == column && self.at.elapsed() < window
    }
}

/// Screen geometry of the last rendered table, used for mouse hit testing
#[derive(Debug, Clone, Default)]
pub struct TableLayout {
    pub header: Rect,
    pub body: Rect,
    pub scroll_offset: usize,
    pub row_count: usize,
    /// (x, width) of each column's cell
    pub columns: Vec<(u16, u16)>,
    /// Index of the column that carries indentation and the expand affordance
    pub tree_column: usize,
}

impl TableLayout {
    /// Flat row index under screen row `y`
    pub fn row_at(&self, y: u16) -> Option<usize> {
        if y < self.body.y || y >= self.body.y + self.body.height {
            return None;
        }
        let row = self.scroll_offset + (y - self.body.y) as usize;
        (row < self.row_count).then_some(row)
    }

    /// Column index under screen column `x`
    pub fn column_at(&self, x: u16) -> Option<usize> {
        self.columns
            .iter()
            .position(|&(cx, w)| x >= cx && x < cx + w)
    }

    pub fn is_header(&self, y: u16) -> bool {
        self.header.height > 0 && y >= self.header.y && y < self.header.y + self.header.height
    }

    /// Screen x of the expand affordance for a row at `depth`
    pub fn affordance_x(&self, depth: usize) -> Option<u16> {
        let &(x, w) = self.columns.get(self.tree_column)?;
        let offset = (depth * 2) as u16;
        (offset < w).then_some(x + offset)
    }
}

/// Callback invoked with the full column list after a column is added or renamed
pub type ColumnsListener = Box<dyn FnMut(&[Column])>;

/// Main application state
pub struct App {
    pub table: TaskTable,
    pub expanded: ExpansionSet,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Cursor index into the flat visible rows
    pub cursor: usize,
    /// Column under the cursor
    pub column_cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// At most one cell is in Edit state
    pub edit: Option<CellEdit>,
    pub move_state: Option<MoveState>,
    pub drag: Option<DragState>,
    pub last_click: Option<LastClick>,
    pub double_click_window: Duration,
    pub layout: TableLayout,
    pub show_help: bool,
    pub show_key_hints: bool,
    pub status_message: Option<String>,
    pub status_is_error: bool,
    columns_listener: Option<ColumnsListener>,
}

impl App {
    pub fn new(table: TaskTable, ui: &UiConfig) -> Self {
        App {
            table,
            expanded: ExpansionSet::new(),
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(ui),
            cursor: 0,
            column_cursor: 0,
            scroll_offset: 0,
            edit: None,
            move_state: None,
            drag: None,
            last_click: None,
            double_click_window: Duration::from_millis(ui.double_click_ms),
            layout: TableLayout::default(),
            show_help: false,
            show_key_hints: ui.show_key_hints,
            status_message: None,
            status_is_error: false,
            columns_listener: None,
        }
    }

    /// Register the host callback for column changes
    pub fn on_columns_changed(&mut self, listener: impl FnMut(&[Column]) + 'static) {
        self.columns_listener = Some(Box::new(listener));
    }

    fn notify_columns(&mut self) {
        if let Some(listener) = self.columns_listener.as_mut() {
            listener(&self.table.columns);
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = true;
    }

    // -----------------------------------------------------------------------
    // Rows and cursor
    // -----------------------------------------------------------------------

    /// Build the flat list of visible rows
    pub fn flat_rows(&self) -> Vec<FlatRow> {
        tree::flatten(&self.table.tasks, &self.expanded)
    }

    pub fn cursor_row(&self) -> Option<FlatRow> {
        self.flat_rows().into_iter().nth(self.cursor)
    }

    pub fn cursor_task(&self) -> Option<&Task> {
        let row = self.cursor_row()?;
        tree::resolve_task(&self.table.tasks, &row.path)
    }

    /// Keep cursor and column cursor inside the visible table
    pub fn clamp_cursor(&mut self) {
        let len = self.flat_rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.column_cursor = self
            .column_cursor
            .min(self.table.columns.len().saturating_sub(1));
    }

    /// Place the cursor on the row for `task_id` if it is visible
    pub fn move_cursor_to_task(&mut self, task_id: &str) {
        if let Some(idx) = self.flat_rows().iter().position(|r| r.id == task_id) {
            self.cursor = idx;
        } else {
            self.clamp_cursor();
        }
    }

    /// Move the cell cursor. An active edit on a different cell is committed (blur).
    pub fn select_cell(&mut self, row: usize, column: usize) {
        let len = self.flat_rows().len();
        let row = row.min(len.saturating_sub(1));
        let column = column.min(self.table.columns.len().saturating_sub(1));
        if self.edit.is_some() && (row != self.cursor || column != self.column_cursor) {
            self.commit_edit();
        }
        self.cursor = row;
        self.column_cursor = column;
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let target = (self.cursor as i64 + delta as i64).max(0) as usize;
        self.select_cell(target, self.column_cursor);
    }

    pub fn move_column(&mut self, delta: i32) {
        let target = (self.column_cursor as i64 + delta as i64).max(0) as usize;
        self.select_cell(self.cursor, target);
    }

    // -----------------------------------------------------------------------
    // Expansion
    // -----------------------------------------------------------------------

    /// Flip expansion of one task. Only tasks with children can expand.
    pub fn toggle_expand(&mut self, task_id: &str) {
        let has_children = task_ops::find_task(&self.table.tasks, task_id)
            .is_some_and(Task::has_children);
        if !has_children {
            return;
        }
        let cursor_id = self.cursor_row().map(|r| r.id);
        let now_expanded = self.expanded.toggle(task_id);
        tracing::debug!(task = task_id, expanded = now_expanded, "toggle");
        self.restore_cursor(cursor_id.as_deref(), task_id);
    }

    pub fn set_expanded(&mut self, task_id: &str, expand: bool) {
        if self.expanded.is_expanded(task_id) != expand {
            self.toggle_expand(task_id);
        }
    }

    pub fn toggle_at_cursor(&mut self) {
        if let Some(row) = self.cursor_row() {
            self.toggle_expand(&row.id);
        }
    }

    /// After a collapse hides the cursor task, the collapsed task takes the cursor
    fn restore_cursor(&mut self, cursor_id: Option<&str>, fallback_id: &str) {
        let rows = self.flat_rows();
        let idx = cursor_id
            .and_then(|id| rows.iter().position(|r| r.id == id))
            .or_else(|| rows.iter().position(|r| r.id == fallback_id));
        match idx {
            Some(i) => self.cursor = i,
            None => self.clamp_cursor(),
        }
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Double-activate: put one task field into Edit state.
    /// Another active edit is committed first.
    pub fn begin_edit(&mut self, task_id: &str, column: usize) {
        if self.edit.is_some() {
            self.commit_edit();
        }
        let Some(field) = self.table.columns.get(column).map(|c| c.field.clone()) else {
            return;
        };
        if field.is_read_only() {
            self.set_error(format!("{} is read-only", field));
            return;
        }
        let Some(task) = task_ops::find_task(&self.table.tasks, task_id) else {
            return;
        };
        self.edit = Some(CellEdit::for_cell(task, &field));
        self.move_cursor_to_task(task_id);
        self.column_cursor = column;
        self.mode = Mode::Edit;
    }

    pub fn begin_edit_at_cursor(&mut self) {
        if let Some(row) = self.cursor_row() {
            self.begin_edit(&row.id, self.column_cursor);
        }
    }

    /// Put a column header into Edit state
    pub fn begin_column_rename(&mut self, column: usize) {
        if self.edit.is_some() {
            self.commit_edit();
        }
        let Some(col) = self.table.columns.get(column) else {
            return;
        };
        self.edit = Some(CellEdit::for_column(col));
        self.column_cursor = column;
        self.mode = Mode::Edit;
    }

    /// Edit → Display, writing the draft into its target.
    /// A vanished task is a no-op; text the field cannot hold leaves it unchanged.
    /// An untouched draft writes nothing.
    pub fn commit_edit(&mut self) {
        let Some(edit) = self.edit.take() else {
            return;
        };
        self.mode = Mode::Navigate;
        let dirty = edit.is_dirty();

        match edit.target {
            EditTarget::Cell { .. } if !dirty => {}
            EditTarget::Cell { task_id, field } => {
                match task_ops::set_field(&mut self.table.tasks, &task_id, &field, &edit.buffer) {
                    Ok(true) => {
                        tracing::debug!(task = %task_id, field = %field, "commit");
                    }
                    Ok(false) => {
                        self.set_error(format!("invalid {}: {}", field, edit.buffer));
                    }
                    Err(TaskError::NotFound(id)) => {
                        tracing::debug!(task = %id, "commit on removed task ignored");
                    }
                    Err(e) => self.set_error(e.to_string()),
                }
            }
            EditTarget::ColumnTitle { column_id } => {
                match column_ops::rename_column(&mut self.table.columns, &column_id, &edit.buffer)
                {
                    Ok(()) => {
                        tracing::debug!(column = %column_id, "rename column");
                        self.notify_columns();
                    }
                    Err(e) => self.set_error(e.to_string()),
                }
            }
        }
    }

    /// Edit → Display, discarding the draft
    pub fn cancel_edit(&mut self) {
        if self.edit.take().is_some() {
            self.mode = Mode::Navigate;
        }
    }

    pub fn cycle_status_at_cursor(&mut self) {
        let Some(row) = self.cursor_row() else {
            return;
        };
        match task_ops::cycle_status(&mut self.table.tasks, &row.id) {
            Ok(status) => tracing::debug!(task = %row.id, status = %status, "cycle status"),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Column/order model
    // -----------------------------------------------------------------------

    pub fn add_task(&mut self) {
        if self.edit.is_some() {
            self.commit_edit();
        }
        let id = task_ops::add_task(&mut self.table.tasks);
        tracing::info!(task = %id, "add task");
        self.move_cursor_to_task(&id);
        self.set_status(format!("added {}", id));
    }

    pub fn add_subtask_at_cursor(&mut self) {
        if self.edit.is_some() {
            self.commit_edit();
        }
        let Some(row) = self.cursor_row() else {
            return;
        };
        match task_ops::add_subtask(&mut self.table.tasks, &mut self.expanded, &row.id) {
            Ok(id) => {
                tracing::info!(parent = %row.id, task = %id, "add sub-task");
                self.move_cursor_to_task(&id);
                self.set_status(format!("added {}", id));
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn add_column(&mut self) {
        if self.edit.is_some() {
            self.commit_edit();
        }
        let id = column_ops::add_column(&mut self.table.columns).id.clone();
        tracing::info!(column = %id, "add column");
        self.column_cursor = self.table.columns.len() - 1;
        self.notify_columns();
        self.set_status(format!("added column {}", id));
    }

    /// Reorder top-level tasks; the cursor follows the moved task
    pub fn reorder(&mut self, from: usize, to: usize) {
        match task_ops::reorder_top_level(&mut self.table.tasks, from, to) {
            Ok(final_idx) => {
                tracing::debug!(from, to = final_idx, "reorder");
                if let Some(id) = self.table.tasks.get(final_idx).map(|t| t.id.clone()) {
                    self.move_cursor_to_task(&id);
                }
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Move mode (keyboard drag)
    // -----------------------------------------------------------------------

    /// Only top-level rows can be moved
    pub fn enter_move_mode(&mut self) {
        let Some(row) = self.cursor_row() else {
            return;
        };
        if row.depth != 0 {
            self.set_error("only top-level tasks can be reordered");
            return;
        }
        if self.edit.is_some() {
            self.commit_edit();
        }
        self.move_state = Some(MoveState {
            task_id: row.id,
            original_index: row.path[0],
        });
        self.mode = Mode::Move;
    }

    pub fn move_step(&mut self, delta: i32) {
        let Some(ms) = &self.move_state else {
            return;
        };
        let Some(from) = task_ops::top_level_index(&self.table.tasks, &ms.task_id) else {
            return;
        };
        let last = self.table.tasks.len().saturating_sub(1) as i64;
        let to = (from as i64 + delta as i64).clamp(0, last) as usize;
        if to != from {
            self.reorder(from, to);
        }
    }

    pub fn move_to_boundary(&mut self, to_top: bool) {
        let Some(ms) = &self.move_state else {
            return;
        };
        let Some(from) = task_ops::top_level_index(&self.table.tasks, &ms.task_id) else {
            return;
        };
        let to = if to_top { 0 } else { self.table.tasks.len() };
        self.reorder(from, to);
    }

    pub fn confirm_move(&mut self) {
        self.move_state = None;
        self.mode = Mode::Navigate;
    }

    pub fn cancel_move(&mut self) {
        if let Some(ms) = self.move_state.take()
            && let Some(from) = task_ops::top_level_index(&self.table.tasks, &ms.task_id)
        {
            self.reorder(from, ms.original_index);
        }
        self.mode = Mode::Navigate;
    }
}

/// Run the TUI application until the user quits
pub fn run(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    tracing::info!(tasks = app.table.task_count(), "tui started");
    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    tracing::info!("tui stopped");

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
