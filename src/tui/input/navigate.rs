use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    // Any key dismisses the last status message
    app.status_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.should_quit = true;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Cursor
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => app.move_column(-1),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => app.move_column(1),
        KeyCode::Char('g') | KeyCode::Home => app.select_cell(0, app.column_cursor),
        KeyCode::Char('G') | KeyCode::End => app.select_cell(usize::MAX, app.column_cursor),
        KeyCode::PageDown => app.move_cursor(page_size(app)),
        KeyCode::PageUp => app.move_cursor(-page_size(app)),

        // Expansion
        KeyCode::Char(' ') => app.toggle_at_cursor(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if let Some(row) = app.cursor_row() {
                app.set_expanded(&row.id, true);
            }
        }
        KeyCode::Char('-') => {
            if let Some(row) = app.cursor_row() {
                app.set_expanded(&row.id, false);
            }
        }

        // Cells
        KeyCode::Enter | KeyCode::Char('e') => app.begin_edit_at_cursor(),
        KeyCode::Char('s') => app.cycle_status_at_cursor(),

        // Column/order model
        KeyCode::Char('a') => app.add_task(),
        KeyCode::Char('A') => app.add_subtask_at_cursor(),
        KeyCode::Char('C') => app.add_column(),
        KeyCode::Char('R') => app.begin_column_rename(app.column_cursor),
        KeyCode::Char('m') => app.enter_move_mode(),
        _ => {}
    }
}

fn page_size(app: &App) -> i32 {
    i32::from(app.layout.body.height.max(1))
}
