use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

/// Keys while a top-level task is being moved. The row moves live;
/// Enter keeps the new position and Esc puts it back.
pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_step(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_step(-1),
        KeyCode::Char('g') | KeyCode::Home => app.move_to_boundary(true),
        KeyCode::Char('G') | KeyCode::End => app.move_to_boundary(false),
        KeyCode::Enter | KeyCode::Char('m') => app.confirm_move(),
        KeyCode::Esc => app.cancel_move(),
        _ => {}
    }
}
