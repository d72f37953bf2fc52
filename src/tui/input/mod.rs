mod edit;
mod mouse;
mod move_mode;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use super::app::{App, Mode};

use edit::handle_edit;
use move_mode::handle_move;
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Move => handle_move(app, key),
    }
}

/// Handle a mouse event against the last rendered layout
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    mouse::handle_mouse(app, mouse);
}

/// Handle a bracketed paste event. Only active in Edit mode.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.mode != Mode::Edit || text.is_empty() {
        return;
    }
    if let Some(edit) = app.edit.as_mut() {
        edit.insert_str(text);
    }
}

/// Shift+letter arrives as either `Char('A')` or `Char('a')` + SHIFT depending on
/// the terminal; fold both into the uppercase char.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}
