use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.commit_edit();
            app.should_quit = true;
        }
        KeyCode::Tab => {
            app.commit_edit();
            app.move_column(1);
        }
        KeyCode::BackTab => {
            app.commit_edit();
            app.move_column(-1);
        }
        _ => {
            let Some(edit) = app.edit.as_mut() else {
                return;
            };
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Char('u') if ctrl => edit.clear(),
                KeyCode::Char('a') if ctrl => edit.move_home(),
                KeyCode::Char('e') if ctrl => edit.move_end(),
                KeyCode::Char(_) if ctrl => {}
                KeyCode::Char(c) => edit.insert_char(c),
                KeyCode::Backspace => edit.backspace(),
                KeyCode::Delete => edit.delete(),
                KeyCode::Left => edit.move_left(),
                KeyCode::Right => edit.move_right(),
                KeyCode::Home => edit.move_home(),
                KeyCode::End => edit.move_end(),
                _ => {}
            }
        }
    }
}
