pub mod help_overlay;
mod helpers;
pub mod status_row;
pub mod table_view;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

pub use table_view::render_plain;

/// Main render function: table, then status row, then overlays
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: table (header + rows) | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    table_view::render_table_view(frame, app, chunks[0]);
    status_row::render_status_row(frame, app, chunks[1]);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use crate::tui::app::Mode;

    #[test]
    fn renders_header_rows_and_hints() {
        let mut app = app_with_demo();
        let out = render_app(&mut app, TERM_W, TERM_H);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("ITEM"));
        assert!(lines[1].starts_with("\u{258E}\u{25B6} Blog"));
        assert!(out.contains("? help"));
    }

    #[test]
    fn render_records_layout() {
        let mut app = app_with_demo();
        app.toggle_expand("1");
        render_app(&mut app, TERM_W, TERM_H);
        assert_eq!(app.layout.header.y, 0);
        assert_eq!(app.layout.body.y, 1);
        assert_eq!(app.layout.body.height, TERM_H - 2);
        assert_eq!(app.layout.row_count, 4);
        assert_eq!(app.layout.columns.len(), 6);
        assert_eq!(app.layout.columns[0].0, 1);
        assert_eq!(app.layout.row_at(2), Some(1));
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut app = app_with_demo();
        app.expanded = ["1", "1-1", "1-3"].into_iter().collect();
        app.cursor = 8;
        // 5 lines: header, 3 rows, status
        render_app(&mut app, TERM_W, 5);
        assert_eq!(app.scroll_offset, 6);
        app.cursor = 0;
        render_app(&mut app, TERM_W, 5);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn edit_draft_is_drawn_with_mode_badge() {
        let mut app = app_with_demo();
        app.begin_edit("1", 0);
        app.edit.as_mut().unwrap().insert_str(" draft");
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert_eq!(app.mode, Mode::Edit);
        assert!(out.contains("Blog draft"));
        assert!(out.lines().last().unwrap().contains("EDIT"));
        assert!(out.contains("esc discard"));
    }

    #[test]
    fn status_message_and_hidden_hints() {
        let mut app = app_with_demo();
        app.show_key_hints = false;
        app.set_error("invalid status: later");
        let out = render_app(&mut app, TERM_W, TERM_H);
        let last = out.lines().last().unwrap();
        assert!(last.contains("invalid status: later"));
        assert!(!out.contains("? help"));
    }

    #[test]
    fn help_overlay_lists_bindings() {
        let mut app = app_with_demo();
        app.show_help = true;
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Key Bindings"));
        assert!(out.contains("Add sub-task"));
    }

    #[test]
    fn empty_table_shows_placeholder() {
        let mut app = app_with_tasks(vec![]);
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("No tasks"));
    }
}
