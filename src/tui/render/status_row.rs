use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    let mode_label = match app.mode {
        Mode::Navigate => None,
        Mode::Edit => Some(" EDIT "),
        Mode::Move => Some(" MOVE "),
    };
    if let Some(label) = mode_label {
        spans.push(Span::styled(
            label,
            Style::default()
                .fg(app.theme.badge_fg)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    if let Some(msg) = &app.status_message {
        let fg = if app.status_is_error {
            app.theme.red
        } else {
            app.theme.text_bright
        };
        spans.push(Span::styled(msg.clone(), Style::default().fg(fg).bg(bg)));
    }

    if app.show_key_hints {
        let hint = key_hints(app.mode);
        let content_width = spans_width(&spans);
        let hint_width = hint.chars().count();
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "space toggle  enter edit  a add  A sub  C column  m move  ? help  q quit",
        Mode::Edit => "enter commit  esc discard  tab next",
        Mode::Move => "j/k move  enter done  esc cancel",
    }
}
