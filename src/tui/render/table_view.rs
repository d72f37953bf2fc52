use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_segmentation::UnicodeSegmentation;

use crate::model::{CellValue, Column, ExpansionSet, Field, Task, TaskStatus, TaskTable};
use crate::tui::app::{App, Mode, TableLayout};
use crate::tui::edit::CellEdit;
use crate::tui::theme::Theme;
use crate::tui::tree::{self, FlatRow};
use crate::util::unicode;

use super::helpers::CellSpans;

const CURSOR_BAR: &str = "\u{258E}";
const COLLAPSED: &str = "\u{25B6}";
const EXPANDED: &str = "\u{25BC}";

/// Resolve column widths for a table `total` cells wide.
/// Columns with a width keep it; the rest share what is left, with the
/// tree column taking a double share.
pub fn column_widths(columns: &[Column], tree_column: usize, total: u16) -> Vec<u16> {
    if columns.is_empty() {
        return Vec::new();
    }
    // One cell for the cursor bar, one between each pair of columns
    let gaps = columns.len() as u32 - 1;
    let available = u32::from(total).saturating_sub(1 + gaps);
    let fixed: u32 = columns.iter().filter_map(|c| c.width).map(u32::from).sum();
    let flex_space = available.saturating_sub(fixed);

    let weight = |i: usize| if i == tree_column { 2 } else { 1 };
    let total_weight: u32 = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.width.is_none())
        .map(|(i, _)| weight(i))
        .sum();

    let mut widths: Vec<u32> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| match c.width {
            Some(w) => u32::from(w),
            None if total_weight > 0 => flex_space * weight(i) / total_weight,
            None => 0,
        })
        .collect();

    if total_weight > 0 {
        let used: u32 = columns
            .iter()
            .zip(&widths)
            .filter(|(c, _)| c.width.is_none())
            .map(|(_, w)| *w)
            .sum();
        let leftover = flex_space - used;
        let target = if columns.get(tree_column).is_some_and(|c| c.width.is_none()) {
            Some(tree_column)
        } else {
            columns.iter().rposition(|c| c.width.is_none())
        };
        if let Some(t) = target {
            widths[t] += leftover;
        }
    }

    widths
        .into_iter()
        .map(|w| u16::try_from(w).unwrap_or(u16::MAX))
        .collect()
}

#[derive(Default, Clone, Copy)]
struct RowDecor<'a> {
    is_cursor: bool,
    /// Column holding the cell cursor
    cursor_column: Option<usize>,
    is_drop_target: bool,
    is_moving: bool,
    edit: Option<&'a CellEdit>,
}

/// Render the header and the visible rows, recording geometry for hit testing
pub fn render_table_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let tree_column = app.table.tree_column();
    let widths = column_widths(&app.table.columns, tree_column, area.width);
    let header = Rect {
        height: area.height.min(1),
        ..area
    };
    let body = Rect {
        y: area.y + header.height,
        height: area.height - header.height,
        ..area
    };

    let rows = app.flat_rows();
    app.clamp_cursor();
    let visible_height = body.height as usize;
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if visible_height > 0 && app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }

    let mut column_spans = Vec::with_capacity(widths.len());
    let mut x = area.x.saturating_add(1);
    for (i, &w) in widths.iter().enumerate() {
        if i > 0 {
            x = x.saturating_add(1);
        }
        column_spans.push((x, w));
        x = x.saturating_add(w);
    }
    app.layout = TableLayout {
        header,
        body,
        scroll_offset: app.scroll_offset,
        row_count: rows.len(),
        columns: column_spans,
        tree_column,
    };

    let app = &*app;
    let theme = &app.theme;
    let edit = app.edit.as_ref();
    let bg_style = Style::default().bg(theme.background);
    let mut cursor_pos: Option<Position> = None;

    let (header_text, header_cursor) =
        header_line(theme, &app.table.columns, &widths, Some(app.column_cursor), edit);
    frame.render_widget(Paragraph::new(header_text).style(bg_style), header);
    if let Some(cx) = header_cursor {
        cursor_pos = Some(Position::new(area.x + cx, header.y));
    }

    if rows.is_empty() {
        let empty = Paragraph::new(" No tasks (a to add one)")
            .style(Style::default().fg(theme.dim).bg(theme.background));
        frame.render_widget(empty, body);
        return;
    }

    let drop_index = app
        .drag
        .as_ref()
        .and_then(|d| d.hover_index.filter(|&h| h != d.from_index));
    let moving_id = app.move_state.as_ref().map(|m| m.task_id.as_str());

    let scroll = app.scroll_offset;
    let end = rows.len().min(scroll + visible_height);
    let mut lines: Vec<Line> = Vec::with_capacity(visible_height);
    for (offset, row) in rows[scroll..end].iter().enumerate() {
        let Some(task) = tree::resolve_task(&app.table.tasks, &row.path) else {
            continue;
        };
        let idx = scroll + offset;
        let is_cursor = idx == app.cursor;
        let decor = RowDecor {
            is_cursor,
            cursor_column: (is_cursor && app.mode == Mode::Navigate).then_some(app.column_cursor),
            is_drop_target: row.depth == 0 && drop_index == Some(row.top_level_index()),
            is_moving: moving_id == Some(row.id.as_str()),
            edit,
        };
        let (line, cursor_x) = row_line(theme, &app.table, row, task, &widths, decor);
        if let Some(cx) = cursor_x {
            cursor_pos = Some(Position::new(area.x + cx, body.y + offset as u16));
        }
        lines.push(line);
    }
    frame.render_widget(Paragraph::new(lines).style(bg_style), body);

    if let Some(pos) = cursor_pos
        && pos.x < area.x + area.width
    {
        frame.set_cursor_position(pos);
    }
}

fn header_line(
    theme: &Theme,
    columns: &[Column],
    widths: &[u16],
    cursor_column: Option<usize>,
    edit: Option<&CellEdit>,
) -> (Line<'static>, Option<u16>) {
    let base = Style::default()
        .fg(theme.header)
        .bg(theme.background)
        .add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::styled(" ", base)];
    let mut x = 1usize;
    let mut cursor_x = None;

    for (i, (column, &w)) in columns.iter().zip(widths).enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", base));
            x += 1;
        }
        let w = w as usize;
        let mut cell = CellSpans::new(w);
        match edit.filter(|e| e.is_column(&column.id)) {
            Some(e) => {
                let style = Style::default().fg(theme.text_bright).bg(theme.edit_bg);
                let (text, cx) = edit_window(e, w);
                cell.push(&text, style);
                cursor_x = Some((x + cx) as u16);
                spans.extend(cell.finish(style));
            }
            None => {
                let style = if cursor_column == Some(i) {
                    base.fg(theme.text_bright)
                } else {
                    base
                };
                cell.push(&column.title, style);
                spans.extend(cell.finish(base));
            }
        }
        x += w;
    }
    (Line::from(spans), cursor_x)
}

fn row_line(
    theme: &Theme,
    table: &TaskTable,
    row: &FlatRow,
    task: &Task,
    widths: &[u16],
    decor: RowDecor,
) -> (Line<'static>, Option<u16>) {
    let row_bg = if decor.is_moving || decor.is_drop_target {
        theme.drop_target_bg
    } else if decor.is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().fg(theme.text).bg(row_bg);
    let tree_column = table.tree_column();

    let mut spans = Vec::new();
    if decor.is_cursor {
        spans.push(Span::styled(
            CURSOR_BAR,
            Style::default().fg(theme.selection_border).bg(row_bg),
        ));
    } else {
        spans.push(Span::styled(" ", base));
    }

    let mut x = 1usize;
    let mut cursor_x = None;
    for (i, (column, &w)) in table.columns.iter().zip(widths).enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", base));
            x += 1;
        }
        let w = w as usize;
        let editing = decor.edit.filter(|e| e.is_cell(&task.id, &column.field));
        let cell_style = if editing.is_some() {
            Style::default().fg(theme.text_bright).bg(theme.edit_bg)
        } else if decor.cursor_column == Some(i) {
            base.bg(theme.cell_cursor_bg)
        } else {
            base
        };

        let mut cell = CellSpans::new(w);
        if i == tree_column {
            push_tree_prefix(&mut cell, theme, row, cell_style);
        }
        match editing {
            Some(edit) => {
                let prefix = w - cell.remaining();
                let (text, cx) = edit_window(edit, cell.remaining());
                cell.push(&text, cell_style);
                cursor_x = Some((x + prefix + cx) as u16);
            }
            None => push_value(&mut cell, theme, task, &column.field, i == tree_column, cell_style),
        }
        spans.extend(cell.finish(cell_style));
        x += w;
    }
    (Line::from(spans), cursor_x)
}

/// Indentation, then the expand affordance, then a space
fn push_tree_prefix(cell: &mut CellSpans, theme: &Theme, row: &FlatRow, style: Style) {
    cell.push(&"  ".repeat(row.depth), style);
    let affordance = match (row.has_children, row.is_expanded) {
        (true, true) => EXPANDED,
        (true, false) => COLLAPSED,
        (false, _) => " ",
    };
    cell.push(affordance, style.fg(theme.highlight));
    cell.push(" ", style);
}

fn push_value(
    cell: &mut CellSpans,
    theme: &Theme,
    task: &Task,
    field: &Field,
    is_tree: bool,
    style: Style,
) {
    match field.value(task) {
        CellValue::Text(text) => {
            let text_style = if is_tree && task.status == TaskStatus::Completed {
                style.fg(theme.dim)
            } else {
                style
            };
            cell.push(&text, text_style);
            if is_tree
                && *field == Field::Title
                && let Some(n) = task.sub_count
                && n > 0
            {
                cell.push(&format!("  {} subs", n), style.fg(theme.dim));
            }
        }
        CellValue::Tags(tags) => {
            for (j, tag) in tags.iter().enumerate() {
                if j > 0 {
                    cell.push(" ", style);
                }
                cell.push(
                    &format!(" {} ", tag),
                    Style::default()
                        .fg(theme.badge_fg)
                        .bg(theme.tag_color(tag)),
                );
            }
        }
        CellValue::Status(status) => cell.push(
            &format!(" {} ", status.label()),
            Style::default()
                .fg(theme.badge_fg)
                .bg(theme.status_color(status))
                .add_modifier(Modifier::BOLD),
        ),
        CellValue::Empty => {}
    }
}

/// The slice of the edit buffer that fits `width` cells with the text
/// cursor visible, and the cursor's offset inside that slice
fn edit_window(edit: &CellEdit, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let cursor_col = edit.cursor_col();
    // Keep one cell free for the cursor when it sits at the end
    let skip = (cursor_col + 1).saturating_sub(width);
    let mut skipped = 0;
    let mut used = 0;
    let mut out = String::new();
    for g in edit.buffer.graphemes(true) {
        let gw = unicode::display_width(g);
        if skipped < skip {
            skipped += gw;
            continue;
        }
        if used + gw > width {
            break;
        }
        out.push_str(g);
        used += gw;
    }
    (out, cursor_col.saturating_sub(skipped))
}

/// Plain-text rendering of the table without styles, as `print` shows it
pub fn render_plain(table: &TaskTable, expanded: &ExpansionSet, width: u16) -> String {
    let theme = Theme::default();
    let widths = column_widths(&table.columns, table.tree_column(), width);
    let mut out = vec![line_text(
        &header_line(&theme, &table.columns, &widths, None, None).0,
    )];
    for row in tree::flatten(&table.tasks, expanded) {
        if let Some(task) = tree::resolve_task(&table.tasks, &row.path) {
            let (line, _) = row_line(&theme, table, &row, task, &widths, RowDecor::default());
            out.push(line_text(&line));
        }
    }
    out.join("\n")
}

fn line_text(line: &Line) -> String {
    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    text.trim_end().to_string()
}
