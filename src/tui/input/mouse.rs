use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::{App, DragState, LastClick, Mode};

pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.show_help {
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            app.show_help = false;
        }
        return;
    }
    if app.mode == Mode::Move {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => left_down(app, mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => drag(app, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => left_up(app, mouse.row),
        MouseEventKind::ScrollDown => app.move_cursor(1),
        MouseEventKind::ScrollUp => app.move_cursor(-1),
        _ => {}
    }
}

fn left_down(app: &mut App, x: u16, y: u16) {
    app.status_message = None;

    if app.layout.is_header(y) {
        header_click(app, x);
        return;
    }

    let Some(row_idx) = app.layout.row_at(y) else {
        // Click on empty space blurs
        app.commit_edit();
        app.last_click = None;
        return;
    };
    let Some(row) = app.flat_rows().into_iter().nth(row_idx) else {
        return;
    };

    if row.has_children && app.layout.affordance_x(row.depth) == Some(x) {
        app.commit_edit();
        app.toggle_expand(&row.id);
        app.last_click = None;
        return;
    }

    let Some(column) = app.layout.column_at(x) else {
        app.select_cell(row_idx, app.column_cursor);
        app.last_click = None;
        return;
    };

    // Clicks inside the cell being edited stay in the editor
    if let Some(field) = app.table.columns.get(column).map(|c| &c.field)
        && app.edit.as_ref().is_some_and(|e| e.is_cell(&row.id, field))
    {
        return;
    }

    let window = app.double_click_window;
    if app
        .last_click
        .is_some_and(|c| c.is_double(Some(row_idx), column, window))
    {
        app.last_click = None;
        app.begin_edit(&row.id, column);
        return;
    }

    app.select_cell(row_idx, column);
    app.last_click = Some(LastClick {
        at: Instant::now(),
        row: Some(row_idx),
        column,
    });

    if row.depth == 0 {
        let from_index = row.top_level_index();
        app.drag = Some(DragState {
            task_id: row.id,
            from_index,
            hover_index: None,
        });
    }
}

fn header_click(app: &mut App, x: u16) {
    let Some(column) = app.layout.column_at(x) else {
        return;
    };
    if app.edit.as_ref().is_some_and(|e| {
        app.table
            .columns
            .get(column)
            .is_some_and(|c| e.is_column(&c.id))
    }) {
        return;
    }

    let window = app.double_click_window;
    if app
        .last_click
        .is_some_and(|c| c.is_double(None, column, window))
    {
        app.last_click = None;
        app.begin_column_rename(column);
        return;
    }

    app.commit_edit();
    app.column_cursor = column;
    app.last_click = Some(LastClick {
        at: Instant::now(),
        row: None,
        column,
    });
}

fn drag(app: &mut App, y: u16) {
    let hover = app
        .layout
        .row_at(y)
        .and_then(|idx| app.flat_rows().into_iter().nth(idx))
        .map(|row| row.top_level_index());
    if let Some(drag) = app.drag.as_mut() {
        drag.hover_index = hover;
    }
}

/// Releasing over a row drops the dragged task at that row's top-level position
fn left_up(app: &mut App, y: u16) {
    let Some(drag) = app.drag.take() else {
        return;
    };
    let Some(target) = app
        .layout
        .row_at(y)
        .and_then(|idx| app.flat_rows().into_iter().nth(idx))
        .map(|row| row.top_level_index())
    else {
        return;
    };
    let Some(from) = crate::ops::task_ops::top_level_index(&app.table.tasks, &drag.task_id) else {
        return;
    };
    if from != target {
        tracing::debug!(task = %drag.task_id, from, to = target, "drop");
        app.reorder(from, target);
        app.last_click = None;
    }
}
