//! UI rendering

use super::app::{App, FillMenu, Mode};
use gridfill_core::{CellRef, column_label, row_label};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
};

pub(crate) const FORMULA_BAR_HEIGHT: u16 = 3;
pub(crate) const GRID_MIN_HEIGHT: u16 = 10;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 4;
pub(crate) const GRID_COLUMN_SPACING: u16 = 1;

/// Marker drawn in the last column of the selection's bottom-right cell.
const FILL_HANDLE: char = '+';

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORMULA_BAR_HEIGHT),
            Constraint::Min(GRID_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// A mouse position resolved to a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GridHit {
    pub cell: CellRef,
    /// The pointer is on the cell's last character column.
    pub right_edge: bool,
}

pub(crate) fn grid_cell_at(app: &App, grid_area: Rect, mouse_col: u16, mouse_row: u16) -> Option<GridHit> {
    if grid_area.width < 3 || grid_area.height < 4 {
        return None;
    }

    let inner_x = grid_area.x.saturating_add(1);
    let inner_y = grid_area.y.saturating_add(1);
    let inner_width = grid_area.width.saturating_sub(2);
    let inner_height = grid_area.height.saturating_sub(2);
    let inner_right = inner_x.saturating_add(inner_width);
    let inner_bottom = inner_y.saturating_add(inner_height);

    if mouse_col < inner_x
        || mouse_col >= inner_right
        || mouse_row < inner_y
        || mouse_row >= inner_bottom
    {
        return None;
    }

    // Header row contains column letters, not data cells.
    if inner_height <= 1 || mouse_row == inner_y {
        return None;
    }

    let rel_row = mouse_row.saturating_sub(inner_y.saturating_add(1)) as usize;
    if rel_row >= app.visible_rows {
        return None;
    }
    let row = app.viewport_row.saturating_add(rel_row);
    if row >= app.sheet.rows() {
        return None;
    }

    let row_header_end = inner_x.saturating_add(ROW_HEADER_WIDTH);
    if mouse_col < row_header_end.saturating_add(GRID_COLUMN_SPACING) {
        return None;
    }
    let mut x = row_header_end.saturating_add(GRID_COLUMN_SPACING);
    let width = app.col_width as u16;

    for offset in 0..app.visible_cols {
        let col = app.viewport_col + offset;
        if col >= app.sheet.cols() || x >= inner_right {
            break;
        }

        let cell_end = x.saturating_add(width);
        if mouse_col >= x && mouse_col < cell_end {
            return Some(GridHit {
                cell: CellRef::new(col, row),
                right_edge: mouse_col == cell_end - 1,
            });
        }
        x = cell_end.saturating_add(GRID_COLUMN_SPACING);
        if mouse_col < x {
            return None;
        }
    }

    None
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = split_main_chunks(f.area());

    // Update visible dimensions based on actual size
    let grid_area = chunks[1];
    let available_width = grid_area.width.saturating_sub(ROW_HEADER_WIDTH + 2) as usize;
    let available_height = grid_area.height.saturating_sub(3) as usize; // header + borders

    app.visible_cols = (available_width / (app.col_width + 1)).max(1);
    app.visible_rows = available_height.max(1);
    app.update_viewport();

    draw_formula_bar(f, app, chunks[0]);
    draw_grid(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);

    if let Some(menu) = &app.fill_menu {
        draw_fill_menu(f, menu);
    }
}

fn draw_formula_bar(f: &mut Frame, app: &App, area: Rect) {
    let cell_ref = app.current_cell_ref();

    let content = match app.mode {
        Mode::Edit => {
            let (before, after) = app.edit_buffer.split_at(app.edit_cursor);
            format!("{}: {}│{}", cell_ref, before, after)
        }
        Mode::Normal | Mode::FillMenu => {
            let text = app.sheet.get(cell_ref.row, cell_ref.col).unwrap_or_default();
            let range = app.selection_bounds();
            if range.is_single_cell() {
                format!("{}: {}", cell_ref, text)
            } else {
                format!("{} ({}): {}", cell_ref, range, text)
            }
        }
    };

    let (title, color) = match app.mode {
        Mode::Edit => (" Edit ", Color::Yellow),
        Mode::FillMenu => (" Fill ", Color::Magenta),
        Mode::Normal => (" Cell ", Color::White),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color));

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn header_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let last_col = (app.viewport_col + app.visible_cols).min(app.sheet.cols());
    let last_row = (app.viewport_row + app.visible_rows).min(app.sheet.rows());
    let bounds = app.selection_bounds();
    let handle = bounds.bottom_right();

    let mut header_cells = vec![Cell::from(" ")]; // Corner
    for col in app.viewport_col..last_col {
        header_cells.push(Cell::from(column_label(col)).style(header_style(col == app.cursor_col)));
    }
    let header = Row::new(header_cells).height(1);

    let mut rows = Vec::new();
    for row in app.viewport_row..last_row {
        let mut cells = vec![Cell::from(row_label(row)).style(header_style(row == app.cursor_row))];

        for col in app.viewport_col..last_col {
            let cell_ref = CellRef::new(col, row);
            let mut display = app.cell_display(&cell_ref);
            if cell_ref == handle && app.mode == Mode::Normal {
                display = with_handle(&display, app.col_width);
            }

            let style = if cell_ref == app.current_cell_ref() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if app.is_selected(&cell_ref) {
                Style::default().fg(Color::White).bg(Color::Blue)
            } else if app.in_drag_preview(&cell_ref) {
                Style::default().fg(Color::Black).bg(Color::Gray)
            } else if app.sheet.is_previewed(&cell_ref) {
                Style::default().fg(Color::Black).bg(Color::LightYellow)
            } else if app.sheet.merged_region_at(&cell_ref).is_some() {
                Style::default().add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default()
            };

            cells.push(Cell::from(display).style(style));
        }

        rows.push(Row::new(cells));
    }

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)];
    widths.extend((app.viewport_col..last_col).map(|_| Constraint::Length(app.col_width as u16)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Gridfill "))
        .column_spacing(GRID_COLUMN_SPACING);

    f.render_widget(table, area);
}

/// Pad or cut `text` to the column width and put the handle in the last slot.
fn with_handle(text: &str, width: usize) -> String {
    let body: String = text.chars().take(width.saturating_sub(1)).collect();
    let pad = width.saturating_sub(1).saturating_sub(body.chars().count());
    format!("{}{}{}", body, " ".repeat(pad), FILL_HANDLE)
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mode = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Edit => "EDIT",
        Mode::FillMenu => "FILL",
    };
    let text = format!(
        " {} | {}x{} | {}",
        mode,
        app.sheet.rows(),
        app.sheet.cols(),
        app.status_message
    );
    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Gray)
    };
    f.render_widget(Paragraph::new(Line::from(text)).style(style), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_fill_menu(f: &mut Frame, menu: &FillMenu) {
    let area = centered_rect(24, menu.modes.len() as u16 + 2, f.area());
    let items: Vec<ListItem> = menu.modes.iter().map(|m| ListItem::new(m.label())).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Autofill ")
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Magenta));
    let mut state = ListState::default();
    state.select(Some(menu.selected));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}
