use crossterm::event::{
    self, Event, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::*;
use std::io;

use super::actions::{ApplyResult, apply_action, handle_edit_text, translate};
use super::app::{App, Mode};
use super::ui;

fn handle_mouse_event(app: &mut App, terminal_area: Rect, mouse: MouseEvent) {
    if mouse.kind == MouseEventKind::Up(MouseButton::Left) {
        if app.is_dragging() {
            app.release_fill_drag();
        }
        return;
    }
    if app.mode != Mode::Normal {
        return;
    }

    let [_formula_area, grid_area, _status_area] = ui::split_main_chunks(terminal_area);
    let Some(hit) = ui::grid_cell_at(app, grid_area, mouse.column, mouse.row) else {
        return;
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let on_handle = hit.right_edge && hit.cell == app.selection_bounds().bottom_right();
            if on_handle {
                app.begin_fill_drag();
            } else {
                app.click_cell(hit.cell, mouse.modifiers.contains(KeyModifiers::CONTROL));
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.is_dragging() {
                app.drag_fill_to(hit.cell);
            } else {
                app.extend_selection_to(hit.cell);
            }
        }
        _ => {}
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) => {
                // Only process key press events (Windows reports Press + Release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(action) = translate(app.mode, key) {
                    if apply_action(app, action) == ApplyResult::Quit {
                        return Ok(());
                    }
                    continue;
                }

                if app.mode == Mode::Edit {
                    handle_edit_text(app, key);
                }
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let terminal_area = Rect::new(0, 0, size.width, size.height);
                handle_mouse_event(app, terminal_area, mouse);
            }
            _ => {}
        }
    }
}
