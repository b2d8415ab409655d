use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gridfill_core::{FillMode, Move};

use super::app::{App, Mode};

/// Something a key press asks the application to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Move(Move),
    Extend(Move),
    CollapseSelection,
    EnterEdit,
    TypeChar(char),
    CommitEdit,
    CancelEdit,
    ClearSelection,
    Merge,
    Unmerge,
    MenuStep(isize),
    MenuChoose,
    ChooseFill(FillMode),
    CancelFill,
}

/// Map a key to an action for the current mode. Unmapped keys in edit mode
/// are handled as text.
pub fn translate(mode: Mode, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        Mode::Normal => {
            let dir = match key.code {
                KeyCode::Up => Some(Move::Up),
                KeyCode::Down => Some(Move::Down),
                KeyCode::Left => Some(Move::Left),
                KeyCode::Right => Some(Move::Right),
                _ => None,
            };
            if let Some(dir) = dir {
                return Some(if shift { Action::Extend(dir) } else { Action::Move(dir) });
            }
            match key.code {
                KeyCode::Char('q') if !ctrl => Some(Action::Quit),
                KeyCode::Char('m') if !ctrl => Some(Action::Merge),
                KeyCode::Char('u') if !ctrl => Some(Action::Unmerge),
                KeyCode::Char(c) if !ctrl => Some(Action::TypeChar(c)),
                KeyCode::Enter | KeyCode::F(2) => Some(Action::EnterEdit),
                KeyCode::Delete | KeyCode::Backspace => Some(Action::ClearSelection),
                KeyCode::Esc => Some(Action::CollapseSelection),
                _ => None,
            }
        }
        Mode::Edit => match key.code {
            KeyCode::Enter => Some(Action::CommitEdit),
            KeyCode::Esc => Some(Action::CancelEdit),
            _ => None,
        },
        Mode::FillMenu => match key.code {
            KeyCode::Up => Some(Action::MenuStep(-1)),
            KeyCode::Down | KeyCode::Tab => Some(Action::MenuStep(1)),
            KeyCode::Enter => Some(Action::MenuChoose),
            KeyCode::Char('c') => Some(Action::ChooseFill(FillMode::Copy)),
            KeyCode::Char('s') => Some(Action::ChooseFill(FillMode::Series)),
            KeyCode::Esc => Some(Action::CancelFill),
            _ => None,
        },
    }
}

/// Result of applying an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyResult {
    Continue,
    Quit,
}

pub fn apply_action(app: &mut App, action: Action) -> ApplyResult {
    match action {
        Action::Quit => return ApplyResult::Quit,
        Action::Move(dir) => app.move_cursor(dir, false),
        Action::Extend(dir) => app.move_cursor(dir, true),
        Action::CollapseSelection => {
            let cell = app.current_cell_ref();
            app.selection.start(cell);
        }
        Action::EnterEdit => app.enter_edit_mode(None),
        Action::TypeChar(c) => app.enter_edit_mode(Some(c)),
        Action::CommitEdit => app.commit_edit(),
        Action::CancelEdit => app.cancel_edit(),
        Action::ClearSelection => app.clear_selected(),
        Action::Merge => app.merge_selection(),
        Action::Unmerge => app.unmerge_at_cursor(),
        Action::MenuStep(delta) => {
            if let Some(menu) = app.fill_menu.as_mut() {
                menu.step(delta);
            }
        }
        Action::MenuChoose => {
            let mode = app.fill_menu.as_ref().map(|m| m.current()).unwrap_or_default();
            app.finish_fill(mode);
        }
        Action::ChooseFill(mode) => app.finish_fill(mode),
        Action::CancelFill => app.cancel_fill(),
    }
    ApplyResult::Continue
}

/// Handle text editing operations on a buffer with UTF-8 aware cursor movement.
fn handle_text_input(buffer: &mut String, cursor: &mut usize, key: KeyEvent) {
    match key.code {
        KeyCode::Left => {
            if *cursor > 0 {
                let mut new_pos = *cursor - 1;
                while new_pos > 0 && !buffer.is_char_boundary(new_pos) {
                    new_pos -= 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Right => {
            if *cursor < buffer.len() {
                let mut new_pos = *cursor + 1;
                while new_pos < buffer.len() && !buffer.is_char_boundary(new_pos) {
                    new_pos += 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buffer.len(),
        KeyCode::Backspace => {
            if *cursor > 0 {
                let mut del_start = *cursor - 1;
                while del_start > 0 && !buffer.is_char_boundary(del_start) {
                    del_start -= 1;
                }
                buffer.drain(del_start..*cursor);
                *cursor = del_start;
            }
        }
        KeyCode::Delete => {
            if *cursor < buffer.len() {
                let mut del_end = *cursor + 1;
                while del_end < buffer.len() && !buffer.is_char_boundary(del_end) {
                    del_end += 1;
                }
                buffer.drain(*cursor..del_end);
            }
        }
        KeyCode::Char(c) => {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                buffer.insert(*cursor, c);
                *cursor += c.len_utf8();
            }
        }
        _ => {}
    }
}

pub fn handle_edit_text(app: &mut App, key: KeyEvent) {
    handle_text_input(&mut app.edit_buffer, &mut app.edit_cursor, key);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn shift_arrow_extends() {
        let shifted = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(translate(Mode::Normal, shifted), Some(Action::Extend(Move::Left)));
        assert_eq!(translate(Mode::Normal, key(KeyCode::Left)), Some(Action::Move(Move::Left)));
    }

    #[test]
    fn command_letters_win_over_typing() {
        assert_eq!(translate(Mode::Normal, key(KeyCode::Char('m'))), Some(Action::Merge));
        assert_eq!(translate(Mode::Normal, key(KeyCode::Char('7'))), Some(Action::TypeChar('7')));
        assert_eq!(translate(Mode::Edit, key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [Mode::Normal, Mode::Edit, Mode::FillMenu] {
            assert_eq!(translate(mode, ctrl_c), Some(Action::Quit));
        }
    }

    #[test]
    fn text_input_is_utf8_aware() {
        let mut buffer = String::from("aé");
        let mut cursor = buffer.len();
        handle_text_input(&mut buffer, &mut cursor, key(KeyCode::Left));
        assert_eq!(cursor, 1);
        handle_text_input(&mut buffer, &mut cursor, key(KeyCode::Char('x')));
        assert_eq!(buffer, "axé");
        handle_text_input(&mut buffer, &mut cursor, key(KeyCode::End));
        handle_text_input(&mut buffer, &mut cursor, key(KeyCode::Backspace));
        assert_eq!(buffer, "ax");
    }
}
