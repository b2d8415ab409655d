//! Application state for the terminal UI.

use crate::config::Settings;
use gridfill_core::{CellRef, FillMode, FillRegion, Move, Selection, SelectionSet, Sheet};

/// Input mode of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Navigate and select.
    Normal,
    /// Edit the contents of the current cell.
    Edit,
    /// Choose how a finished drag should fill.
    FillMenu,
}

/// Pending choice between the fill modes offered for a drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillMenu {
    pub modes: &'static [FillMode],
    pub selected: usize,
}

impl FillMenu {
    pub fn current(&self) -> FillMode {
        self.modes.get(self.selected).copied().unwrap_or_default()
    }

    pub fn step(&mut self, delta: isize) {
        let len = self.modes.len().max(1) as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }
}

/// Main application state container.
///
/// Owns the [`Sheet`] and everything the UI layers on top of it: cursor,
/// viewport, multi-cell selection, edit buffer and the fill-handle drag.
pub struct App {
    pub sheet: Sheet,
    /// Current cursor position (column)
    pub cursor_col: usize,
    /// Current cursor position (row)
    pub cursor_row: usize,
    /// Viewport offset (column)
    pub viewport_col: usize,
    /// Viewport offset (row)
    pub viewport_row: usize,
    /// Number of visible columns
    pub visible_cols: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    pub mode: Mode,
    /// Edit buffer for cell editing
    pub edit_buffer: String,
    /// Cursor position within edit buffer (byte offset)
    pub edit_cursor: usize,
    /// Status message to display
    pub status_message: String,
    /// Column width for display
    pub col_width: usize,
    pub selection: SelectionSet,
    /// Region the fill handle would write if released now.
    pub drag_preview: Option<FillRegion>,
    pub fill_menu: Option<FillMenu>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let mut selection = SelectionSet::new();
        selection.start(CellRef::new(0, 0));
        App {
            sheet: Sheet::with_size(settings.initial_rows, settings.initial_cols),
            cursor_col: 0,
            cursor_row: 0,
            viewport_col: 0,
            viewport_row: 0,
            visible_cols: 8,
            visible_rows: 20,
            mode: Mode::Normal,
            edit_buffer: String::new(),
            edit_cursor: 0,
            status_message: String::new(),
            col_width: settings.column_width,
            selection,
            drag_preview: None,
            fill_menu: None,
        }
    }

    pub fn current_cell_ref(&self) -> CellRef {
        CellRef::new(self.cursor_col, self.cursor_row)
    }

    /// Rectangle the next merge, clear or drag acts on.
    pub fn selection_bounds(&self) -> Selection {
        self.selection
            .bounds()
            .unwrap_or_else(|| Selection::single(self.current_cell_ref()))
    }

    /// Move one cell, growing the sheet at its edges. With `extend` the
    /// selection stretches from its anchor instead of restarting.
    pub fn move_cursor(&mut self, dir: Move, extend: bool) {
        let target = match self.sheet.step_cursor(self.current_cell_ref(), dir) {
            Ok(cell) => cell,
            Err(e) => {
                self.status_message = format!("Error: {}", e);
                return;
            }
        };
        self.cursor_col = target.col;
        self.cursor_row = target.row;
        if extend {
            self.selection.extend_to(target);
        } else {
            self.selection.start(target);
        }
        self.update_viewport();
    }

    /// Update viewport to keep cursor visible
    pub fn update_viewport(&mut self) {
        if self.cursor_col < self.viewport_col {
            self.viewport_col = self.cursor_col;
        } else if self.cursor_col >= self.viewport_col + self.visible_cols {
            self.viewport_col = self.cursor_col - self.visible_cols + 1;
        }

        if self.cursor_row < self.viewport_row {
            self.viewport_row = self.cursor_row;
        } else if self.cursor_row >= self.viewport_row + self.visible_rows {
            self.viewport_row = self.cursor_row - self.visible_rows + 1;
        }
    }

    /// Mouse press on a cell. Ctrl toggles it in the selection.
    pub fn click_cell(&mut self, cell: CellRef, toggle: bool) {
        self.sheet.on_selection_click(cell);
        if toggle {
            self.selection.toggle(cell);
        } else {
            self.selection.start(cell);
        }
        self.cursor_col = cell.col;
        self.cursor_row = cell.row;
        self.update_viewport();
    }

    /// Mouse drag over cells while not on the fill handle.
    pub fn extend_selection_to(&mut self, cell: CellRef) {
        self.selection.extend_to(cell);
        self.cursor_col = cell.col;
        self.cursor_row = cell.row;
        self.update_viewport();
    }

    /// Enter edit mode, either with the cell's text or with a typed character.
    pub fn enter_edit_mode(&mut self, initial: Option<char>) {
        self.edit_buffer = match initial {
            Some(c) => c.to_string(),
            None => {
                let cell = self.current_cell_ref();
                self.sheet.get(cell.row, cell.col).unwrap_or_default()
            }
        };
        self.edit_cursor = self.edit_buffer.len();
        self.mode = Mode::Edit;
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Normal;
        self.edit_buffer.clear();
        self.edit_cursor = 0;
    }

    /// Write the edit buffer and run the formula hook on it.
    pub fn commit_edit(&mut self) {
        let cell = self.current_cell_ref();
        let text = std::mem::take(&mut self.edit_buffer);
        self.status_message = match self.sheet.commit_input(cell.row, cell.col, &text) {
            Ok(Some(value)) => format!("{} = {}", cell, value),
            Ok(None) => String::new(),
            Err(e) => format!("Error: {}", e),
        };
        self.mode = Mode::Normal;
        self.edit_cursor = 0;
    }

    /// Empty every selected cell.
    pub fn clear_selected(&mut self) {
        let cells: Vec<CellRef> = self.selection.cells().copied().collect();
        for cell in cells {
            self.sheet.clear(&Selection::single(cell));
        }
        self.status_message.clear();
    }

    pub fn merge_selection(&mut self) {
        let bounds = self.selection_bounds();
        self.status_message = match self.sheet.merge(&bounds) {
            Ok(true) => format!("Merged {}", bounds),
            Ok(false) => "Select more than one cell to merge".to_string(),
            Err(e) => format!("Error: {}", e),
        };
    }

    pub fn unmerge_at_cursor(&mut self) {
        let cell = self.current_cell_ref();
        self.status_message = if self.sheet.unmerge(&cell) {
            format!("Unmerged {}", cell)
        } else {
            format!("{} is not merged", cell)
        };
    }

    /// Press on the fill handle: start a drag from the selection.
    pub fn begin_fill_drag(&mut self) {
        let bounds = self.selection_bounds();
        match self.sheet.begin_autofill_drag(bounds, bounds.top_left()) {
            Ok(()) => self.drag_preview = None,
            Err(e) => self.status_message = format!("Error: {}", e),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.sheet.autofill_drag().is_some() && self.fill_menu.is_none()
    }

    pub fn drag_fill_to(&mut self, cell: CellRef) {
        match self.sheet.update_autofill_drag(cell) {
            Ok(region) => self.drag_preview = region,
            Err(e) => {
                self.drag_preview = None;
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Release of the fill handle. Numeric sources get a mode menu first.
    pub fn release_fill_drag(&mut self) {
        if self.drag_preview.is_none() {
            self.sheet.cancel_autofill_drag();
            return;
        }
        let modes = self.sheet.offered_fill_modes();
        if modes.len() > 1 {
            self.fill_menu = Some(FillMenu { modes, selected: 0 });
            self.mode = Mode::FillMenu;
        } else {
            self.finish_fill(FillMode::Copy);
        }
    }

    pub fn finish_fill(&mut self, mode: FillMode) {
        self.fill_menu = None;
        self.drag_preview = None;
        self.mode = Mode::Normal;
        self.status_message = match self.sheet.end_autofill_drag(mode) {
            Ok(outcome) => {
                let mut msg = format!("{}: filled {} cells", outcome.mode.label(), outcome.filled.len());
                if outcome.clipped {
                    msg.push_str(" (limit reached)");
                }
                msg
            }
            Err(e) => format!("Error: {}", e),
        };
    }

    pub fn cancel_fill(&mut self) {
        self.sheet.cancel_autofill_drag();
        self.fill_menu = None;
        self.drag_preview = None;
        self.mode = Mode::Normal;
    }

    /// Text shown for a cell: merged cells other than the anchor stay blank.
    pub fn cell_display(&self, cell: &CellRef) -> String {
        if let Some(span) = self.sheet.merged_region_at(cell)
            && span.top_left() != *cell
        {
            return String::new();
        }
        self.sheet.get(cell.row, cell.col).unwrap_or_default()
    }

    pub fn is_selected(&self, cell: &CellRef) -> bool {
        self.selection.contains(cell)
    }

    pub fn in_drag_preview(&self, cell: &CellRef) -> bool {
        self.drag_preview
            .as_ref()
            .is_some_and(|region| region.bounds().contains(cell))
    }
}
