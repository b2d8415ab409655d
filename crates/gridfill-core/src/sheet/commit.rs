//! Edit-commit hook: one-shot `=SUM(...)` rewriting.
//!
//! A committed cell whose text is a SUM formula has its text replaced by the
//! result. Nothing is remembered about the references afterwards, so later
//! edits to them leave the computed value alone.

use super::Sheet;
use crate::error::{GridError, Result};
use crate::selection::Selection;
use gridfill_engine::engine::{CellRef, FormulaError, evaluate_sum};

impl Sheet {
    /// Evaluate the cell at (row, col) if it holds a formula.
    ///
    /// Returns the new text when the cell was rewritten, `None` for plain
    /// values, and `UnparseableFormula` (cell untouched) for malformed input.
    pub fn on_cell_committed(&mut self, row: usize, col: usize) -> Result<Option<String>> {
        let text = self.get(row, col)?;
        match evaluate_sum(&text, &*self) {
            Ok(value) => {
                log::debug!("{} {:?} -> {}", CellRef::new(col, row), text, value);
                self.set(row, col, &value)?;
                Ok(Some(value))
            }
            Err(FormulaError::NotAFormula) => Ok(None),
            Err(FormulaError::Unparseable(text)) => {
                log::warn!("leaving unparseable formula {:?} at {}", text, CellRef::new(col, row));
                Err(GridError::UnparseableFormula(text))
            }
        }
    }

    /// Write user input and run the commit hook on it.
    pub fn commit_input(&mut self, row: usize, col: usize, text: &str) -> Result<Option<String>> {
        self.set(row, col, text)?;
        self.on_cell_committed(row, col)
    }

    /// Run the commit hook over every cell of a changed rectangle.
    /// Unparseable formulas are skipped; returns the cells that were rewritten.
    pub fn evaluate_range(&mut self, selection: &Selection) -> Result<Vec<CellRef>> {
        let mut rewritten = Vec::new();
        for cell_ref in selection.cells() {
            match self.on_cell_committed(cell_ref.row, cell_ref.col) {
                Ok(Some(_)) => rewritten.push(cell_ref),
                Ok(None) | Err(GridError::UnparseableFormula(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(rewritten)
    }
}
