//! Seam to an external spreadsheet store.
//!
//! Backends exchange plain `(sheet, cell, value)` tuples; nothing about merges,
//! previews or drags crosses this boundary.

use crate::error::{GridError, Result};
use crate::sheet::Sheet;
use gridfill_engine::engine::CellRef;
use std::collections::{BTreeMap, HashMap};

pub trait SpreadsheetBackend {
    /// Names of the sheets the backend holds.
    fn sheet_names(&self) -> Vec<String>;

    /// All non-empty cells of `sheet`, in no particular order.
    fn read_cells(&self, sheet: &str) -> Result<Vec<(CellRef, String)>>;

    /// Store one value. Empty text clears the cell.
    fn write_cell(&mut self, sheet: &str, cell: CellRef, value: &str) -> Result<()>;
}

/// In-process backend, mostly useful for tests and command mode.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    sheets: BTreeMap<String, HashMap<CellRef, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty sheet. Returns false if the name is taken.
    pub fn add_sheet(&mut self, name: &str) -> bool {
        if self.sheets.contains_key(name) {
            return false;
        }
        self.sheets.insert(name.to_string(), HashMap::new());
        true
    }

    fn unknown(sheet: &str) -> GridError {
        GridError::Backend(format!("no sheet named '{}'", sheet))
    }
}

impl SpreadsheetBackend for MemoryBackend {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn read_cells(&self, sheet: &str) -> Result<Vec<(CellRef, String)>> {
        let cells = self.sheets.get(sheet).ok_or_else(|| Self::unknown(sheet))?;
        Ok(cells.iter().map(|(c, v)| (*c, v.clone())).collect())
    }

    fn write_cell(&mut self, sheet: &str, cell: CellRef, value: &str) -> Result<()> {
        let cells = self.sheets.get_mut(sheet).ok_or_else(|| Self::unknown(sheet))?;
        if value.is_empty() {
            cells.remove(&cell);
        } else {
            cells.insert(cell, value.to_string());
        }
        Ok(())
    }
}

impl Sheet {
    /// Build a sheet from a backend's cells. The extent grows to cover them.
    pub fn load_from<B: SpreadsheetBackend + ?Sized>(backend: &B, sheet: &str) -> Result<Sheet> {
        let mut loaded = Sheet::new();
        let cells = backend.read_cells(sheet)?;
        log::info!("loading {} cells from sheet '{}'", cells.len(), sheet);
        for (cell_ref, value) in cells {
            loaded.set(cell_ref.row, cell_ref.col, &value)?;
        }
        loaded.modified = false;
        Ok(loaded)
    }

    /// Write every non-empty cell to the backend. Returns how many were sent.
    pub fn push_to<B: SpreadsheetBackend + ?Sized>(&self, backend: &mut B, sheet: &str) -> Result<usize> {
        let cells = self.non_empty_cells();
        for (cell_ref, value) in &cells {
            backend.write_cell(sheet, *cell_ref, value)?;
        }
        log::info!("pushed {} cells to sheet '{}'", cells.len(), sheet);
        Ok(cells.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_and_push_round_trip() {
        let mut backend = MemoryBackend::new();
        backend.add_sheet("Sheet1");
        backend.add_sheet("Copy");
        backend.write_cell("Sheet1", CellRef::new(0, 0), "1").unwrap();
        backend.write_cell("Sheet1", CellRef::new(40, 2), "far").unwrap();

        let sheet = Sheet::load_from(&backend, "Sheet1").unwrap();
        assert_eq!(sheet.get(2, 40).unwrap(), "far");
        assert_eq!(sheet.cols(), 41);
        assert!(!sheet.modified);

        assert_eq!(sheet.push_to(&mut backend, "Copy").unwrap(), 2);
        let mut copied = backend.read_cells("Copy").unwrap();
        copied.sort_by_key(|(c, _)| (c.row, c.col));
        assert_eq!(
            copied,
            vec![
                (CellRef::new(0, 0), "1".to_string()),
                (CellRef::new(40, 2), "far".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_sheet_is_an_error() {
        let mut backend = MemoryBackend::new();
        assert!(matches!(
            Sheet::load_from(&backend, "Nope"),
            Err(GridError::Backend(_))
        ));
        assert!(backend.write_cell("Nope", CellRef::new(0, 0), "x").is_err());
    }

    #[test]
    fn test_sheet_names_are_sorted() {
        let mut backend = MemoryBackend::new();
        assert!(backend.add_sheet("b"));
        assert!(backend.add_sheet("a"));
        assert!(!backend.add_sheet("a"));
        assert_eq!(backend.sheet_names(), vec!["a", "b"]);
    }
}
