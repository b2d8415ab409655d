use super::{Dimension, MAX_COLS, MAX_ROWS, Sheet};
use crate::error::{GridError, Result};
use crate::selection::Selection;
use gridfill_engine::engine::{CellRef, CellSource, column_label, row_label};

/// One-cell cursor movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Sheet {
    /// Read a cell. Never-written cells read as empty text.
    pub fn get(&self, row: usize, col: usize) -> Result<String> {
        if row >= MAX_ROWS || col >= MAX_COLS {
            return Err(GridError::OutOfBounds { row, col });
        }
        Ok(self
            .cells
            .get(&CellRef::new(col, row))
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    /// Write a cell, growing the extent to include it.
    ///
    /// Fails with `LimitReached` and leaves the sheet untouched if the
    /// position lies beyond the row or column ceiling.
    pub fn set(&mut self, row: usize, col: usize, text: &str) -> Result<()> {
        let cell_ref = CellRef::new(col, row);
        for dim in [Dimension::Row, Dimension::Column] {
            if dim.get_coord(&cell_ref) >= dim.limit() {
                log::warn!("refusing to write {}: {} limit reached", cell_ref, dim);
                return Err(GridError::LimitReached {
                    dimension: dim,
                    limit: dim.limit(),
                });
            }
        }
        self.ensure(Dimension::Row, row)?;
        self.ensure(Dimension::Column, col)?;

        if text.is_empty() {
            self.cells.remove(&cell_ref);
        } else {
            self.cells.insert(cell_ref, text.to_string());
        }
        self.modified = true;
        Ok(())
    }

    /// Grow to at least `n + 1` rows.
    pub fn ensure_row(&mut self, n: usize) -> Result<()> {
        self.ensure(Dimension::Row, n)
    }

    /// Grow to at least `n + 1` columns.
    pub fn ensure_column(&mut self, n: usize) -> Result<()> {
        self.ensure(Dimension::Column, n)
    }

    /// Generic growth for row or column. Idempotent; denied growth leaves
    /// the extent unchanged.
    fn ensure(&mut self, dim: Dimension, n: usize) -> Result<()> {
        if n >= dim.limit() {
            log::warn!("{} growth to {} denied (limit {})", dim, n + 1, dim.limit());
            return Err(GridError::LimitReached {
                dimension: dim,
                limit: dim.limit(),
            });
        }
        let extent = match dim {
            Dimension::Row => &mut self.rows,
            Dimension::Column => &mut self.cols,
        };
        if n >= *extent {
            log::debug!("growing {}s from {} to {}", dim, *extent, n + 1);
            *extent = n + 1;
        }
        Ok(())
    }

    /// Append one row or column, as when scrolling reaches the end.
    pub fn grow_at_boundary(&mut self, dim: Dimension) -> Result<()> {
        let next = self.extent(dim);
        self.ensure(dim, next)
    }

    /// Move one cell. Moving past the last row or column grows the sheet;
    /// moving before the first stays put.
    pub fn step_cursor(&mut self, from: CellRef, dir: Move) -> Result<CellRef> {
        let (dcol, drow) = match dir {
            Move::Up => (0, -1),
            Move::Down => (0, 1),
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
        };
        let Some(to) = from.offset(dcol, drow) else {
            return Ok(from);
        };
        if to.row >= self.rows {
            self.ensure_row(to.row)?;
        }
        if to.col >= self.cols {
            self.ensure_column(to.col)?;
        }
        Ok(to)
    }

    /// Empty every cell in the rectangle.
    pub fn clear(&mut self, selection: &Selection) {
        let mut removed = 0usize;
        for cell_ref in selection.cells() {
            if self.cells.remove(&cell_ref).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            self.modified = true;
        }
    }

    /// Values of a rectangle, one inner vector per row.
    pub fn snapshot(&self, selection: &Selection) -> Result<Vec<Vec<String>>> {
        (selection.top..=selection.bottom)
            .map(|row| {
                (selection.left..=selection.right)
                    .map(|col| self.get(row, col))
                    .collect::<Result<Vec<String>>>()
            })
            .collect()
    }

    /// Non-empty cells in row-major order.
    pub fn non_empty_cells(&self) -> Vec<(CellRef, String)> {
        let mut cells: Vec<(CellRef, String)> = self
            .cells
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        cells.sort_by_key(|(cell_ref, _)| (cell_ref.row, cell_ref.col));
        cells
    }

    /// Column header labels for the current extent.
    pub fn column_headers(&self) -> Vec<String> {
        (0..self.cols).map(column_label).collect()
    }

    /// Row header labels for the current extent.
    pub fn row_headers(&self) -> Vec<String> {
        (0..self.rows).map(row_label).collect()
    }
}

impl CellSource for Sheet {
    /// Cells outside the current extent do not resolve.
    fn cell_text(&self, cell: &CellRef) -> Option<String> {
        if !self.in_extent(cell) {
            return None;
        }
        self.get(cell.row, cell.col).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_get_round_trip() {
        let mut sheet = Sheet::new();
        for (row, col, text) in [(0, 0, "x"), (29, 29, "corner"), (999, 999, "far"), (4, 7, "-3.5")] {
            sheet.set(row, col, text).unwrap();
            assert_eq!(sheet.get(row, col).unwrap(), text);
        }
        assert!(sheet.modified);
    }

    #[test]
    fn test_get_unwritten_is_empty() {
        let sheet = Sheet::new();
        assert_eq!(sheet.get(10, 10).unwrap(), "");
        assert_eq!(sheet.get(500, 0).unwrap(), "");
    }

    #[test]
    fn test_get_beyond_ceiling_is_out_of_bounds() {
        let sheet = Sheet::new();
        assert_eq!(
            sheet.get(1000, 0),
            Err(GridError::OutOfBounds { row: 1000, col: 0 })
        );
        assert!(matches!(sheet.get(0, 1000), Err(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn test_set_grows_extent() {
        let mut sheet = Sheet::new();
        sheet.set(30, 0, "a").unwrap();
        assert_eq!(sheet.rows(), 31);
        sheet.set(0, 45, "b").unwrap();
        assert_eq!(sheet.cols(), 46);
    }

    #[test]
    fn test_set_beyond_ceiling_reports_limit() {
        let mut sheet = Sheet::new();
        let err = sheet.set(1000, 0, "x").unwrap_err();
        assert_eq!(
            err,
            GridError::LimitReached {
                dimension: Dimension::Row,
                limit: MAX_ROWS
            }
        );
        assert_eq!(sheet.rows(), 30);
        assert!(!sheet.modified);
    }

    #[test]
    fn test_set_empty_removes_entry() {
        let mut sheet = Sheet::new();
        sheet.set(1, 1, "x").unwrap();
        sheet.set(1, 1, "").unwrap();
        assert!(sheet.non_empty_cells().is_empty());
    }

    #[test]
    fn test_ensure_row_is_idempotent() {
        let mut sheet = Sheet::new();
        sheet.ensure_row(40).unwrap();
        sheet.ensure_row(40).unwrap();
        sheet.ensure_row(5).unwrap();
        assert_eq!(sheet.rows(), 41);
    }

    #[test]
    fn test_ensure_row_at_limit_is_rejected() {
        let mut sheet = Sheet::with_size(1000, 5);
        assert_eq!(sheet.rows(), 1000);
        let err = sheet.ensure_row(1000).unwrap_err();
        assert!(matches!(
            err,
            GridError::LimitReached {
                dimension: Dimension::Row,
                ..
            }
        ));
        assert_eq!(sheet.rows(), 1000);
    }

    #[test]
    fn test_ensure_column_at_limit_is_rejected() {
        let mut sheet = Sheet::with_size(5, 1000);
        assert!(sheet.ensure_column(1000).is_err());
        assert_eq!(sheet.cols(), 1000);
    }

    #[test]
    fn test_grow_at_boundary_appends_one() {
        let mut sheet = Sheet::with_size(3, 3);
        sheet.grow_at_boundary(Dimension::Row).unwrap();
        sheet.grow_at_boundary(Dimension::Column).unwrap();
        assert_eq!((sheet.rows(), sheet.cols()), (4, 4));

        let mut full = Sheet::with_size(1000, 1);
        assert!(full.grow_at_boundary(Dimension::Row).is_err());
    }

    #[test]
    fn test_step_cursor_grows_at_edges() {
        let mut sheet = Sheet::with_size(2, 2);
        let cell = sheet.step_cursor(CellRef::new(1, 1), Move::Down).unwrap();
        assert_eq!(cell, CellRef::new(1, 2));
        assert_eq!(sheet.rows(), 3);

        let cell = sheet.step_cursor(cell, Move::Right).unwrap();
        assert_eq!(cell, CellRef::new(2, 2));
        assert_eq!(sheet.cols(), 3);
    }

    #[test]
    fn test_step_cursor_stays_at_origin() {
        let mut sheet = Sheet::new();
        let origin = CellRef::new(0, 0);
        assert_eq!(sheet.step_cursor(origin, Move::Up).unwrap(), origin);
        assert_eq!(sheet.step_cursor(origin, Move::Left).unwrap(), origin);
    }

    #[test]
    fn test_step_cursor_at_ceiling_reports_limit() {
        let mut sheet = Sheet::with_size(1000, 1000);
        let last = CellRef::new(999, 999);
        assert!(sheet.step_cursor(last, Move::Down).is_err());
        assert!(sheet.step_cursor(last, Move::Right).is_err());
    }

    #[test]
    fn test_headers_follow_extent() {
        let mut sheet = Sheet::with_size(2, 3);
        assert_eq!(sheet.column_headers(), vec!["A", "B", "C"]);
        assert_eq!(sheet.row_headers(), vec!["1", "2"]);
        sheet.ensure_column(26).unwrap();
        assert_eq!(sheet.column_headers().last().map(String::as_str), Some("AA"));
    }

    #[test]
    fn test_clear_and_snapshot() {
        let mut sheet = Sheet::new();
        sheet.set(0, 0, "1").unwrap();
        sheet.set(0, 1, "2").unwrap();
        sheet.set(1, 0, "3").unwrap();
        let sel = Selection::parse("A1:B2").unwrap();
        assert_eq!(
            sheet.snapshot(&sel).unwrap(),
            vec![vec!["1", "2"], vec!["3", ""]]
        );
        sheet.clear(&sel);
        assert_eq!(sheet.snapshot(&sel).unwrap(), vec![vec!["", ""], vec!["", ""]]);
    }

    #[test]
    fn test_cell_source_respects_extent() {
        let mut sheet = Sheet::with_size(5, 5);
        sheet.set(0, 0, "4").unwrap();
        assert_eq!(sheet.cell_text(&CellRef::new(0, 0)).as_deref(), Some("4"));
        assert_eq!(sheet.cell_text(&CellRef::new(25, 98)), None);
    }
}
