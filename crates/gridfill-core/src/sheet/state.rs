use crate::autofill::AutofillDrag;
use crate::selection::Selection;
use dashmap::DashMap;
use gridfill_engine::engine::CellRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard ceiling on the number of rows a sheet can grow to.
pub const MAX_ROWS: usize = 1000;
/// Hard ceiling on the number of columns a sheet can grow to.
pub const MAX_COLS: usize = 1000;

pub const DEFAULT_ROWS: usize = 30;
pub const DEFAULT_COLS: usize = 30;

/// Sparse cell storage. Absent entries read as empty text.
pub type Grid = DashMap<CellRef, String>;

/// Dimension for row/column operations
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Row,
    Column,
}

impl Dimension {
    /// Growth ceiling for this dimension.
    pub fn limit(self) -> usize {
        match self {
            Dimension::Row => MAX_ROWS,
            Dimension::Column => MAX_COLS,
        }
    }

    /// Get the coordinate value from a CellRef for this dimension
    pub(crate) fn get_coord(self, cell_ref: &CellRef) -> usize {
        match self {
            Dimension::Row => cell_ref.row,
            Dimension::Column => cell_ref.col,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Row => write!(f, "row"),
            Dimension::Column => write!(f, "column"),
        }
    }
}

/// UI-agnostic sheet state: the grid store plus the transient state of the
/// hooks that operate on it (autofill drag, fill preview, merges).
#[derive(Debug)]
pub struct Sheet {
    /// Cell text, keyed by position.
    pub(crate) cells: Grid,
    /// Current row extent (rows `0..rows` exist).
    pub(crate) rows: usize,
    /// Current column extent.
    pub(crate) cols: usize,
    /// Merged spans, each anchored at its top-left cell.
    pub(crate) merges: Vec<Selection>,
    /// Cells written by the last completed fill, kept for highlighting.
    pub(crate) preview: Vec<CellRef>,
    /// Autofill gesture in progress, if any.
    pub(crate) drag: Option<AutofillDrag>,
    /// Whether any cell has been written since creation.
    pub modified: bool,
}

impl Sheet {
    /// Create a sheet with the default 30x30 extent.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// Create a sheet with the given extent, clamped to `1..=MAX`.
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Sheet {
            cells: Grid::new(),
            rows: rows.clamp(1, MAX_ROWS),
            cols: cols.clamp(1, MAX_COLS),
            merges: Vec::new(),
            preview: Vec::new(),
            drag: None,
            modified: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub(crate) fn extent(&self, dim: Dimension) -> usize {
        match dim {
            Dimension::Row => self.rows,
            Dimension::Column => self.cols,
        }
    }

    /// True if the position lies inside the current extent.
    pub fn in_extent(&self, cell: &CellRef) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
