//! Rectangular selections and the cell sets they are derived from.

use gridfill_engine::engine::CellRef;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A normalized rectangle of cells: `top <= bottom` and `left <= right`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl Selection {
    /// Rectangle spanning two corner cells, in any order.
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Selection {
            top: a.row.min(b.row),
            left: a.col.min(b.col),
            bottom: a.row.max(b.row),
            right: a.col.max(b.col),
        }
    }

    pub fn single(cell: CellRef) -> Self {
        Self::new(cell, cell)
    }

    /// Bounding rectangle of an arbitrary cell set.
    ///
    /// Non-rectangular sets collapse to their bounds, so cells that were never
    /// selected can end up inside the result.
    pub fn from_cells<I: IntoIterator<Item = CellRef>>(cells: I) -> Option<Self> {
        let mut iter = cells.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Selection::single(first), |sel, cell| Selection {
            top: sel.top.min(cell.row),
            left: sel.left.min(cell.col),
            bottom: sel.bottom.max(cell.row),
            right: sel.right.max(cell.col),
        }))
    }

    /// Parse `A1` or `A1:C3`.
    pub fn parse(range: &str) -> Option<Self> {
        match range.split_once(':') {
            Some((a, b)) => Some(Self::new(
                CellRef::from_str(a.trim())?,
                CellRef::from_str(b.trim())?,
            )),
            None => CellRef::from_str(range.trim()).map(Self::single),
        }
    }

    pub fn top_left(&self) -> CellRef {
        CellRef::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> CellRef {
        CellRef::new(self.right, self.bottom)
    }

    pub fn rows(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn cols(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn is_single_cell(&self) -> bool {
        self.top == self.bottom && self.left == self.right
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        cell.row >= self.top && cell.row <= self.bottom && cell.col >= self.left && cell.col <= self.right
    }

    pub fn intersects(&self, other: &Selection) -> bool {
        self.top <= other.bottom
            && other.top <= self.bottom
            && self.left <= other.right
            && other.left <= self.right
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + use<> {
        let (left, right) = (self.left, self.right);
        (self.top..=self.bottom)
            .flat_map(move |row| (left..=right).map(move |col| CellRef::new(col, row)))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}", self.top_left())
        } else {
            write!(f, "{}:{}", self.top_left(), self.bottom_right())
        }
    }
}

/// The set of cells a user has picked, by click, drag or ctrl-click.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    cells: HashSet<CellRef>,
    anchor: Option<CellRef>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh selection at `cell`.
    pub fn start(&mut self, cell: CellRef) {
        self.cells.clear();
        self.cells.insert(cell);
        self.anchor = Some(cell);
    }

    /// Replace the selection with the rectangle from the anchor to `cell`.
    pub fn extend_to(&mut self, cell: CellRef) {
        let anchor = *self.anchor.get_or_insert(cell);
        self.cells.clear();
        self.cells.extend(Selection::new(anchor, cell).cells());
    }

    /// Add or remove a single cell (ctrl-click).
    pub fn toggle(&mut self, cell: CellRef) {
        if !self.cells.remove(&cell) {
            self.cells.insert(cell);
        }
        if self.anchor.is_none() {
            self.anchor = Some(cell);
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.anchor = None;
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        self.cells.contains(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn anchor(&self) -> Option<CellRef> {
        self.anchor
    }

    pub fn cells(&self) -> impl Iterator<Item = &CellRef> {
        self.cells.iter()
    }

    pub fn bounds(&self) -> Option<Selection> {
        Selection::from_cells(self.cells.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(name: &str) -> CellRef {
        CellRef::from_str(name).unwrap()
    }

    #[test]
    fn test_new_normalizes_corners() {
        let sel = Selection::new(cell("C5"), cell("A2"));
        assert_eq!((sel.top, sel.left, sel.bottom, sel.right), (1, 0, 4, 2));
        assert_eq!(sel.rows(), 4);
        assert_eq!(sel.cols(), 3);
        assert_eq!(sel.to_string(), "A2:C5");
    }

    #[test]
    fn test_from_cells_takes_bounding_rectangle() {
        let sel = Selection::from_cells([cell("B2"), cell("D1"), cell("A4")]).unwrap();
        assert_eq!(sel, Selection::new(cell("A1"), cell("D4")));
        // C3 was never picked but lies inside the bounds.
        assert!(sel.contains(&cell("C3")));
        assert!(Selection::from_cells(std::iter::empty()).is_none());
    }

    #[test]
    fn test_parse_single_and_range() {
        assert_eq!(Selection::parse("B2"), Some(Selection::single(cell("B2"))));
        assert_eq!(
            Selection::parse("B3:A1"),
            Some(Selection::new(cell("A1"), cell("B3")))
        );
        assert_eq!(Selection::parse("B3:"), None);
    }

    #[test]
    fn test_cells_are_row_major() {
        let sel = Selection::parse("A1:B2").unwrap();
        let names: Vec<String> = sel.cells().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_intersects() {
        let a = Selection::parse("A1:B2").unwrap();
        assert!(a.intersects(&Selection::parse("B2:C3").unwrap()));
        assert!(!a.intersects(&Selection::parse("C1:D2").unwrap()));
    }

    #[test]
    fn test_selection_set_toggle_and_bounds() {
        let mut set = SelectionSet::new();
        set.start(cell("A1"));
        set.toggle(cell("C3"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.bounds(), Selection::parse("A1:C3"));

        set.toggle(cell("C3"));
        assert_eq!(set.bounds(), Selection::parse("A1"));
    }

    #[test]
    fn test_selection_set_extend_uses_anchor() {
        let mut set = SelectionSet::new();
        set.start(cell("B2"));
        set.extend_to(cell("A4"));
        assert_eq!(set.len(), 6);
        assert_eq!(set.anchor(), Some(cell("B2")));
        assert_eq!(set.bounds(), Selection::parse("A2:B4"));

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.bounds(), None);
    }
}
