use super::Sheet;
use crate::error::Result;
use crate::selection::Selection;
use gridfill_engine::engine::CellRef;

impl Sheet {
    /// Merge a rectangle into one span anchored at its top-left cell.
    ///
    /// Every other cell in the rectangle is cleared and any existing merge
    /// overlapping it is dropped. Returns false for a single cell.
    pub fn merge(&mut self, selection: &Selection) -> Result<bool> {
        if selection.is_single_cell() {
            return Ok(false);
        }
        // Validate before mutating anything.
        self.get(selection.bottom, selection.right)?;

        self.merges.retain(|existing| !existing.intersects(selection));
        let anchor = selection.top_left();
        for cell_ref in selection.cells().filter(|c| *c != anchor) {
            self.cells.remove(&cell_ref);
        }
        self.ensure_row(selection.bottom)?;
        self.ensure_column(selection.right)?;
        self.merges.push(*selection);
        self.modified = true;
        log::debug!("merged {}", selection);
        Ok(true)
    }

    /// Remove the merge covering `cell`. Returns false if there was none.
    pub fn unmerge(&mut self, cell: &CellRef) -> bool {
        let before = self.merges.len();
        self.merges.retain(|span| !span.contains(cell));
        before != self.merges.len()
    }

    /// The merged span covering `cell`, if any.
    pub fn merged_region_at(&self, cell: &CellRef) -> Option<Selection> {
        self.merges.iter().find(|span| span.contains(cell)).copied()
    }

    pub fn merges(&self) -> &[Selection] {
        &self.merges
    }
}
