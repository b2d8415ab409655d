use super::FillOutcome;
use super::plan::{Axis, FillMode, FillRegion, SourceBlock, fill_region, plan_fill, project, resolve_axis};
use crate::error::{GridError, Result};
use crate::selection::Selection;
use crate::sheet::Sheet;
use gridfill_engine::engine::CellRef;

/// State of a fill-handle drag between press and release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutofillDrag {
    selection: Selection,
    start: CellRef,
    /// Where the pointer went down: the fill handle at the bottom-right cell.
    pressed: CellRef,
    /// Locked on the first update.
    axis: Option<Axis>,
    /// Last projected endpoint.
    end: Option<CellRef>,
    source: SourceBlock,
}

impl AutofillDrag {
    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn start(&self) -> CellRef {
        self.start
    }

    pub fn pressed(&self) -> CellRef {
        self.pressed
    }

    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    pub fn end(&self) -> Option<CellRef> {
        self.end
    }

    pub fn source(&self) -> &SourceBlock {
        &self.source
    }
}

impl Sheet {
    /// Start a drag from the selection's top-left cell. The pointer itself is
    /// taken to be on the fill handle, and the source block is captured here,
    /// before anything is written.
    pub fn begin_autofill_drag(&mut self, selection: Selection, start: CellRef) -> Result<()> {
        if start != selection.top_left() {
            return Err(GridError::InvalidDragStart);
        }
        let source = SourceBlock::new(self.snapshot(&selection)?);
        if let Some(previous) = self.drag.take() {
            log::warn!("discarding unfinished drag from {}", previous.selection);
        }
        log::debug!("autofill drag started on {}", selection);
        self.drag = Some(AutofillDrag {
            selection,
            start,
            pressed: selection.bottom_right(),
            axis: None,
            end: None,
            source,
        });
        Ok(())
    }

    /// Track the pointer. Returns the region a release here would fill, or
    /// `None` while the pointer is still inside the selection.
    pub fn update_autofill_drag(&mut self, current: CellRef) -> Result<Option<FillRegion>> {
        let drag = self.drag.as_mut().ok_or(GridError::NoDragInProgress)?;
        let (start, pressed) = (drag.start, drag.pressed);
        let axis = *drag.axis.get_or_insert_with(|| resolve_axis(pressed, current));
        let end = project(axis, start, current);
        drag.end = Some(end);

        match fill_region(&drag.selection, axis, end) {
            Ok(region) => Ok(Some(region)),
            Err(GridError::NoFillRegion) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Modes the user may pick for the drag in progress.
    pub fn offered_fill_modes(&self) -> &'static [FillMode] {
        match &self.drag {
            Some(drag) => drag.source.offered_modes(),
            None => &[],
        }
    }

    pub fn autofill_drag(&self) -> Option<&AutofillDrag> {
        self.drag.as_ref()
    }

    /// Abandon the drag without writing. Returns false if none was active.
    pub fn cancel_autofill_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Release the drag and perform the fill.
    pub fn end_autofill_drag(&mut self, mode: FillMode) -> Result<FillOutcome> {
        let drag = self.drag.take().ok_or(GridError::NoDragInProgress)?;
        let (Some(axis), Some(end)) = (drag.axis, drag.end) else {
            return Err(GridError::NoFillRegion);
        };
        let region = fill_region(&drag.selection, axis, end)?;
        self.apply_fill(&drag.source, &region, mode)
    }

    /// Fill from `selection` toward `end` in one call, as a full drag would.
    pub fn autofill(&mut self, selection: &Selection, end: CellRef, mode: FillMode) -> Result<FillOutcome> {
        let axis = resolve_axis(selection.bottom_right(), end);
        let region = fill_region(selection, axis, project(axis, selection.top_left(), end))?;
        let source = SourceBlock::new(self.snapshot(selection)?);
        self.apply_fill(&source, &region, mode)
    }

    fn apply_fill(&mut self, source: &SourceBlock, region: &FillRegion, mode: FillMode) -> Result<FillOutcome> {
        let plan = plan_fill(source, region, mode);
        if plan.fallback.is_some() {
            log::warn!("series fill of {} not numeric, copying instead", region.selection);
        }

        let mut filled = Vec::with_capacity(plan.writes.len());
        for (cell_ref, value) in &plan.writes {
            self.set(cell_ref.row, cell_ref.col, value)?;
            filled.push(*cell_ref);
        }
        for cell_ref in &filled {
            if let Err(e) = self.on_cell_committed(cell_ref.row, cell_ref.col) {
                log::warn!("fill left {} unevaluated: {}", cell_ref, e);
            }
        }
        if region.clipped {
            log::warn!(
                "fill from {} clipped at the {} limit",
                region.selection,
                region.axis.dimension()
            );
        }
        log::debug!("{} filled {} cells", plan.mode.label(), filled.len());

        self.preview = filled.clone();
        Ok(FillOutcome {
            region: region.bounds(),
            filled,
            mode: plan.mode,
            fallback: plan.fallback,
            clipped: region.clipped,
        })
    }

    /// Cells written by the most recent fill.
    pub fn preview_cells(&self) -> &[CellRef] {
        &self.preview
    }

    pub fn is_previewed(&self, cell: &CellRef) -> bool {
        self.preview.contains(cell)
    }

    /// Selection-click hook: any click on a header or cell drops the fill
    /// highlight. Where the click landed does not matter, so `_cell` is unused.
    pub fn on_selection_click(&mut self, _cell: CellRef) {
        self.preview.clear();
    }
}
