//! Autofill: extend a selected block by dragging its corner handle.
//!
//! [`plan`] holds the pure pieces (axis choice, target region, copy and
//! series values) and [`drag`] wires them to a [`crate::Sheet`] as a
//! begin/update/end gesture.

mod drag;
mod plan;

pub use drag::AutofillDrag;
pub use plan::{
    Axis, Direction, FillMode, FillPlan, FillRegion, SourceBlock, fill_region, plan_fill, project,
    resolve_axis,
};

use crate::error::GridError;
use crate::selection::Selection;
use gridfill_engine::engine::CellRef;

/// Result of a completed fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillOutcome {
    /// Rectangle that was written.
    pub region: Selection,
    /// Written cells, in write order.
    pub filled: Vec<CellRef>,
    /// Mode actually applied.
    pub mode: FillMode,
    /// `NonNumericSeries` if a series request was served as a copy.
    pub fallback: Option<GridError>,
    /// The drag reached past the sheet ceiling and was cut short.
    pub clipped: bool,
}

impl FillOutcome {
    pub fn fell_back(&self) -> bool {
        self.fallback.is_some()
    }
}
