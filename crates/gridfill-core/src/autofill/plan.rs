//! Pure fill planning: axis, region, source classification and the values
//! to write. Nothing here touches a sheet.

use crate::error::{GridError, Result};
use crate::selection::Selection;
use crate::sheet::Dimension;
use gridfill_engine::engine::{CellRef, is_numeric_block, parse_series_base};
use serde::{Deserialize, Serialize};

/// Axis a fill extends along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// The sheet dimension that grows when filling along this axis.
    pub fn dimension(self) -> Dimension {
        match self {
            Axis::Vertical => Dimension::Row,
            Axis::Horizontal => Dimension::Column,
        }
    }
}

/// Which side of the selection the fill lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Below or to the right.
    Forward,
    /// Above or to the left.
    Backward,
}

impl Direction {
    pub fn step(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// How fill values are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillMode {
    /// Repeat the source block cyclically.
    #[default]
    Copy,
    /// Extend an arithmetic series from the source's edge value.
    Series,
}

impl FillMode {
    pub fn label(self) -> &'static str {
        match self {
            FillMode::Copy => "Copy Cells",
            FillMode::Series => "Fill Series",
        }
    }
}

const COPY_ONLY: &[FillMode] = &[FillMode::Copy];
const COPY_OR_SERIES: &[FillMode] = &[FillMode::Copy, FillMode::Series];

/// Axis of a pointer move from `pressed` to `current`. Horizontal wins only
/// when the column delta is strictly larger.
pub fn resolve_axis(pressed: CellRef, current: CellRef) -> Axis {
    let dcol = pressed.col.abs_diff(current.col);
    let drow = pressed.row.abs_diff(current.row);
    if dcol > drow {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Pin `current` to the line through `start` along `axis`.
pub fn project(axis: Axis, start: CellRef, current: CellRef) -> CellRef {
    match axis {
        Axis::Vertical => CellRef::new(start.col, current.row),
        Axis::Horizontal => CellRef::new(current.col, start.row),
    }
}

/// Cells to be written by a fill, grouped into lines perpendicular to the axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillRegion {
    pub selection: Selection,
    pub axis: Axis,
    pub direction: Direction,
    /// Row (vertical) or column (horizontal) indices, walking outward from the selection.
    pub lines: Vec<usize>,
    /// True if the drag reached past the sheet ceiling and was cut short.
    pub clipped: bool,
}

impl FillRegion {
    /// Width of each line.
    fn line_len(&self) -> usize {
        match self.axis {
            Axis::Vertical => self.selection.cols(),
            Axis::Horizontal => self.selection.rows(),
        }
    }

    /// The cell at position `offset` within line `line`.
    fn cell_at(&self, line: usize, offset: usize) -> CellRef {
        match self.axis {
            Axis::Vertical => CellRef::new(self.selection.left + offset, line),
            Axis::Horizontal => CellRef::new(line, self.selection.top + offset),
        }
    }

    /// Every cell in the region, line by line.
    pub fn cells(&self) -> Vec<CellRef> {
        self.lines
            .iter()
            .flat_map(|&line| (0..self.line_len()).map(move |offset| self.cell_at(line, offset)))
            .collect()
    }

    /// Bounding rectangle of the region.
    pub fn bounds(&self) -> Selection {
        let first = self.lines.first().copied().unwrap_or_default();
        let last = self.lines.last().copied().unwrap_or_default();
        Selection::new(self.cell_at(first, 0), self.cell_at(last, self.line_len() - 1))
    }
}

/// Work out which cells a drag ending at `end` covers.
///
/// `end` is expected to be projected onto the axis already. An endpoint
/// inside the selection's span yields `NoFillRegion`; a forward region that
/// runs past the ceiling is clipped, and `LimitReached` is returned only when
/// nothing at all fits.
pub fn fill_region(selection: &Selection, axis: Axis, end: CellRef) -> Result<FillRegion> {
    let dim = axis.dimension();
    let (near, far) = match axis {
        Axis::Vertical => (selection.top, selection.bottom),
        Axis::Horizontal => (selection.left, selection.right),
    };
    let target = dim.get_coord(&end);

    let (direction, lines, clipped) = if target > far {
        let last = target.min(dim.limit() - 1);
        if last <= far {
            return Err(GridError::LimitReached {
                dimension: dim,
                limit: dim.limit(),
            });
        }
        (Direction::Forward, (far + 1..=last).collect(), last < target)
    } else if target < near {
        (Direction::Backward, (target..near).rev().collect(), false)
    } else {
        return Err(GridError::NoFillRegion);
    };

    Ok(FillRegion {
        selection: *selection,
        axis,
        direction,
        lines,
        clipped,
    })
}

/// Values of the selection captured before any fill write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceBlock {
    values: Vec<Vec<String>>,
}

impl SourceBlock {
    /// `values` is row-major and must be non-empty and rectangular.
    pub fn new(values: Vec<Vec<String>>) -> Self {
        SourceBlock { values }
    }

    pub fn values(&self) -> &[Vec<String>] {
        &self.values
    }

    pub fn rows(&self) -> usize {
        self.values.len()
    }

    pub fn cols(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    /// True if every cell holds a number.
    pub fn is_numeric(&self) -> bool {
        is_numeric_block(&self.values)
    }

    /// Modes worth offering for this block. Copy is always available.
    pub fn offered_modes(&self) -> &'static [FillMode] {
        if self.is_numeric() {
            COPY_OR_SERIES
        } else {
            COPY_ONLY
        }
    }

    /// The single value a series continues from: the bottom row's first
    /// cell (vertical) or the first row's right cell (horizontal), whichever
    /// way the fill runs.
    pub fn series_base(&self, axis: Axis) -> Option<i64> {
        let text = match axis {
            Axis::Vertical => self.values.last()?.first()?,
            Axis::Horizontal => self.values.first()?.last()?,
        };
        parse_series_base(text)
    }

    /// Source value for position `offset` of the `k`-th target line.
    fn cyclic(&self, axis: Axis, k: usize, offset: usize) -> &str {
        match axis {
            Axis::Vertical => &self.values[k % self.rows()][offset],
            Axis::Horizontal => &self.values[offset][k % self.cols()],
        }
    }
}

/// Planned writes for one fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillPlan {
    pub writes: Vec<(CellRef, String)>,
    /// Mode actually used.
    pub mode: FillMode,
    /// Set when series was requested but copy had to be used instead.
    pub fallback: Option<GridError>,
}

/// Compute the values for `region` from `source`.
///
/// Series mode needs a numeric block and an integer base; otherwise the plan
/// silently degrades to copy mode and records `NonNumericSeries`.
pub fn plan_fill(source: &SourceBlock, region: &FillRegion, requested: FillMode) -> FillPlan {
    let base = match requested {
        FillMode::Series if source.is_numeric() => {
            source.series_base(region.axis)
        }
        _ => None,
    };
    let fallback = (requested == FillMode::Series && base.is_none()).then_some(GridError::NonNumericSeries);
    let step = region.direction.step();

    let mut writes = Vec::with_capacity(region.lines.len() * region.line_len());
    for (k, &line) in region.lines.iter().enumerate() {
        let series_value = base.map(|b| {
            let distance = i64::try_from(k + 1).unwrap_or(i64::MAX);
            b.saturating_add(distance.saturating_mul(step)).to_string()
        });
        for offset in 0..region.line_len() {
            let value = match &series_value {
                Some(v) => v.clone(),
                None => source.cyclic(region.axis, k, offset).to_string(),
            };
            writes.push((region.cell_at(line, offset), value));
        }
    }

    FillPlan {
        writes,
        mode: if base.is_some() { FillMode::Series } else { FillMode::Copy },
        fallback,
    }
}
