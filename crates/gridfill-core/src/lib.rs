//! gridfill-core - UI-agnostic grid store, selection and autofill engine.

pub mod autofill;
pub mod backend;
pub mod error;
pub mod selection;
pub mod sheet;

pub use autofill::{
    AutofillDrag, Axis, Direction, FillMode, FillOutcome, FillPlan, FillRegion, SourceBlock,
};
pub use backend::{MemoryBackend, SpreadsheetBackend};
pub use error::{GridError, Result};
pub use selection::{Selection, SelectionSet};
pub use sheet::{DEFAULT_COLS, DEFAULT_ROWS, Dimension, MAX_COLS, MAX_ROWS, Move, Sheet};

pub use gridfill_engine::engine::{CellRef, column_label, compose_formula, row_label};
