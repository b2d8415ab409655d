//! Error types for Gridfill core.

use thiserror::Error;

use crate::sheet::Dimension;

/// Errors that can occur while operating on a sheet.
///
/// Every variant is recoverable; callers decide what, if anything, to show.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell at row {row}, column {col} is out of bounds")]
    OutOfBounds { row: usize, col: usize },

    #[error("Maximum number of {dimension}s ({limit}) reached")]
    LimitReached { dimension: Dimension, limit: usize },

    #[error("Drag ended inside the selection")]
    NoFillRegion,

    #[error("Unparseable formula: {0}")]
    UnparseableFormula(String),

    #[error("Series fill needs a numeric source")]
    NonNumericSeries,

    #[error("Autofill drag must start at the selection's top-left cell")]
    InvalidDragStart,

    #[error("No autofill drag in progress")]
    NoDragInProgress,

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
