//! Grid-independent spreadsheet logic.
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`column_label`], [`row_label`], [`letters_to_col`] - Header labels
//! - [`is_numeric_text`], [`is_numeric_block`] - Numeric classification of cell text
//! - [`SumFormula`], [`evaluate_sum`] - One-shot `=SUM(...)` evaluation
//! - [`compose_formula`] - Build a formula from cell addresses

mod cell_ref;
mod formula;
mod numeric;

pub use cell_ref::{CellRef, column_label, letters_to_col, row_label};
pub use formula::{CellSource, FormulaError, SumFormula, compose_formula, evaluate_sum, is_formula};
pub use numeric::{is_numeric_block, is_numeric_text, parse_series_base, parse_sum_operand};
