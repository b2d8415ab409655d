//! Sheet state and logic (UI-agnostic).

mod commit;
mod merge;
mod ops;
mod state;

pub use ops::Move;
pub use state::{DEFAULT_COLS, DEFAULT_ROWS, Dimension, Grid, MAX_COLS, MAX_ROWS, Sheet};
