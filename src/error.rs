//! Error types for the Gridfill application

use gridfill_core::GridError;
use thiserror::Error;

/// Errors that can occur in the Gridfill application
#[derive(Error, Debug)]
pub enum GridfillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Grid(#[from] GridError),

    #[error("Command {index}: {message}")]
    Command { index: usize, message: String },
}

pub type Result<T> = std::result::Result<T, GridfillError>;
