//! Error types for plot export.

use thiserror::Error;

/// Errors from rendering the diagnostic image.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Plot backend error: {message}")]
    Backend { message: String },

    #[error("Nothing to plot: both series are empty")]
    EmptySeries,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlotResult<T> = Result<T, PlotError>;
