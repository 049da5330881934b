//! Error types for textgrid library.

use std::io;
use thiserror::Error;

/// Result type alias for textgrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading fragments or writing results.
///
/// The layout pipeline itself never fails: degenerate geometry and solver
/// non-convergence are reported through the output, not through this type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in a page dump or settings file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input parsed but does not describe a usable page.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during rendering (text, JSON, report).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Fragment index is out of range.
    #[error("Fragment {0} is out of range (page has {1} fragments)")]
    FragmentOutOfRange(usize, usize),
}
