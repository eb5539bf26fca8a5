//! Error types for the bibdb crate

use crate::diag::Diagnostic;
use thiserror::Error;

/// Result type for bibdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for bibdb
///
/// Recoverable problems never surface here: they go to the
/// [`Diagnostics`](crate::Diagnostics) sink and parsing continues. This type
/// carries the single fatal condition raised once at finalization, plus IO
/// failures from the file-reading conveniences.
#[derive(Error, Debug)]
pub enum Error {
    /// One or more error-severity diagnostics were logged during parsing.
    #[error("bibliography input had {} error(s)", .errors.len())]
    Input {
        /// The error-severity diagnostics, in the order they were logged.
        errors: Vec<Diagnostic>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
