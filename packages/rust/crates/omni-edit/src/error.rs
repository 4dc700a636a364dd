//! Error types for style rewriting.
//!
//! Library crates use `thiserror` for explicit error enums.

use omni_ast::SyntaxError;
use omni_io::IoError;
use thiserror::Error;

/// Failure modes of a file rewrite.
///
/// A missing old value is not an error; see `EditResult::changed`.
#[derive(Error, Debug)]
pub enum EditError {
    /// The source file could not be read.
    #[error("Read error: {path}: {source}")]
    Read {
        /// File that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: IoError,
    },

    /// The source file is not valid JSX/TSX.
    #[error("Parse error: {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: String,
        /// First syntax error.
        #[source]
        source: SyntaxError,
    },

    /// The write was abandoned by its caller before it was committed.
    #[error("Write cancelled: {path}")]
    Cancelled {
        /// File that was left untouched.
        path: String,
    },

    /// The rewritten text could not be written back.
    #[error("Write error: {path}: {source}")]
    Write {
        /// File that was being written.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: IoError,
    },
}
