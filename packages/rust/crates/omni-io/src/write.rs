//! Whole-file writes.

use std::fs;
use std::path::Path;

use crate::error::IoError;

/// Overwrite `path` with `content`.
///
/// # Errors
/// Propagates the underlying `std::io::Error` as `IoError::System`.
pub fn write_text<P: AsRef<Path>>(path: P, content: &str) -> Result<(), IoError> {
    let path = path.as_ref();
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
