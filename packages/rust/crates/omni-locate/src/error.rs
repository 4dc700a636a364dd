//! Error types for source resolution.

use omni_types::Candidate;
use thiserror::Error;

/// Why resolution did not produce a single file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No file holds an element satisfying any hint.
    #[error("No file found for instruction")]
    NoFileResolved,

    /// Several files hold matching elements; none is picked.
    #[error("Multiple candidate files found: {}", list_files(.candidates))]
    AmbiguousResolution {
        /// Every candidate with its matched reasons, sorted by path.
        candidates: Vec<Candidate>,
    },
}

impl ResolveError {
    /// Candidates behind an ambiguous resolution.
    #[must_use]
    pub fn candidates(&self) -> Option<&[Candidate]> {
        match self {
            Self::NoFileResolved => None,
            Self::AmbiguousResolution { candidates } => Some(candidates),
        }
    }
}

fn list_files(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| c.file.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
