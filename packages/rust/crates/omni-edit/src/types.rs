//! Core types for style rewriting.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// The attribute that holds the class list.
pub const CLASS_LIST_PROP: &str = "className";

/// One requested change: `prop` goes from `old_value` to `new_value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEdit {
    /// `className`, or an inline style key.
    pub prop: String,
    /// Value expected in source.
    pub old_value: String,
    /// Replacement value.
    pub new_value: String,
}

impl StyleEdit {
    /// Build an edit.
    #[must_use]
    pub fn new(
        prop: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            prop: prop.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }

    /// Whether this edit targets the class list rather than an inline style key.
    #[must_use]
    pub fn is_class_list(&self) -> bool {
        self.prop == CLASS_LIST_PROP
    }
}

/// How `old_value` is located inside a class string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassMatchPolicy {
    /// First raw substring occurrence, even inside a longer class name.
    #[default]
    Substring,
    /// First occurrence bounded by whitespace or the string edges.
    Token,
}

impl ClassMatchPolicy {
    /// Byte offset of the first acceptable occurrence of `needle`.
    ///
    /// An empty needle never matches.
    #[must_use]
    pub fn find(self, haystack: &str, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        match self {
            Self::Substring => haystack.find(needle),
            Self::Token => {
                let bytes = haystack.as_bytes();
                haystack
                    .match_indices(needle)
                    .map(|(start, _)| start)
                    .find(|&start| {
                        let end = start + needle.len();
                        let open = start == 0 || bytes[start - 1].is_ascii_whitespace();
                        let close = end == bytes.len() || bytes[end].is_ascii_whitespace();
                        open && close
                    })
            }
        }
    }
}

/// Result of a rewrite pass over one source.
#[derive(Debug, Clone, Serialize)]
pub struct EditResult {
    /// Original content before modification.
    pub original: String,
    /// Modified content after replacement.
    pub modified: String,
    /// Number of replacements made.
    pub count: usize,
    /// Unified diff showing changes.
    pub diff: String,
    /// Individual edit locations.
    pub edits: Vec<EditLocation>,
}

impl EditResult {
    /// Whether any literal was rewritten.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.count > 0
    }
}

/// Location of an individual replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Original text that was replaced.
    pub original_text: String,
    /// New text after replacement.
    pub new_text: String,
}

const GATE_OPEN: u8 = 0;
const GATE_COMMITTED: u8 = 1;
const GATE_CANCELLED: u8 = 2;

/// One-shot handshake between a pending write and whoever may abandon it.
///
/// Exactly one of [`WriteGate::commit`] and [`WriteGate::cancel`] succeeds,
/// so a caller that gave up on a rewrite either stops the write or learns
/// that it already went through.
#[derive(Debug, Clone, Default)]
pub struct WriteGate(Arc<AtomicU8>);

impl WriteGate {
    /// A fresh, open gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the write. False once the gate was cancelled.
    #[must_use]
    pub fn commit(&self) -> bool {
        self.transition(GATE_COMMITTED) || self.0.load(Ordering::Acquire) == GATE_COMMITTED
    }

    /// Forbid the write. False when it was already committed.
    #[must_use]
    pub fn cancel(&self) -> bool {
        self.transition(GATE_CANCELLED) || self.0.load(Ordering::Acquire) == GATE_CANCELLED
    }

    /// Whether [`WriteGate::cancel`] won.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire) == GATE_CANCELLED
    }

    fn transition(&self, to: u8) -> bool {
        self.0
            .compare_exchange(GATE_OPEN, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Configuration for file rewrites.
#[derive(Debug, Clone)]
pub struct EditConfig {
    /// Maximum file size in bytes (default 1MB).
    pub max_file_size: u64,
    /// Class-list matching rule.
    pub class_match: ClassMatchPolicy,
    /// Compute the result without writing the file.
    pub preview_only: bool,
    /// Must be committed, under the path lock, before the file is written.
    pub gate: Option<WriteGate>,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024,
            class_match: ClassMatchPolicy::default(),
            preview_only: false,
            gate: None,
        }
    }
}
