#![allow(clippy::doc_markdown)]

//! omni-edit - Lossless style rewriting for visual patch
//!
//! Applies one captured style edit to a JSX/TSX source file: a class-list
//! substitution inside `className`, or a value swap inside an inline
//! `style={{ ... }}` object. Every qualifying attribute in the file is
//! updated.
//!
//! Edits are spliced into the original text by byte range, so every byte
//! outside a changed literal is preserved exactly.
//!
//! # Architecture
//!
//! ```text
//! omni-edit/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # EditError enum (thiserror)
//! ├── types.rs    # StyleEdit, EditResult, EditLocation, EditConfig, ClassMatchPolicy, WriteGate
//! ├── diff.rs     # Unified diff generation (similar)
//! ├── lock.rs     # Path-keyed write serialization
//! └── editor.rs   # StyleEditor implementation
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_edit::{StyleEdit, StyleEditor};
//!
//! let edit = StyleEdit::new("className", "text-red-500", "text-blue-500");
//! let result = StyleEditor::apply("src/Card.tsx", &edit)?;
//! assert!(result.changed());
//! ```

mod diff;
mod editor;
mod error;
mod lock;
mod types;

pub use diff::generate_unified_diff;
pub use editor::StyleEditor;
pub use error::EditError;
pub use lock::with_path_lock;
pub use types::{
    ClassMatchPolicy, EditConfig, EditLocation, EditResult, StyleEdit, WriteGate,
};
