//! Re-exports from ast-grep (Unified ast-grep v0.40.5)
//!
//! Keeps one ast-grep version across the workspace.

pub use ast_grep_core::tree_sitter::StrDoc;
pub use ast_grep_core::{AstGrep, Node};

pub use ast_grep_language::LanguageExt;
pub use ast_grep_language::SupportLang;

/// Node type for parsed UI sources.
pub type SgNode<'r> = Node<'r, StrDoc<SupportLang>>;
