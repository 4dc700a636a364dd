//! omni-ast - JSX/TSX Syntax Views using ast-grep
//!
//! Parses UI component sources (TSX, JSX, TS, JS) and exposes the markup
//! layer of the tree: element nodes, their attributes, and the literal values
//! those attributes carry, each with exact byte ranges into the source.
//!
//! Every view borrows from a [`ParsedSource`], which is produced fresh per
//! operation and never cached. Edits are expressed by callers as byte-range
//! splices over the original text, so untouched regions survive verbatim.
//!
//! ## Architecture
//!
//! ```text
//! omni-ast/src/
//! ├── lib.rs           # Re-exports (entry point)
//! ├── re_exports.rs    # ast-grep re-exports
//! ├── lang.rs          # Lang enum and extension detection
//! └── jsx.rs           # ParsedSource, JsxElement, JsxAttribute, literals
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use omni_ast::{Lang, ParsedSource};
//!
//! let parsed = ParsedSource::parse(r#"<div className="card" />"#, Lang::Tsx)?;
//! for element in parsed.elements() {
//!     println!("{:?}", element.tag());
//! }
//! ```

mod jsx;
mod lang;
mod re_exports;

pub use re_exports::*;

pub use lang::Lang;

pub use jsx::{
    JsxAttribute, JsxElement, Literal, ObjectEntry, ParsedSource, Quoting, StringLiteral,
    SyntaxError, line_column,
};
