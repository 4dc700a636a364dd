#![allow(clippy::doc_markdown)]

//! omni-locate - Source resolution for captured DOM edits
//!
//! A style edit captured from a rendered page only carries heuristic
//! evidence about where it came from: a selector, an id, a class string, a
//! tag. This crate turns that evidence into [`MatchHint`]s and scans the
//! project's UI sources for elements that satisfy any of them.
//!
//! Resolution fails closed: it succeeds only when exactly one file holds a
//! matching element. Zero or several candidates are reported, never guessed.
//!
//! # Architecture
//!
//! ```text
//! omni-locate/src/
//! ├── lib.rs       # Re-exports (this file)
//! ├── error.rs     # ResolveError enum (thiserror)
//! ├── hint.rs      # MatchHint, Hint, and the hint normalizer
//! └── resolver.rs  # CandidateResolver (rayon)
//! ```

mod error;
mod hint;
mod resolver;

pub use error::ResolveError;
pub use hint::{Hint, MatchHint, hints_from_instruction, parse_selector};
pub use resolver::{CandidateResolver, match_source};
