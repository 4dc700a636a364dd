#![allow(clippy::doc_markdown)]

//! omni-io - Safe source file I/O for visual patch
//!
//! Reads and writes the UI source files that the resolver scans and the
//! mutator rewrites. The file system is the only source of truth: nothing
//! here caches content across calls.
//!
//! # Features
//!
//! - **Safety**: Binary detection & size limits on every read
//! - **Discovery**: `.gitignore`-aware enumeration of UI component sources,
//!   skipping dependency directories such as `node_modules`
//!
//! # Architecture
//!
//! ```text
//! omni-io/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # IoError enum
//! ├── read.rs     # Guarded reads, binary detection & decoding
//! ├── write.rs    # Whole-file writes
//! └── discover.rs # UI source enumeration (ignore)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_io::{discover_sources, read_text_safe, DiscoverOptions};
//!
//! for path in discover_sources("/project", &DiscoverOptions::default()) {
//!     let content = read_text_safe(&path, 1024 * 1024)?;
//! }
//! ```

mod discover;
mod error;
mod read;
mod write;

pub use discover::{DiscoverOptions, discover_sources, has_extension};
pub use error::IoError;
pub use read::{decode_buffer, is_binary, read_text_safe};
pub use write::write_text;
