//! Diff generation utilities.
//!
//! Unified diffs for rewrite previews, using the `similar` crate.

use similar::TextDiff;

/// Generate a unified diff between two strings.
///
/// Headers are `a/<label>` and `b/<label>`; hunks carry three lines of
/// context. Identical inputs yield an empty string.
#[must_use]
pub fn generate_unified_diff(original: &str, modified: &str, label: &str) -> String {
    if original == modified {
        return String::new();
    }
    TextDiff::from_lines(original, modified)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}
