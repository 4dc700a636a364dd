//! Tests for diff module - unified diff rendering.

use omni_edit::generate_unified_diff;

#[test]
fn test_diff_has_hunk_for_changed_line_only() {
    let original = "a\nb\nc\nd\ne\nf\ng\nh\ni\n";
    let modified = "a\nb\nc\nd\nE\nf\ng\nh\ni\n";
    let diff = generate_unified_diff(original, modified, "x.tsx");

    assert!(diff.contains("-e\n"));
    assert!(diff.contains("+E\n"));
    assert_eq!(diff.matches("@@ ").count(), 1);
    assert!(!diff.contains(" a\n"));
}

#[test]
fn test_identical_inputs() {
    assert_eq!(generate_unified_diff("same\n", "same\n", "x.tsx"), "");
}
