//! Tests for editor module - file rewrites on disk.

use std::fs;
use tempfile::TempDir;

use omni_edit::{ClassMatchPolicy, EditConfig, EditError, StyleEdit, StyleEditor, WriteGate};
use omni_io::IoError;

const CARD: &str = r#"import React from "react";

export function Card({ title }: { title: string }) {
  // keep   this    spacing
  return (
    <div className="flex items-center text-red-500"
         style={{ color: "red", fontSize: 12 }}>
      <h2 className='title'>{title}</h2>
    </div>
  );
}
"#;

fn write_card(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("Card.tsx");
    fs::write(&path, CARD).expect("Write card");
    path
}

#[test]
fn test_class_substitution_on_disk() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = write_card(&dir);

    let edit = StyleEdit::new("className", "text-red-500", "text-blue-500");
    let result = StyleEditor::apply(&path, &edit).expect("Should apply");

    assert_eq!(result.count, 1);
    let written = fs::read_to_string(&path).expect("Read file");
    assert_eq!(
        written,
        CARD.replace(
            "className=\"flex items-center text-red-500\"",
            "className=\"flex items-center text-blue-500\""
        )
    );
}

#[test]
fn test_style_substitution_on_disk() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = write_card(&dir);

    let result =
        StyleEditor::apply(&path, &StyleEdit::new("color", "red", "blue")).expect("Should apply");

    assert_eq!(result.count, 1);
    let written = fs::read_to_string(&path).expect("Read file");
    assert!(written.contains(r#"style={{ color: "blue", fontSize: 12 }}"#));
    assert_eq!(written.len(), CARD.len() + 1);
}

#[test]
fn test_reapplying_is_unchanged() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = write_card(&dir);
    let edit = StyleEdit::new("color", "red", "blue");

    assert!(StyleEditor::apply(&path, &edit).expect("First apply").changed());
    let after_first = fs::read_to_string(&path).expect("Read file");

    let second = StyleEditor::apply(&path, &edit).expect("Second apply");
    assert!(!second.changed());
    assert_eq!(fs::read_to_string(&path).expect("Read file"), after_first);
}

#[test]
fn test_no_match_is_byte_identical() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = write_card(&dir);

    let result = StyleEditor::apply(&path, &StyleEdit::new("margin", "0", "4px"))
        .expect("Should run");

    assert_eq!(result.count, 0);
    assert_eq!(result.modified, CARD);
    assert!(result.diff.is_empty());
    assert_eq!(fs::read_to_string(&path).expect("Read file"), CARD);
}

#[test]
fn test_preview_leaves_file_untouched() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = write_card(&dir);

    let result = StyleEditor::preview(&path, &StyleEdit::new("className", "title", "heading"))
        .expect("Should preview");

    assert_eq!(result.count, 1);
    assert!(result.diff.contains("+      <h2 className='heading'>{title}</h2>"));
    assert_eq!(fs::read_to_string(&path).expect("Read file"), CARD);
}

#[test]
fn test_parse_error_is_surfaced() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = dir.path().join("Broken.tsx");
    fs::write(&path, "export const A = () => <div className=\"a\" %%% />;\n").expect("Write");

    let err = StyleEditor::apply(&path, &StyleEdit::new("className", "a", "b")).unwrap_err();
    assert!(matches!(err, EditError::Parse { .. }), "got {err}");
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = dir.path().join("Missing.tsx");

    let err = StyleEditor::apply(&path, &StyleEdit::new("className", "a", "b")).unwrap_err();
    assert!(matches!(err, EditError::Read { .. }));
    assert!(err.to_string().starts_with("Read error:"));
}

#[test]
fn test_token_policy_from_config() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = dir.path().join("Badge.jsx");
    fs::write(
        &path,
        "export const Badge = () => <span className=\"gap-20 gap-2\" />;\n",
    )
    .expect("Write");

    let config = EditConfig {
        class_match: ClassMatchPolicy::Token,
        ..Default::default()
    };
    StyleEditor::rewrite_file(&path, &StyleEdit::new("className", "gap-2", "gap-4"), &config)
        .expect("Should apply");

    assert_eq!(
        fs::read_to_string(&path).expect("Read file"),
        "export const Badge = () => <span className=\"gap-20 gap-4\" />;\n"
    );
}

#[test]
fn test_unclosed_body_is_parse_error_and_untouched() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = dir.path().join("Unclosed.tsx");
    let source = "export function A() {\n  return <div className=\"a\" />;\n";
    fs::write(&path, source).expect("Write");

    let err = StyleEditor::apply(&path, &StyleEdit::new("className", "a", "b")).unwrap_err();

    assert!(matches!(err, EditError::Parse { .. }), "got {err}");
    assert_eq!(fs::read_to_string(&path).expect("Read file"), source);
}

#[test]
fn test_non_utf8_file_is_read_error_and_bytes_kept() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = dir.path().join("Legacy.jsx");
    let bytes: &[u8] =
        b"// caf\xE9 menu\nexport const A = () => <p className=\"text-red-500\" />;\n";
    fs::write(&path, bytes).expect("Write");

    let err = StyleEditor::apply(&path, &StyleEdit::new("className", "text-red-500", "text-blue-500"))
        .unwrap_err();

    assert!(
        matches!(err, EditError::Read { source: IoError::Encoding, .. }),
        "got {err}"
    );
    assert_eq!(fs::read(&path).expect("Read file"), bytes);
}

#[test]
fn test_cancelled_gate_blocks_write() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = write_card(&dir);
    let gate = WriteGate::new();
    assert!(gate.cancel());

    let config = EditConfig {
        gate: Some(gate),
        ..Default::default()
    };
    let err = StyleEditor::rewrite_file(&path, &StyleEdit::new("color", "red", "blue"), &config)
        .unwrap_err();

    assert!(matches!(err, EditError::Cancelled { .. }), "got {err}");
    assert_eq!(fs::read_to_string(&path).expect("Read file"), CARD);
}

#[test]
fn test_open_gate_is_committed_by_write() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = write_card(&dir);
    let gate = WriteGate::new();

    let config = EditConfig {
        gate: Some(gate.clone()),
        ..Default::default()
    };
    StyleEditor::rewrite_file(&path, &StyleEdit::new("color", "red", "blue"), &config)
        .expect("Should apply");

    assert!(!gate.cancel());
    assert!(fs::read_to_string(&path).expect("Read file").contains("color: \"blue\""));
}
