//! Tests for read/write - guarded source file I/O.

use std::io::Write;
use tempfile::TempDir;

use omni_io::{IoError, read_text_safe, write_text};

#[test]
fn test_read_component() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("Card.tsx");
    std::fs::write(&p, "<div className=\"card\" />").unwrap();
    assert_eq!(
        read_text_safe(&p, 1024).unwrap(),
        "<div className=\"card\" />"
    );
}

#[test]
fn test_read_binary() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("logo.png");
    let mut file = std::fs::File::create(&p).unwrap();
    file.write_all(b"\x89PNG\x00\x01").unwrap();
    assert!(matches!(read_text_safe(&p, 1024), Err(IoError::BinaryFile)));
}

#[test]
fn test_read_latin1_is_encoding_error() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("Legacy.jsx");
    std::fs::write(&p, b"// caf\xE9\nexport const A = () => <a />;\n").unwrap();
    assert!(matches!(read_text_safe(&p, 1024), Err(IoError::Encoding)));
}

#[test]
fn test_file_too_large() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("large.tsx");
    std::fs::write(&p, "12345678901234567890").unwrap();
    assert!(matches!(
        read_text_safe(&p, 10),
        Err(IoError::TooLarge(20, 10))
    ));
}

#[test]
fn test_file_not_found() {
    let result = read_text_safe("/nonexistent/App.tsx", 1024);
    assert!(matches!(result, Err(IoError::NotFound(_))));
}

#[test]
fn test_write_then_read() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("App.jsx");
    write_text(&p, "export const A = () => <a />;\n").unwrap();
    assert_eq!(
        read_text_safe(&p, 1024).unwrap(),
        "export const A = () => <a />;\n"
    );
}

#[test]
fn test_write_into_missing_dir_fails() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("missing").join("App.jsx");
    assert!(matches!(write_text(&p, "x"), Err(IoError::System(_))));
}
