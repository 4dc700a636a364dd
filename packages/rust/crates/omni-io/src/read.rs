//! Guarded reads of source files.

use std::fs;
use std::io::Read;
use std::path::Path;

use memchr::memchr;

use crate::error::IoError;

const BINARY_CHECK_LEN: usize = 8192;

/// Read text from a file with size and binary checks.
///
/// # Errors
/// `NotFound` when the path cannot be stat'ed, `TooLarge` above `max_bytes`,
/// `BinaryFile` when NULL bytes appear in the first 8KB, `Encoding` when the
/// content is not valid UTF-8.
pub fn read_text_safe<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata =
        fs::metadata(path).map_err(|_| IoError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
    file.read_to_end(&mut buffer)?;

    decode_buffer(buffer)
}

/// Quick binary detection: NULL bytes in the first 8KB.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = buffer.len().min(BINARY_CHECK_LEN);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Decode bytes to a String.
///
/// Invalid UTF-8 is rejected, never replaced.
///
/// # Errors
/// Returns `IoError::BinaryFile` when binary content is detected and
/// `IoError::Encoding` when the bytes are not valid UTF-8.
pub fn decode_buffer(buffer: Vec<u8>) -> Result<String, IoError> {
    if is_binary(&buffer) {
        return Err(IoError::BinaryFile);
    }

    String::from_utf8(buffer).map_err(|_| IoError::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_binary() {
        assert!(is_binary(b"abc\x00def"));
        assert!(!is_binary(b"<div className=\"card\" />"));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode_buffer(vec![b'o', b'k', 0xFF]).unwrap_err();
        assert!(matches!(err, IoError::Encoding));
    }

    #[test]
    fn test_decode_keeps_multibyte_text() {
        let decoded = decode_buffer("caf\u{e9} \u{2014}".as_bytes().to_vec()).unwrap();
        assert_eq!(decoded, "caf\u{e9} \u{2014}");
    }
}
