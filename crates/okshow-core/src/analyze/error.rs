//! Error types for reading an ok-file.

use miette::Diagnostic;
use thiserror::Error;

/// A source location (line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub column: usize,
}

/// Fatal errors. Everything else is reported as a warning or a resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum ShowError {
    /// The input is not valid UTF-8.
    #[error("invalid UTF-8 at {}:{}", .location.line, .location.column)]
    #[diagnostic(
        code(okshow::encoding),
        help("UTF-8 (unicode) should be used as sole encoding for .ok-files")
    )]
    Encoding {
        /// Position of the first invalid byte.
        location: SourceLocation,
        /// Number of leading bytes that decoded fine.
        valid_up_to: usize,
        /// The offending bytes, if the decoder could delimit them.
        invalid: Vec<u8>,
    },
}

/// Decode raw input bytes.
///
/// # Errors
///
/// Returns [`ShowError::Encoding`] pointing at the first invalid byte.
pub fn decode(bytes: &[u8]) -> Result<&str, ShowError> {
    std::str::from_utf8(bytes).map_err(|err| {
        let valid_up_to = err.valid_up_to();
        let invalid_len = err.error_len().unwrap_or(bytes.len() - valid_up_to);
        let valid = String::from_utf8_lossy(&bytes[..valid_up_to]);
        ShowError::Encoding {
            location: offset_to_location(&valid, valid_up_to),
            valid_up_to,
            invalid: bytes[valid_up_to..valid_up_to + invalid_len].to_vec(),
        }
    })
}

/// Compute line and column from a byte offset in source.
fn offset_to_location(source: &str, offset: usize) -> SourceLocation {
    let mut line = 1;
    let mut col = 1;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    SourceLocation { line, column: col }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid() {
        assert_eq!(decode(b"ls -la\n").unwrap(), "ls -la\n");
    }

    #[test]
    fn test_decode_reports_location() {
        let bytes = b"echo a\nbuild: make \xff\n";
        let err = decode(bytes).unwrap_err();
        let ShowError::Encoding {
            location,
            valid_up_to,
            invalid,
        } = err;
        assert_eq!(location, SourceLocation { line: 2, column: 13 });
        assert_eq!(valid_up_to, 19);
        assert_eq!(invalid, vec![0xff]);
    }

    #[test]
    fn test_decode_truncated_sequence() {
        let bytes = b"caf\xc3";
        let ShowError::Encoding { invalid, .. } = decode(bytes).unwrap_err();
        assert_eq!(invalid, vec![0xc3]);
    }

    #[test]
    fn test_error_message() {
        let err = decode(b"\xfe").unwrap_err();
        assert_eq!(err.to_string(), "invalid UTF-8 at 1:1");
    }
}
