use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Not valid UTF-8 text: {0}")]
    InvalidText(String),
    #[error("I/O error: {0}")]
    GenericIo(#[from] io::Error),
}

/// Reads the whole input file as text, tabs and newlines untouched.
pub fn read_input(path: &Path) -> Result<String, InputError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => InputError::FileNotFound(path.display().to_string()),
        io::ErrorKind::PermissionDenied => InputError::PermissionDenied(path.display().to_string()),
        io::ErrorKind::InvalidData => InputError::InvalidText(path.display().to_string()),
        _ => InputError::GenericIo(e),
    })?;

    debug!(path = %path.display(), bytes = text.len(), "read input");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_preserves_tabs_and_newlines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("input.txt");
        fs::write(&path, "a\tb\r\nc\n").unwrap();

        assert_eq!(read_input(&path).unwrap(), "a\tb\r\nc\n");
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        match read_input(&path) {
            Err(InputError::FileNotFound(p)) => assert!(p.ends_with("missing.txt")),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.bin");
        fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();

        assert!(matches!(read_input(&path), Err(InputError::InvalidText(_))));
    }
}
