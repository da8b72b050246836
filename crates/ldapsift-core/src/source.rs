//! Loading capture logs from files or streams.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

/// Label used for logs read from standard input
pub const STDIN_LABEL: &str = "<stdin>";

/// Read a capture log from a file
///
/// `max_bytes` of `None` reads the whole file.
pub fn read_log(path: &Path, max_bytes: Option<u64>) -> Result<String, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    // Reject oversized files before reading them
    if let (Some(limit), Ok(meta)) = (max_bytes, file.metadata()) {
        if meta.len() > limit {
            return Err(SourceError::TooLarge {
                path: path.to_path_buf(),
                size: meta.len(),
                limit,
            });
        }
    }

    read_log_from(file, path, max_bytes)
}

/// Read a capture log from any reader
///
/// With a limit, at most `limit + 1` bytes are read; the reported size is
/// then the number of bytes read before stopping. `label` names the source
/// in errors.
pub fn read_log_from<R: Read>(
    mut reader: R,
    label: impl AsRef<Path>,
    max_bytes: Option<u64>,
) -> Result<String, SourceError> {
    let label: PathBuf = label.as_ref().to_path_buf();
    let mut buf = Vec::new();
    let read = match max_bytes {
        Some(limit) => reader
            .by_ref()
            .take(limit.saturating_add(1))
            .read_to_end(&mut buf),
        None => reader.read_to_end(&mut buf),
    };
    read.map_err(|source| SourceError::Unreadable {
        path: label.clone(),
        source,
    })?;

    if let Some(limit) = max_bytes {
        if buf.len() as u64 > limit {
            return Err(SourceError::TooLarge {
                path: label,
                size: buf.len() as u64,
                limit,
            });
        }
    }

    let text = String::from_utf8(buf).map_err(|e| SourceError::NotUtf8 {
        path: label.clone(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })?;

    tracing::debug!(source = %label.display(), bytes = text.len(), "Capture log loaded");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_log_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"LDAPMessage searchRequest\n").unwrap();
        let text = read_log(file.path(), Some(1024)).unwrap();
        assert_eq!(text, "LDAPMessage searchRequest\n");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_log(&dir.path().join("ldap_log.txt"), None).unwrap_err();
        assert!(matches!(err, SourceError::Unreadable { .. }));
        assert!(err.to_string().contains("ldap_log.txt"));
    }

    #[test]
    fn test_file_over_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'x'; 64]).unwrap();
        let err = read_log(file.path(), Some(16)).unwrap_err();
        assert!(matches!(
            err,
            SourceError::TooLarge {
                size: 64,
                limit: 16,
                ..
            }
        ));
        assert!(err.to_string().contains("64 bytes"));
    }

    #[test]
    fn test_reader_over_limit() {
        let data = vec![b'x'; 17];
        let err = read_log_from(&data[..], STDIN_LABEL, Some(16)).unwrap_err();
        assert!(matches!(err, SourceError::TooLarge { size: 17, .. }));
    }

    #[test]
    fn test_reader_exactly_at_limit() {
        let data = vec![b'x'; 16];
        assert_eq!(read_log_from(&data[..], STDIN_LABEL, Some(16)).unwrap().len(), 16);
    }

    #[test]
    fn test_no_limit_reads_everything() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'x'; 4096]).unwrap();
        assert_eq!(read_log(file.path(), None).unwrap().len(), 4096);
    }

    #[test]
    fn test_invalid_utf8() {
        let data = b"searchResEntry \xff\xfe";
        let err = read_log_from(&data[..], STDIN_LABEL, Some(1024)).unwrap_err();
        match err {
            SourceError::NotUtf8 { valid_up_to, .. } => assert_eq!(valid_up_to, 15),
            other => panic!("Expected NotUtf8, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert_eq!(read_log_from(&b""[..], STDIN_LABEL, None).unwrap(), "");
    }
}
