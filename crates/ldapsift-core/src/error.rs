//! Errors raised while obtaining a capture log.
//!
//! Classification itself never fails; these only cover the input source.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for reading a capture log
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file is missing or could not be read
    #[error("cannot read capture log {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not UTF-8 text
    #[error(
        "capture log {} is not valid UTF-8 (first bad byte at offset {})",
        .path.display(),
        .valid_up_to
    )]
    NotUtf8 { path: PathBuf, valid_up_to: usize },

    /// The content exceeds the configured size ceiling
    #[error(
        "capture log {} is {} bytes, over the {} byte limit",
        .path.display(),
        .size,
        .limit
    )]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
}
