//! Error types for format parsing and storage access.

use cmap_core::CmapError;
use std::io;
use thiserror::Error;

/// Result type for codec and storage operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur while loading, parsing, or writing color tables.
///
/// Parse failures are always reported as typed values; an empty map is a
/// valid result and is never used to signal an error.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Unknown colormap name or missing file.
    #[error("source not found: {0}")]
    SourceNotFound(String),

    /// File suffix present but not one of the supported formats.
    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// A line or field failed to parse.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number of the offending record.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A required field of a structured record is absent or unusable.
    #[error("invalid structured record: {0}")]
    InvalidStructuredRecord(String),

    /// Storage provider I/O failure other than not-found.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parsed data violated a color-map invariant.
    #[error(transparent)]
    Map(#[from] CmapError),
}
