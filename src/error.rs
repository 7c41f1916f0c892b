//! Error types for mergestudio.
//!
//! Errors are grouped by the kind of failure the user sees:
//!
//! - **Selection errors**: a merge was requested with nothing selected
//! - **File set errors**: an index outside the current selection
//! - **Merge errors**: an input could not be read or the output could not be written
//! - **Session errors**: the session record could not be read or written (logged only)

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentType;

/// Result type alias for mergestudio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    FileSet(#[from] FileSetError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error should ever reach the user.
    ///
    /// Session failures are logged and swallowed.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Session(_))
    }

    /// Single human-readable line for a dialog.
    pub fn user_message(&self) -> String {
        match self {
            Self::Selection(SelectionError::EmptyFileSet { doc_type }) => format!(
                "Please select {} files to merge.",
                doc_type.as_str().to_uppercase()
            ),
            Self::Merge(err) => format!("Failed to merge files:\n{err}"),
            other => other.to_string(),
        }
    }
}

/// Raised when a merge is attempted on an empty selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No {} files selected", .doc_type.label())]
    EmptyFileSet { doc_type: DocumentType },
}

/// Raised by file set mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileSetError {
    #[error("Index {index} is out of range for a selection of {len} file(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures while reading inputs or writing the merged output.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Not a file: {}", .path.display())]
    NotAFile { path: PathBuf },

    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf { path: PathBuf, reason: String },

    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", .path.display())]
    CorruptedPdf { path: PathBuf, details: String },

    #[error("PDF is encrypted and cannot be merged: {}", .path.display())]
    EncryptedPdf { path: PathBuf },

    #[error("Failed to read spreadsheet: {}\n  Reason: {reason}", .path.display())]
    FailedToReadSpreadsheet { path: PathBuf, reason: String },

    #[error("Spreadsheet has no worksheets: {}", .path.display())]
    EmptyWorkbook { path: PathBuf },

    #[error("Output file must have a .{expected} extension: {}", .path.display())]
    InvalidOutputExtension { path: PathBuf, expected: &'static str },

    #[error("Output directory does not exist: {}", .path.display())]
    OutputDirectoryMissing { path: PathBuf },

    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput { path: PathBuf, source: io::Error },

    #[error("Failed to write output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite { path: PathBuf, source: io::Error },

    #[error("Failed to write spreadsheet: {}\n  Reason: {reason}", .path.display())]
    FailedToWriteSpreadsheet { path: PathBuf, reason: String },

    #[error("Malformed page tree in {}: {reason}", .path.display())]
    PageTree { path: PathBuf, reason: String },

    #[error("Combined table has {rows} rows and {columns} columns, exceeding the worksheet limit")]
    RowLimitExceeded { rows: usize, columns: usize },
}

impl MergeError {
    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create a FailedToReadSpreadsheet error.
    pub fn failed_to_read_spreadsheet(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToReadSpreadsheet {
            path,
            reason: reason.into(),
        }
    }

    /// Create a PageTree error.
    pub fn page_tree(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::PageTree {
            path,
            reason: reason.into(),
        }
    }

    /// Path of the file that caused the failure, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::FileNotFound { path }
            | Self::NotAFile { path }
            | Self::FailedToLoadPdf { path, .. }
            | Self::CorruptedPdf { path, .. }
            | Self::EncryptedPdf { path }
            | Self::FailedToReadSpreadsheet { path, .. }
            | Self::EmptyWorkbook { path }
            | Self::InvalidOutputExtension { path, .. }
            | Self::OutputDirectoryMissing { path }
            | Self::FailedToCreateOutput { path, .. }
            | Self::FailedToWrite { path, .. }
            | Self::FailedToWriteSpreadsheet { path, .. }
            | Self::PageTree { path, .. } => Some(path),
            Self::RowLimitExceeded { .. } => None,
        }
    }
}

/// Failures reading or writing the session record.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to read session file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse session file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize session: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write session file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}
