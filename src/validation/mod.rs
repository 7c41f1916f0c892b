//! Pre-merge checks.
//!
//! Everything here runs before the output path is touched:
//! - Input existence and file-type checks
//! - Output extension and directory checks
//!
//! Format-level checks (PDF parses, has pages, is not encrypted; workbook
//! has a sheet) happen while loading, which also completes before any write.

use std::path::{Path, PathBuf};

use crate::document::DocumentType;
use crate::error::MergeError;
use crate::io::check_input;
use crate::utils::{format_file_size, has_extension};

/// Totals over a validated input list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Number of inputs that passed.
    pub files_validated: usize,

    /// Combined size of the inputs in bytes.
    pub total_size: u64,
}

impl ValidationSummary {
    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for the inputs and output of one merge.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    doc_type: DocumentType,
}

impl Validator {
    pub fn new(doc_type: DocumentType) -> Self {
        Self { doc_type }
    }

    /// Check that every input exists and is a regular file.
    ///
    /// Stops at the first failure.
    pub fn validate_inputs(&self, paths: &[PathBuf]) -> Result<ValidationSummary, MergeError> {
        let mut summary = ValidationSummary::default();

        for path in paths {
            check_input(path)?;
            summary.files_validated += 1;
            summary.total_size += std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        }

        Ok(summary)
    }

    /// Check the output path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The extension is not the output extension of the document type
    /// - The parent directory does not exist
    pub fn validate_output(&self, path: &Path) -> Result<(), MergeError> {
        let expected = self.doc_type.output_extension();
        if !has_extension(path, expected) {
            return Err(MergeError::InvalidOutputExtension {
                path: path.to_path_buf(),
                expected,
            });
        }

        // A bare file name lands in the working directory.
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            return Err(MergeError::OutputDirectoryMissing {
                path: parent.to_path_buf(),
            });
        }

        Ok(())
    }
}
