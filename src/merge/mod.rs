//! Merge operations.
//!
//! This module provides:
//! - [`MergeJob`]: one merge request (document type, ordered inputs, output)
//! - [`Merger`]: the contract both concrete mergers implement
//! - [`PdfMerger`] and [`SpreadsheetMerger`]
//! - [`MergeReport`]: what a successful merge produced
//!
//! A merge either writes the complete output or leaves the destination
//! untouched: every input is checked and loaded before the first byte is
//! written, and the output is staged beside the destination.

pub mod pages;
pub mod pdf;
pub mod spreadsheet;

pub use pdf::PdfMerger;
pub use spreadsheet::SpreadsheetMerger;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::document::DocumentType;
use crate::error::{Result, SelectionError};
use crate::output::ProgressObserver;
use crate::utils::format_file_size;

/// Combines an ordered list of same-type files into one output file.
pub trait Merger {
    /// Type of document this merger reads and writes.
    fn doc_type(&self) -> DocumentType;

    /// Merge `inputs`, in order, into `output`.
    ///
    /// # Errors
    ///
    /// - [`SelectionError`] if `inputs` is empty
    /// - [`MergeError`](crate::error::MergeError) if an input cannot be read
    ///   or the output cannot be written; `output` is then left as it was
    fn merge(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        progress: &mut dyn ProgressObserver,
    ) -> Result<MergeReport>;
}

/// What ended up in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergedContent {
    Pages(usize),
    Table { rows: usize, columns: usize },
}

/// Outcome of a successful merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub doc_type: DocumentType,
    pub files_merged: usize,
    pub output: PathBuf,
    pub content: MergedContent,
    /// Size of the written file in bytes.
    pub output_size: u64,
    pub elapsed: Duration,
}

impl MergeReport {
    /// Success message for the user.
    pub fn summary(&self) -> String {
        format!(
            "Successfully merged {} {} files!\n\nSaved to: {}",
            self.files_merged,
            self.doc_type.label(),
            self.output.display()
        )
    }

    /// One-line description for logs and status bars.
    pub fn details(&self) -> String {
        let content = match self.content {
            MergedContent::Pages(pages) => format!("{pages} pages"),
            MergedContent::Table { rows, columns } => format!("{rows} rows x {columns} columns"),
        };
        format!(
            "{content}, {} in {:.2}s",
            format_file_size(self.output_size),
            self.elapsed.as_secs_f64()
        )
    }
}

/// A single merge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeJob {
    doc_type: DocumentType,
    inputs: Vec<PathBuf>,
    output: PathBuf,
}

impl MergeJob {
    /// Create a job.
    ///
    /// # Errors
    ///
    /// [`SelectionError::EmptyFileSet`] if there are no inputs.
    pub fn new<I, P>(
        doc_type: DocumentType,
        inputs: I,
        output: impl Into<PathBuf>,
    ) -> std::result::Result<Self, SelectionError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let inputs: Vec<PathBuf> = inputs.into_iter().map(Into::into).collect();
        if inputs.is_empty() {
            return Err(SelectionError::EmptyFileSet { doc_type });
        }

        Ok(Self {
            doc_type,
            inputs,
            output: output.into(),
        })
    }

    pub fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// The merger for this job's document type.
    pub fn merger(&self, config: &Config) -> Box<dyn Merger> {
        match self.doc_type {
            DocumentType::Pdf => Box::new(PdfMerger::new(config.compression)),
            DocumentType::Spreadsheet => Box::new(SpreadsheetMerger::from_config(config)),
        }
    }

    /// Run the job to completion.
    pub fn run(&self, config: &Config, progress: &mut dyn ProgressObserver) -> Result<MergeReport> {
        self.merger(config).merge(&self.inputs, &self.output, progress)
    }
}
