//! Spreadsheet concatenation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::config::{Config, SHEET_NAME, SOURCE_COLUMN};
use crate::document::DocumentType;
use crate::error::{MergeError, Result, SelectionError};
use crate::io::{read_first_sheet, write_table};
use crate::merge::{MergeReport, MergedContent, Merger};
use crate::output::{Progress, ProgressObserver};
use crate::table::{Cell, Table};
use crate::utils::file_name;
use crate::validation::Validator;

/// Share of the progress range spent reading inputs.
const LOAD_SPAN: f64 = 0.8;

/// Stacks the first worksheet of each input into one table, tagging every
/// row with the name of the file it came from.
#[derive(Debug, Clone)]
pub struct SpreadsheetMerger {
    source_column: String,
    sheet_name: String,
}

impl Default for SpreadsheetMerger {
    fn default() -> Self {
        Self {
            source_column: SOURCE_COLUMN.to_string(),
            sheet_name: SHEET_NAME.to_string(),
        }
    }
}

impl SpreadsheetMerger {
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_column: config.source_column.clone(),
            sheet_name: config.sheet_name.clone(),
        }
    }

    /// Read every input, in order, and tag its rows.
    fn load_all(
        &self,
        inputs: &[PathBuf],
        progress: &mut dyn ProgressObserver,
    ) -> std::result::Result<Vec<Table>, MergeError> {
        let total = inputs.len();
        let mut tables = Vec::with_capacity(total);

        for (i, path) in inputs.iter().enumerate() {
            let name = file_name(path);
            progress.update(
                &Progress::processing(i + 1, total, name.clone(), LOAD_SPAN)
                    .with_message(format!("Reading {name}...")),
            );

            let mut table = read_first_sheet(path)?;
            table.fill_column(&self.source_column, Cell::text(name));
            tables.push(table);
        }

        Ok(tables)
    }

    /// Stack `tables` and put the tag column last.
    pub fn combine(&self, tables: Vec<Table>) -> Table {
        let mut combined = Table::concat(tables);
        combined.move_column_last(&self.source_column);
        combined
    }
}

impl Merger for SpreadsheetMerger {
    fn doc_type(&self) -> DocumentType {
        DocumentType::Spreadsheet
    }

    fn merge(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        progress: &mut dyn ProgressObserver,
    ) -> Result<MergeReport> {
        if inputs.is_empty() {
            return Err(SelectionError::EmptyFileSet {
                doc_type: DocumentType::Spreadsheet,
            }
            .into());
        }

        let start = Instant::now();
        let validator = Validator::new(DocumentType::Spreadsheet);
        validator.validate_output(output)?;
        let summary = validator.validate_inputs(inputs)?;

        info!(
            files = inputs.len(),
            size = %summary.format_total_size(),
            output = %output.display(),
            "Merging spreadsheets"
        );

        let tables = self.load_all(inputs, progress)?;

        progress.update(&Progress::combining());
        let combined = self.combine(tables);
        debug!(
            rows = combined.row_count(),
            columns = combined.column_count(),
            "Tables combined"
        );

        progress.update(&Progress::writing("Excel file"));
        let stats = write_table(&combined, output, &self.sheet_name)?;
        progress.update(&Progress::complete());

        let report = MergeReport {
            doc_type: DocumentType::Spreadsheet,
            files_merged: inputs.len(),
            output: output.to_path_buf(),
            content: MergedContent::Table {
                rows: combined.row_count(),
                columns: combined.column_count(),
            },
            output_size: stats.file_size,
            elapsed: start.elapsed(),
        };
        info!(
            rows = combined.row_count(),
            size = %stats.format_file_size(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Spreadsheet merge complete"
        );
        Ok(report)
    }
}
