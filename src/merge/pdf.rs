//! PDF concatenation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use lopdf::Document;
use tracing::{debug, info};

use crate::config::CompressionLevel;
use crate::document::DocumentType;
use crate::error::{MergeError, Result, SelectionError};
use crate::io::{LoadedPdf, PdfReader, PdfWriter};
use crate::merge::pages;
use crate::merge::{MergeReport, MergedContent, Merger};
use crate::output::{Progress, ProgressObserver};
use crate::utils::file_name;
use crate::validation::Validator;

/// Share of the progress range spent loading inputs.
const LOAD_SPAN: f64 = 0.9;

/// Concatenates the pages of PDF files, in input order.
#[derive(Debug, Clone, Default)]
pub struct PdfMerger {
    reader: PdfReader,
    compression: CompressionLevel,
}

impl PdfMerger {
    pub fn new(compression: CompressionLevel) -> Self {
        Self {
            reader: PdfReader::new(),
            compression,
        }
    }

    /// Load every input, in order, before anything is written.
    fn load_all(
        &self,
        inputs: &[PathBuf],
        progress: &mut dyn ProgressObserver,
    ) -> std::result::Result<Vec<LoadedPdf>, MergeError> {
        let total = inputs.len();
        let mut loaded = Vec::with_capacity(total);

        for (i, path) in inputs.iter().enumerate() {
            progress.update(&Progress::processing(i + 1, total, file_name(path), LOAD_SPAN));

            let pdf = self.reader.load(path)?;
            debug!(
                path = %path.display(),
                pages = pdf.page_count,
                objects = pdf.document.objects.len(),
                load_ms = pdf.load_time.as_millis() as u64,
                "PDF loaded"
            );
            loaded.push(pdf);
        }

        Ok(loaded)
    }

    /// Append the pages of `docs` to the first of them.
    fn concatenate(docs: Vec<LoadedPdf>) -> std::result::Result<Document, MergeError> {
        let mut docs = docs.into_iter();
        let Some(base) = docs.next() else {
            return Ok(Document::with_version("1.5"));
        };

        let mut merged = base.document;
        pages::materialize_inherited(&mut merged)
            .and_then(|()| pages::clear_root_inherited(&mut merged))
            .map_err(|e| MergeError::page_tree(base.path.clone(), e.to_string()))?;
        let mut max_id = merged.max_id;

        for LoadedPdf {
            mut document, path, ..
        } in docs
        {
            pages::materialize_inherited(&mut document)
                .map_err(|e| MergeError::page_tree(path.clone(), e.to_string()))?;

            // Avoid object id collisions by renumbering the incoming document
            document.renumber_objects_with(max_id + 1);
            max_id = document.max_id;

            let page_ids = pages::page_ids(&document);
            merged.objects.extend(document.objects);
            merged.max_id = max_id;

            pages::append_pages(&mut merged, &page_ids)
                .map_err(|e| MergeError::page_tree(path.clone(), e.to_string()))?;

            debug!(path = %path.display(), pages = page_ids.len(), "Pages appended");
        }

        Ok(merged)
    }

    fn finish(&self, doc: &mut Document) {
        if self.compression == CompressionLevel::Maximum {
            let pruned = doc.prune_objects();
            debug!(objects = pruned.len(), "Unreferenced objects removed");
        }

        doc.renumber_objects();

        if self.compression != CompressionLevel::None {
            doc.compress();
        }
    }
}

impl Merger for PdfMerger {
    fn doc_type(&self) -> DocumentType {
        DocumentType::Pdf
    }

    fn merge(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        progress: &mut dyn ProgressObserver,
    ) -> Result<MergeReport> {
        if inputs.is_empty() {
            return Err(SelectionError::EmptyFileSet {
                doc_type: DocumentType::Pdf,
            }
            .into());
        }

        let start = Instant::now();
        let validator = Validator::new(DocumentType::Pdf);
        validator.validate_output(output)?;
        let summary = validator.validate_inputs(inputs)?;

        info!(
            files = inputs.len(),
            size = %summary.format_total_size(),
            output = %output.display(),
            "Merging PDF files"
        );

        let loaded = self.load_all(inputs, progress)?;
        let mut merged = Self::concatenate(loaded)?;
        self.finish(&mut merged);
        let page_count = merged.get_pages().len();

        progress.update(&Progress::writing("PDF"));
        let stats = PdfWriter::new().save(&mut merged, output)?;
        progress.update(&Progress::complete());

        let report = MergeReport {
            doc_type: DocumentType::Pdf,
            files_merged: inputs.len(),
            output: output.to_path_buf(),
            content: MergedContent::Pages(page_count),
            output_size: stats.file_size,
            elapsed: start.elapsed(),
        };
        info!(
            pages = page_count,
            size = %stats.format_file_size(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "PDF merge complete"
        );
        Ok(report)
    }
}
