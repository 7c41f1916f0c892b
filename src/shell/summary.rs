//! Display data for the active selection.

use std::path::Path;

use crate::document::DocumentType;
use crate::utils::file_name;

const MB: f64 = 1024.0 * 1024.0;

/// One selected file as the file list shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Position in the selection, the index `remove_file` takes.
    pub index: usize,
    pub path: String,
    pub name: String,
    pub directory: String,
    /// `None` if the file no longer exists.
    pub size: Option<u64>,
}

impl FileEntry {
    pub(crate) fn new(index: usize, path: &str) -> Self {
        let p = Path::new(path);
        Self {
            index,
            path: path.to_string(),
            name: file_name(p),
            directory: p
                .parent()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
            size: std::fs::metadata(p).ok().filter(|m| m.is_file()).map(|m| m.len()),
        }
    }

    /// Second line of the entry: directory and size.
    pub fn detail(&self) -> String {
        match self.size {
            Some(size) => format!("{} • {:.1} MB", self.directory, size as f64 / MB),
            None => format!("{} • missing", self.directory),
        }
    }
}

/// Summary of the selection on the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    pub doc_type: DocumentType,
    pub entries: Vec<FileEntry>,
    /// Combined size of the files that exist.
    pub total_size: u64,
}

impl SelectionSummary {
    pub(crate) fn new(doc_type: DocumentType, paths: &[String]) -> Self {
        let entries: Vec<FileEntry> = paths
            .iter()
            .enumerate()
            .map(|(i, path)| FileEntry::new(i, path))
            .collect();
        let total_size = entries.iter().filter_map(|e| e.size).sum();

        Self {
            doc_type,
            entries,
            total_size,
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Heading of the file list, e.g. `Selected PDF Files (3)`.
    pub fn title(&self) -> String {
        format!("Selected {} Files ({})", self.doc_type.label(), self.count())
    }

    /// Text shown in place of an empty list.
    pub fn empty_text(&self) -> String {
        format!("No {} files selected yet", self.doc_type.label().to_lowercase())
    }

    /// Status line, e.g. `3 files • 1.2 MB total`.
    pub fn status(&self) -> String {
        if self.entries.is_empty() {
            return "No files selected".to_string();
        }
        format!(
            "{} files • {:.1} MB total",
            self.count(),
            self.total_size as f64 / MB
        )
    }
}
