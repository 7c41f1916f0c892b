//! In-memory file selections, one ordered list per document type.
//!
//! Paths are kept as the exact strings they were added with; two entries are
//! duplicates only if the strings are equal. Insertion order is merge order.

use std::collections::HashMap;

use crate::document::DocumentType;
use crate::error::FileSetError;
use crate::session::Session;

/// Ordered, duplicate-free selections keyed by document type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSetManager {
    sets: HashMap<DocumentType, Vec<String>>,
}

impl FileSetManager {
    /// Create a manager with empty selections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild selections from a persisted session.
    ///
    /// Entries go through [`add`](Self::add), so duplicates in a hand-edited
    /// session file collapse to their first occurrence.
    pub fn from_session(session: &Session) -> Self {
        let mut manager = Self::new();
        manager.add(DocumentType::Pdf, session.pdf_files.iter().cloned());
        manager.add(DocumentType::Spreadsheet, session.excel_files.iter().cloned());
        manager
    }

    /// Snapshot the selections together with the active tab.
    pub fn snapshot(&self, current_tab: DocumentType) -> Session {
        Session {
            pdf_files: self.list(DocumentType::Pdf).to_vec(),
            excel_files: self.list(DocumentType::Spreadsheet).to_vec(),
            current_tab,
        }
    }

    /// Append every path not already selected for `doc_type`, keeping the
    /// given order. Returns how many were added.
    pub fn add<I>(&mut self, doc_type: DocumentType, paths: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let set = self.sets.entry(doc_type).or_default();
        let before = set.len();

        for path in paths {
            let path = path.into();
            if !set.contains(&path) {
                set.push(path);
            }
        }

        set.len() - before
    }

    /// Remove the path at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`FileSetError::IndexOutOfRange`] without touching the
    /// selection if `index` is not a valid position.
    pub fn remove(&mut self, doc_type: DocumentType, index: usize) -> Result<String, FileSetError> {
        let set = self.sets.entry(doc_type).or_default();
        if index >= set.len() {
            return Err(FileSetError::IndexOutOfRange {
                index,
                len: set.len(),
            });
        }
        Ok(set.remove(index))
    }

    /// Empty the selection for `doc_type`.
    pub fn clear(&mut self, doc_type: DocumentType) {
        if let Some(set) = self.sets.get_mut(&doc_type) {
            set.clear();
        }
    }

    /// Selected paths for `doc_type`, in merge order.
    pub fn list(&self, doc_type: DocumentType) -> &[String] {
        self.sets.get(&doc_type).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self, doc_type: DocumentType) -> usize {
        self.list(doc_type).len()
    }

    pub fn is_empty(&self, doc_type: DocumentType) -> bool {
        self.list(doc_type).is_empty()
    }

    pub fn contains(&self, doc_type: DocumentType, path: &str) -> bool {
        self.list(doc_type).iter().any(|p| p == path)
    }
}
