//! The dialogs a desktop front end provides to the workbench.

use std::path::PathBuf;

use crate::document::FileFilter;
use crate::error::Error;
use crate::merge::MergeReport;
use crate::output::Progress;

/// Modal dialogs and progress display, supplied by the UI toolkit.
///
/// Every call blocks until the user has dismissed the dialog.
pub trait Dialogs {
    /// Ask for input files. An empty list means the user cancelled.
    fn pick_files(&mut self, filter: &FileFilter, title: &str) -> Vec<PathBuf>;

    /// Ask where to save the output. `None` means the user cancelled.
    ///
    /// `default_extension` (e.g. `.pdf`) is appended by the picker when the
    /// user types a bare name.
    fn pick_save_path(
        &mut self,
        filter: &FileFilter,
        title: &str,
        default_extension: &str,
    ) -> Option<PathBuf>;

    fn warn(&mut self, title: &str, message: &str);

    fn error(&mut self, title: &str, message: &str);

    fn info(&mut self, title: &str, message: &str);

    /// Show a progress update while a merge runs.
    fn progress(&mut self, progress: &Progress);
}

/// How a merge request ended.
#[derive(Debug)]
pub enum MergeOutcome {
    /// The output was written.
    Merged(MergeReport),
    /// The active selection was empty; nothing was asked or written.
    NothingSelected,
    /// The user dismissed the save picker.
    Cancelled,
    /// The merge failed; the selection is unchanged.
    Failed(Error),
}

impl MergeOutcome {
    pub fn is_merged(&self) -> bool {
        matches!(self, Self::Merged(_))
    }
}
