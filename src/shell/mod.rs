//! The service a desktop front end drives.
//!
//! [`Workbench`] owns the selections, the session store, the configuration
//! and the active tab. The front end renders what it reports and supplies
//! its dialogs through [`Dialogs`]; it keeps no state of its own.
//!
//! Every change to a selection or to the active tab is saved to the
//! session record straight away.

pub mod dialogs;
pub mod summary;

pub use dialogs::{Dialogs, MergeOutcome};
pub use summary::{FileEntry, SelectionSummary};

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::document::DocumentType;
use crate::error::{Error, Result, SelectionError};
use crate::fileset::FileSetManager;
use crate::merge::MergeJob;
use crate::output::Progress;
use crate::session::SessionStore;

/// Selections, session and merge flow behind the two document tabs.
#[derive(Debug)]
pub struct Workbench {
    config: Config,
    store: SessionStore,
    files: FileSetManager,
    current_tab: DocumentType,
}

impl Workbench {
    /// Validate `config` and restore the previous session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid. A missing or
    /// unreadable session is not an error; it yields empty selections.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let store = SessionStore::new(config.session_path.clone());
        let session = store.load_or_default();
        info!(
            session = %store.path().display(),
            pdf_files = session.pdf_files.len(),
            excel_files = session.excel_files.len(),
            tab = %session.current_tab,
            "Session restored"
        );

        Ok(Self {
            files: FileSetManager::from_session(&session),
            current_tab: session.current_tab,
            store,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn current_tab(&self) -> DocumentType {
        self.current_tab
    }

    pub fn file_sets(&self) -> &FileSetManager {
        &self.files
    }

    /// Selected paths on the active tab, in merge order.
    pub fn files(&self) -> &[String] {
        self.files.list(self.current_tab)
    }

    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary::new(self.current_tab, self.files())
    }

    pub fn switch_tab(&mut self, tab: DocumentType) {
        self.current_tab = tab;
        self.persist();
    }

    /// Ask for files of the active type and add them.
    ///
    /// Returns how many were new.
    pub fn select_files(&mut self, dialogs: &mut dyn Dialogs) -> usize {
        let filter = self.current_tab.input_filter();
        let title = format!("Select {} files to merge", self.current_tab.label());

        let picked = dialogs.pick_files(&filter, &title);
        if picked.is_empty() {
            return 0;
        }
        self.add_files(picked)
    }

    /// Add paths to the active selection, skipping ones already selected,
    /// ones whose extension does not fit the active type and ones that are
    /// not valid UTF-8.
    ///
    /// Returns how many were new.
    pub fn add_files<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let filter = self.current_tab.input_filter();
        let accepted: Vec<String> = paths
            .into_iter()
            .filter_map(|path| {
                let path = path.as_ref();
                if !filter.matches(path) {
                    warn!(
                        path = %path.display(),
                        tab = %self.current_tab,
                        "Ignoring file of the wrong type"
                    );
                    return None;
                }
                // Selections are stored as text; a lossy copy would name a different file.
                let Some(text) = path.to_str() else {
                    warn!(path = %path.display(), "Ignoring path that is not valid UTF-8");
                    return None;
                };
                Some(text.to_string())
            })
            .collect();

        let added = self.files.add(self.current_tab, accepted);
        self.persist();
        added
    }

    /// Remove the file at `index` from the active selection.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the selection as it was, if `index` is out
    /// of range.
    pub fn remove_file(&mut self, index: usize) -> Result<String> {
        let removed = self.files.remove(self.current_tab, index)?;
        self.persist();
        Ok(removed)
    }

    /// Empty the active selection.
    pub fn clear(&mut self) {
        self.files.clear(self.current_tab);
        self.persist();
    }

    /// Merge the active selection into a file the user picks.
    ///
    /// Outcomes are also reported through `dialogs`: a warning for an empty
    /// selection, an error with the cause for a failed merge, and the
    /// success message otherwise. The selection is kept in every case.
    pub fn merge_files(&mut self, dialogs: &mut dyn Dialogs) -> MergeOutcome {
        let tab = self.current_tab;
        if self.files.is_empty(tab) {
            return Self::nothing_selected(dialogs, SelectionError::EmptyFileSet { doc_type: tab });
        }

        let title = format!("Save merged {} file", tab.label());
        let extension = format!(".{}", tab.output_extension());
        let Some(output) = dialogs.pick_save_path(&tab.output_filter(), &title, &extension) else {
            return MergeOutcome::Cancelled;
        };

        let job = match MergeJob::new(tab, self.files().iter().map(PathBuf::from), output) {
            Ok(job) => job,
            Err(err) => return Self::nothing_selected(dialogs, err),
        };

        let result = {
            let mut observer = |p: &Progress| dialogs.progress(p);
            job.run(&self.config, &mut observer)
        };

        match result {
            Ok(report) => {
                dialogs.info("Success", &report.summary());
                MergeOutcome::Merged(report)
            }
            Err(err) => {
                warn!(error = %err, "Merge failed");
                dialogs.error("Error", &err.user_message());
                MergeOutcome::Failed(err)
            }
        }
    }

    fn nothing_selected(dialogs: &mut dyn Dialogs, err: SelectionError) -> MergeOutcome {
        dialogs.warn("No Files", &Error::from(err).user_message());
        MergeOutcome::NothingSelected
    }

    fn persist(&self) {
        self.store.save(&self.files.snapshot(self.current_tab));
    }
}
