//! Session persistence.
//!
//! The session is a small JSON record holding both selections and the active
//! tab:
//!
//! ```json
//! {"pdf_files": ["/a.pdf"], "excel_files": [], "current_tab": "pdf"}
//! ```
//!
//! A missing record means "no prior session". An unreadable or malformed
//! record is logged and treated the same way; session I/O never interrupts
//! the caller.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::document::DocumentType;
use crate::error::SessionError;
use crate::io::StagedFile;

/// Persisted snapshot of the selections and the active document type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub pdf_files: Vec<String>,

    #[serde(default)]
    pub excel_files: Vec<String>,

    #[serde(default, deserialize_with = "lenient_tab")]
    pub current_tab: DocumentType,
}

impl Session {
    /// Selected paths for `doc_type`.
    pub fn files(&self, doc_type: DocumentType) -> &[String] {
        match doc_type {
            DocumentType::Pdf => &self.pdf_files,
            DocumentType::Spreadsheet => &self.excel_files,
        }
    }
}

/// An unknown tab name falls back to the default tab instead of discarding
/// the whole record.
fn lenient_tab<'de, D>(deserializer: D) -> Result<DocumentType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref() {
        Some("excel") => DocumentType::Spreadsheet,
        Some("pdf") | None => DocumentType::Pdf,
        Some(other) => {
            warn!(tab = other, "Unknown tab in session file, using pdf");
            DocumentType::Pdf
        }
    })
}

/// Reads and writes the session record at a fixed location.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previous session.
    ///
    /// Returns `None` when there is no record or it cannot be read or parsed.
    /// Failures are logged, never returned.
    pub fn load(&self) -> Option<Session> {
        match self.try_load() {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "Could not load session");
                None
            }
        }
    }

    /// Like [`load`](Self::load) but falls back to the default session.
    pub fn load_or_default(&self) -> Session {
        self.load().unwrap_or_default()
    }

    /// Load the previous session, reporting why it could not be read.
    pub fn try_load(&self) -> Result<Option<Session>, SessionError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No session file");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| SessionError::Read {
            path: self.path.clone(),
            source,
        })?;

        let session = serde_json::from_str(&content).map_err(|source| SessionError::Parse {
            path: self.path.clone(),
            source,
        })?;

        Ok(Some(session))
    }

    /// Persist `session`. Failures are logged and otherwise ignored.
    pub fn save(&self, session: &Session) {
        if let Err(err) = self.try_save(session) {
            warn!(error = %err, "Could not save session");
        }
    }

    /// Persist `session`, replacing the previous record only once the new
    /// one is fully written.
    pub fn try_save(&self, session: &Session) -> Result<(), SessionError> {
        let content = serde_json::to_vec(session).map_err(SessionError::Serialize)?;

        let staged = StagedFile::create(&self.path).map_err(|source| SessionError::Write {
            path: self.path.clone(),
            source,
        })?;
        staged
            .write_all_and_commit(&content)
            .map_err(|source| SessionError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }
}
