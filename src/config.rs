//! Configuration for mergestudio.
//!
//! Holds where the session record lives and the knobs that shape merge
//! output. Defaults match what the desktop shell uses; `validate` rejects
//! values that would only fail later, mid-merge.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// File name of the session record.
pub const SESSION_FILE: &str = "session.json";

/// Name of the column that tags each merged row with its source file.
pub const SOURCE_COLUMN: &str = "Source_File";

/// Name of the worksheet in merged spreadsheets.
pub const SHEET_NAME: &str = "Sheet1";

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - preserves exact quality and structure.
    None,
    /// Compress content streams.
    #[default]
    Standard,
    /// Compress and drop unreferenced objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(Error::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Merge and session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Location of the session record.
    pub session_path: PathBuf,

    /// Compression applied to merged PDFs.
    pub compression: CompressionLevel,

    /// Column added to every merged spreadsheet row.
    pub source_column: String,

    /// Worksheet name of merged spreadsheets.
    pub sheet_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_path: PathBuf::from(SESSION_FILE),
            compression: CompressionLevel::default(),
            source_column: SOURCE_COLUMN.to_string(),
            sheet_name: SHEET_NAME.to_string(),
        }
    }
}

impl Config {
    /// Default configuration with the session record placed next to the
    /// running executable.
    ///
    /// Falls back to the working directory if the executable location
    /// cannot be determined.
    pub fn beside_executable() -> Self {
        let session_path = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(SESSION_FILE)))
            .unwrap_or_else(|| PathBuf::from(SESSION_FILE));

        Self {
            session_path,
            ..Self::default()
        }
    }

    /// Use a different session location.
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = path.into();
        self
    }

    /// Check the configuration for values that cannot work.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The session path is empty
    /// - The source column name is empty
    /// - The sheet name is empty, longer than 31 characters, or contains
    ///   one of `[ ] : * ? / \`
    pub fn validate(&self) -> Result<()> {
        if self.session_path.as_os_str().is_empty() {
            return Err(Error::invalid_config("Session path cannot be empty"));
        }

        if self.source_column.trim().is_empty() {
            return Err(Error::invalid_config("Source column name cannot be empty"));
        }

        let len = self.sheet_name.chars().count();
        if len == 0 || len > 31 {
            return Err(Error::invalid_config(format!(
                "Sheet name must be 1 to 31 characters: {:?}",
                self.sheet_name
            )));
        }

        if let Some(c) = self
            .sheet_name
            .chars()
            .find(|c| matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        {
            return Err(Error::invalid_config(format!(
                "Sheet name cannot contain '{c}': {:?}",
                self.sheet_name
            )));
        }

        Ok(())
    }
}
