//! Document types and the file filters that go with them.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kind of document a file set holds.
///
/// Serialized as `"pdf"` / `"excel"`, which is also the value stored as the
/// session's active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentType {
    #[default]
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "excel")]
    Spreadsheet,
}

impl DocumentType {
    /// Both document types, in tab order.
    pub const ALL: [DocumentType; 2] = [DocumentType::Pdf, DocumentType::Spreadsheet];

    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Spreadsheet => "excel",
        }
    }

    /// Name used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Spreadsheet => "Excel",
        }
    }

    /// File extensions accepted as merge inputs.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Pdf => &["pdf"],
            Self::Spreadsheet => &["xlsx", "xls"],
        }
    }

    /// Extension the merged output is written with.
    pub fn output_extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Spreadsheet => "xlsx",
        }
    }

    /// Filter for the input file picker.
    pub fn input_filter(&self) -> FileFilter {
        FileFilter::new(format!("{} files", self.label()), self.extensions())
    }

    /// Filter for the save picker.
    pub fn output_filter(&self) -> FileFilter {
        FileFilter::new(
            format!("{} file", self.label()),
            &[self.output_extension()],
        )
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "excel" | "spreadsheet" => Ok(Self::Spreadsheet),
            _ => Err(Error::invalid_config(format!(
                "Unknown document type: {s}. Must be one of: pdf, excel"
            ))),
        }
    }
}

/// Case-insensitive extension filter, e.g. `*.xlsx` + `*.xls`.
#[derive(Debug, Clone)]
pub struct FileFilter {
    description: String,
    patterns: Vec<String>,
    set: GlobSet,
}

impl FileFilter {
    fn new(description: String, extensions: &[&str]) -> Self {
        let patterns: Vec<String> = extensions.iter().map(|ext| format!("*.{ext}")).collect();

        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            // Patterns are built from fixed extensions and always compile.
            if let Ok(glob) = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .literal_separator(false)
                .build()
            {
                builder.add(glob);
            }
        }
        let set = builder.build().unwrap_or_else(|_| GlobSet::empty());

        Self {
            description,
            patterns,
            set,
        }
    }

    /// Description shown next to the filter, e.g. "PDF files".
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Glob patterns, e.g. `["*.xlsx", "*.xls"]`.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether the file name of `path` matches one of the patterns.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.set.is_match(Path::new(name)))
            .unwrap_or(false)
    }
}
