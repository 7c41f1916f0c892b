//! Output writing.
//!
//! Every output goes through a [`StagedFile`]: bytes land in a uniquely
//! named sibling of the destination which is renamed over it only after the
//! write has fully succeeded. A staged file that is dropped without being
//! committed is removed, so a failed write never leaves a half-written
//! destination behind.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use lopdf::Document;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::MergeError;
use crate::utils::format_file_size;

/// A write-then-rename handle for one destination file.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
    destination: PathBuf,
}

impl StagedFile {
    /// Create an empty staging file next to `destination`.
    ///
    /// Fails if the destination directory does not exist or is not writable.
    pub fn create(destination: &Path) -> io::Result<Self> {
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut prefix = std::ffi::OsString::from(".");
        if let Some(name) = destination.file_name() {
            prefix.push(name);
        }
        prefix.push(".");

        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(".tmp");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Same mode a plain File::create would give the output.
            builder.permissions(fs::Permissions::from_mode(0o666));
        }

        Ok(Self {
            file: builder.tempfile_in(dir)?,
            destination: destination.to_path_buf(),
        })
    }

    /// Path of the staging file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Final destination.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Buffered writer over the staging file.
    pub fn writer(&self) -> io::Result<BufWriter<File>> {
        Ok(BufWriter::new(self.file.as_file().try_clone()?))
    }

    /// Write `bytes` to the staging file and commit.
    pub fn write_all_and_commit(self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self.writer()?;
        writer.write_all(bytes)?;
        writer.flush()?;
        drop(writer);
        self.commit()
    }

    /// Move the staging file over the destination.
    pub fn commit(self) -> io::Result<()> {
        self.file
            .persist(&self.destination)
            .map(drop)
            .map_err(|e| e.error)
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    pub(crate) fn measure(path: &Path, start: Instant) -> Self {
        Self {
            write_time: start.elapsed(),
            file_size: fs::metadata(path).map(|m| m.len()).unwrap_or(0),
            output_path: path.to_path_buf(),
        }
    }

    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Serializes a PDF document to disk through a staged file.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Save `doc` to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::FailedToCreateOutput`] if the staging file cannot
    /// be created, and [`MergeError::FailedToWrite`] if serialization,
    /// flushing or the final rename fails. The destination is untouched in
    /// either case.
    pub fn save(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics, MergeError> {
        let start = Instant::now();

        let staged = StagedFile::create(path).map_err(|source| MergeError::FailedToCreateOutput {
            path: path.to_path_buf(),
            source,
        })?;

        let write_err = |source: io::Error| MergeError::FailedToWrite {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = staged.writer().map_err(write_err)?;
        doc.save_to(&mut writer).map_err(|e| write_err(io::Error::other(e)))?;
        writer.flush().map_err(write_err)?;
        drop(writer);

        staged.commit().map_err(write_err)?;

        let stats = WriteStatistics::measure(path, start);
        debug!(
            path = %path.display(),
            size = %stats.format_file_size(),
            "PDF written"
        );
        Ok(stats)
    }
}
