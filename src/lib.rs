//! mergestudio - Combine PDF or spreadsheet files into a single document.
//!
//! This library is the engine behind a small desktop merger. It provides:
//!
//! - Per-type file selections that survive restarts through a JSON session
//! - PDF concatenation that keeps page order and appearance
//! - Spreadsheet stacking with a union of columns and a source-file tag
//! - Progress events during the blocking merge call
//! - A [`Workbench`] service the UI toolkit drives through [`shell::Dialogs`]
//!
//! # Examples
//!
//! ## Merging directly
//!
//! ```no_run
//! use mergestudio::config::Config;
//! use mergestudio::document::DocumentType;
//! use mergestudio::merge::MergeJob;
//! use mergestudio::output::LogProgress;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let job = MergeJob::new(DocumentType::Pdf, ["a.pdf", "b.pdf"], "merged.pdf")?;
//! let report = job.run(&Config::default(), &mut LogProgress)?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving the workbench
//!
//! ```no_run
//! use mergestudio::{Config, Workbench};
//! use mergestudio::document::DocumentType;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! mergestudio::logging::init(false);
//! let mut bench = Workbench::open(Config::beside_executable())?;
//! bench.switch_tab(DocumentType::Spreadsheet);
//! bench.add_files(["q1.xlsx", "q2.xlsx"]);
//! println!("{}", bench.summary().status());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod document;
pub mod error;
pub mod fileset;
pub mod io;
pub mod logging;
pub mod merge;
pub mod output;
pub mod session;
pub mod shell;
pub mod table;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use document::DocumentType;
pub use error::{Error, Result};
pub use fileset::FileSetManager;
pub use merge::{MergeJob, MergeReport};
pub use session::{Session, SessionStore};
pub use shell::{MergeOutcome, Workbench};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
