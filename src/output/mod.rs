//! User-facing output of a merge.
//!
//! This module handles:
//! - Progress events and observers
//! - Logging progress through `tracing` when no UI is attached

pub mod progress;

pub use progress::{NoProgress, Phase, Progress, ProgressObserver};

use tracing::debug;

/// Observer that forwards every update to the log at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn update(&mut self, progress: &Progress) {
        debug!(percent = progress.percent(), "{}", progress.message);
    }
}
