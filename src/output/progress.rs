//! Progress events emitted while a merge runs.
//!
//! Merges are one blocking call; the caller passes an observer and gets a
//! stream of [`Progress`] values with a monotonically increasing fraction.

use std::fmt;

/// Stage of a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Loading input `index` (1-based) of `total`.
    Processing {
        index: usize,
        total: usize,
        file: String,
    },
    /// Stacking loaded tables into one.
    Combining,
    /// Writing the output file.
    Writing,
    /// Output written.
    Complete,
}

/// One progress update.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub phase: Phase,
    /// Completed share of the merge, `0.0..=1.0`.
    pub fraction: f64,
    pub message: String,
}

impl Progress {
    /// Starting input `index` (1-based) of `total`.
    ///
    /// The fraction counts inputs already finished, scaled into `0.0..span`.
    pub fn processing(index: usize, total: usize, file: impl Into<String>, span: f64) -> Self {
        let file = file.into();
        let fraction = if total == 0 {
            0.0
        } else {
            span * index.saturating_sub(1) as f64 / total as f64
        };
        Self {
            message: format!("Processing {file}..."),
            phase: Phase::Processing { index, total, file },
            fraction,
        }
    }

    pub fn combining() -> Self {
        Self {
            phase: Phase::Combining,
            fraction: 0.9,
            message: "Combining data...".to_string(),
        }
    }

    /// Writing the output; `what` names it, e.g. `PDF` or `Excel file`.
    pub fn writing(what: &str) -> Self {
        Self {
            phase: Phase::Writing,
            fraction: 0.95,
            message: format!("Saving merged {what}..."),
        }
    }

    /// Replace the message, keeping phase and fraction.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn complete() -> Self {
        Self {
            phase: Phase::Complete,
            fraction: 1.0,
            message: "Complete!".to_string(),
        }
    }

    /// Fraction as a whole percentage.
    pub fn percent(&self) -> u8 {
        (self.fraction.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>3}%] {}", self.percent(), self.message)
    }
}

/// Receiver of progress updates.
pub trait ProgressObserver {
    fn update(&mut self, progress: &Progress);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&Progress),
{
    fn update(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// Observer that drops every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn update(&mut self, _progress: &Progress) {}
}
