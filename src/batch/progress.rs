//! Progress reporting for the batch loop.
//!
//! The orchestrator only sees the [`ProgressIndicator`] capability; the
//! terminal implementation draws an `indicatif` bar on stderr.

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} {wide_msg}";

/// Failure to update the progress display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("progress update failed: {message}")]
pub struct ProgressError {
    /// Failure detail.
    pub message: String,
}

/// A progress display advanced once per processed pull request.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressIndicator {
    /// Prepares the display for `length` steps.
    fn start(&mut self, length: u64);

    /// Moves the display forward by one step.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError`] when the display can no longer be updated.
    fn advance(&mut self) -> Result<(), ProgressError>;

    /// Marks the display as complete.
    fn finish(&mut self);
}

/// Progress bar rendered on the terminal.
pub struct TerminalProgress {
    bar: ProgressBar,
    style: Option<ProgressStyle>,
}

impl std::fmt::Debug for TerminalProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalProgress")
            .field("bar", &self.bar)
            .field("style", &self.style.as_ref().map(|_| "ProgressStyle"))
            .finish()
    }
}

impl TerminalProgress {
    /// Creates a visible progress bar.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError`] when the bar template cannot be parsed.
    pub fn new() -> Result<Self, ProgressError> {
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .map_err(|error| ProgressError {
                message: error.to_string(),
            })?
            .progress_chars("█▓▒░ ");
        Ok(Self {
            bar: ProgressBar::hidden(),
            style: Some(style),
        })
    }

    /// Creates a progress indicator that draws nothing.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            style: None,
        }
    }

    /// Steps taken so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressIndicator for TerminalProgress {
    fn start(&mut self, length: u64) {
        let bar = self.style.as_ref().map_or_else(ProgressBar::hidden, |style| {
            ProgressBar::new(length).with_style(style.clone())
        });
        bar.set_length(length);
        self.bar = bar;
    }

    fn advance(&mut self) -> Result<(), ProgressError> {
        if self.bar.is_finished() {
            return Err(ProgressError {
                message: "progress bar already finished".to_owned(),
            });
        }
        self.bar.inc(1);
        Ok(())
    }

    fn finish(&mut self) {
        self.bar.finish();
    }
}
