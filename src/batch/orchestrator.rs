//! Sequential batch over a validated pull request list.

use std::fmt;
use std::io::Write;

use camino::Utf8Path;

use super::accounting::BatchAccounting;
use super::output::{OutputOptions, prepare_output};
use super::progress::{ProgressIndicator, TerminalProgress};
use super::quota::QuotaGuard;
use super::recorder::CommenterFetcher;
use super::report::report_summary;
use crate::github::{IntakeError, RateLimitGateway};
use crate::telemetry::{TelemetryEvent, TelemetrySink};
use crate::worklist::{PullRequestListLoader, WorkItem, WorkList};

/// Behaviour switches for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Print load checks and per-item results instead of a progress bar.
    pub verbose: bool,
    /// Output file handling.
    pub output: OutputOptions,
}

/// Runs the load, quota, fetch, and report steps for one input file.
///
/// Items are processed one at a time in file order. A failed fetch is
/// counted and the batch moves on; load, output preparation, and quota
/// failures abort before any item is fetched.
pub struct BatchRunner<'d, F, G, W>
where
    F: CommenterFetcher,
    G: RateLimitGateway,
    W: Write,
{
    loader: PullRequestListLoader,
    fetcher: &'d F,
    quota: QuotaGuard<'d, G>,
    progress: Box<dyn ProgressIndicator + 'd>,
    telemetry: &'d dyn TelemetrySink,
    console: W,
    options: BatchOptions,
}

impl<'d, F, G, W> BatchRunner<'d, F, G, W>
where
    F: CommenterFetcher,
    G: RateLimitGateway,
    W: Write,
{
    /// Creates a runner writing user-facing messages to `console`.
    ///
    /// Progress is hidden until [`Self::with_progress`] supplies a display.
    #[must_use]
    pub fn new(
        fetcher: &'d F,
        quota: QuotaGuard<'d, G>,
        telemetry: &'d dyn TelemetrySink,
        console: W,
        options: BatchOptions,
    ) -> Self {
        Self {
            loader: PullRequestListLoader::default(),
            fetcher,
            quota,
            progress: Box::new(TerminalProgress::hidden()),
            telemetry,
            console,
            options,
        }
    }

    /// Replaces the progress display.
    #[must_use]
    pub fn with_progress(mut self, progress: Box<dyn ProgressIndicator + 'd>) -> Self {
        self.progress = progress;
        self
    }

    /// Consumes the runner and returns its console.
    #[must_use]
    pub fn into_console(self) -> W {
        self.console
    }

    /// Processes every pull request listed in `input`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InputRejected`] when the file fails
    /// validation, [`IntakeError::InsufficientQuota`] when the remaining
    /// quota cannot cover the batch, [`IntakeError::Io`] when the output
    /// file or console cannot be written, or the gateway error when the
    /// quota cannot be read.
    pub async fn perform_action(
        &mut self,
        input: &Utf8Path,
    ) -> Result<BatchAccounting, IntakeError> {
        self.say(format_args!("Processing \"{input}\""))?;
        self.telemetry.record(TelemetryEvent::ProcessingStarted {
            input: input.to_string(),
        });

        let work_list = self.load(input)?;
        prepare_output(&self.options.output)?;
        self.quota.check_sufficient_quota(work_list.len()).await?;

        let accounting = self.run_batch(&work_list).await?;
        report_summary(&mut self.console, self.telemetry, &accounting)?;
        Ok(accounting)
    }

    fn load(&mut self, input: &Utf8Path) -> Result<WorkList, IntakeError> {
        let verbose = self.options.verbose;
        if verbose {
            self.say(format_args!("Checking input file"))?;
        }

        match self.loader.load(input) {
            Ok(work_list) => {
                if verbose {
                    self.say(format_args!("  - Header is correct"))?;
                    self.say(format_args!("  - At least one Pull Request data available"))?;
                    self.say(format_args!(
                        "Successfully loaded \"{input}\" ({} Pull Request to analyze)\n",
                        work_list.len()
                    ))?;
                }
                Ok(work_list)
            }
            Err(error) => {
                self.telemetry.record(TelemetryEvent::InputRejected {
                    reason: error.to_string(),
                });
                self.say(format_args!("Could not load \"{input}\""))?;
                Err(error.into())
            }
        }
    }

    async fn run_batch(&mut self, work_list: &WorkList) -> Result<BatchAccounting, IntakeError> {
        let show_progress = !self.options.verbose;
        if show_progress {
            self.progress
                .start(u64::try_from(work_list.len()).unwrap_or(u64::MAX));
        }

        let mut accounting = BatchAccounting::default();
        for item in work_list {
            self.process_item(item, &mut accounting).await?;

            if show_progress {
                self.advance_progress();
            }
        }

        if show_progress {
            self.progress.finish();
        }
        Ok(accounting)
    }

    async fn process_item(
        &mut self,
        item: &WorkItem,
        accounting: &mut BatchAccounting,
    ) -> Result<(), IntakeError> {
        match self
            .fetcher
            .fetch_commenters(item, &self.options.output)
            .await
        {
            Ok(count) => {
                accounting.record(count);
                if self.options.verbose {
                    self.say(format_args!("  {item}: {count} comment(s)"))?;
                }
            }
            Err(error) => {
                tracing::warn!(pull_request = %item, "failed to fetch commenters: {error}");
                self.telemetry.record(TelemetryEvent::ItemFailed {
                    pull_request: item.to_string(),
                    message: error.to_string(),
                });
                accounting.record_failure();
                if self.options.verbose {
                    self.say(format_args!("  {item}: {error}"))?;
                }
            }
        }
        Ok(())
    }

    fn advance_progress(&mut self) {
        if let Err(error) = self.progress.advance() {
            tracing::warn!("unexpected error updating progress bar: {error}");
        }
    }

    fn say(&mut self, line: fmt::Arguments<'_>) -> Result<(), IntakeError> {
        writeln!(self.console, "{line}").map_err(|error| IntakeError::Io {
            message: error.to_string(),
        })
    }
}
