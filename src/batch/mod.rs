//! Quota-aware batch processing of a pull request list.
//!
//! [`BatchRunner`] loads and validates the input list, prepares the output
//! file, checks the remaining quota once, then fetches the commenters of each
//! pull request in order while keeping [`BatchAccounting`]. A summary is
//! printed when the loop completes.

pub mod accounting;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod quota;
pub mod recorder;
pub mod report;

pub use accounting::BatchAccounting;
pub use orchestrator::{BatchOptions, BatchRunner};
pub use output::{OUTPUT_HEADER, OutputOptions, append_commenter_rows, prepare_output};
pub use progress::{ProgressError, ProgressIndicator, TerminalProgress};
pub use quota::{DEFAULT_REQUESTS_PER_PULL_REQUEST, QuotaGuard};
pub use recorder::{CommenterFetcher, CsvCommenterRecorder};
pub use report::{report_summary, write_summary_to};

#[cfg(test)]
pub use progress::MockProgressIndicator;
#[cfg(test)]
pub use recorder::MockCommenterFetcher;

#[cfg(test)]
mod tests;
