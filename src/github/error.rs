//! Error types exposed by the commenters batch.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;
use crate::worklist::LoadError;

/// Errors surfaced while configuring the batch, talking to GitHub, or
/// writing results.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// The CLI did not name an input file.
    #[error("input CSV file is required")]
    MissingInputFile,

    /// The named input file does not exist.
    #[error("invalid file: \"{path}\" does not exist")]
    InputFileNotFound {
        /// Path supplied on the command line.
        path: String,
    },

    /// The pull request list was rejected.
    #[error("could not load the pull request list: {0}")]
    InputRejected(#[from] LoadError),

    /// The provided API URL could not be parsed.
    #[error("GitHub API URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Rate limit exceeded - the API returned 403/429 with rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Rate limit info if it could be fetched after the failure.
        rate_limit: Option<RateLimitInfo>,
        /// Error message from GitHub.
        message: String,
    },

    /// The remaining quota cannot cover the whole batch.
    #[error(
        "not enough GitHub API quota to process the batch: {required} requests \
         needed, {remaining} remaining (resets at {reset_at})"
    )]
    InsufficientQuota {
        /// Projected number of requests for the batch.
        required: u64,
        /// Requests left in the current window.
        remaining: u32,
        /// Unix timestamp when the quota resets.
        reset_at: u64,
    },
}

impl IntakeError {
    /// Returns true for command-line misuse, reported with a distinct exit
    /// status.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(self, Self::MissingInputFile | Self::InputFileNotFound { .. })
    }
}
