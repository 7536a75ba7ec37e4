//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.pr-commenters.toml` in current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `PR_COMMENTERS_TOKEN`,
//!    `PR_COMMENTERS_OUTPUT`, and so on, or legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--token`/`-t`, `--output`/`-o`, ...
//!
//! The input CSV is normally given as a positional argument; it is extracted
//! before ortho-config parses the remaining flags and applied with
//! [`CommentersConfig::set_input`].
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! output = "commenters.csv"
//! api_url = "https://ghe.example.com"
//! requests_per_pull_request = 2
//! ```

use std::env;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::batch::{DEFAULT_REQUESTS_PER_PULL_REQUEST, OutputOptions};
use crate::github::{DEFAULT_API_URL, IntakeError};

/// Default output CSV path.
pub const DEFAULT_OUTPUT_FILE: &str = "commenters.csv";

/// Default debug log path.
pub const DEFAULT_DEBUG_LOG: &str = "debug.log";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `PR_COMMENTERS_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `PR_COMMENTERS_OUTPUT` or `--output`: Output CSV path
/// - `PR_COMMENTERS_API_URL` or `--api-url`: GitHub or GitHub Enterprise URL
/// - `PR_COMMENTERS_DEBUG_LOG` or `--debug-log`: Debug trace path
///
/// Boolean flags (`--append`, `--no-header`, `--verbose`, hidden `--debug`) are
/// read from the CLI and configuration files only; `ortho_config` does not
/// load boolean values from the environment.
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PR_COMMENTERS",
    discovery(
        dotfile_name = ".pr-commenters.toml",
        config_file_name = "pr-commenters.toml",
        app_name = "pr-commenters"
    )
)]
pub struct CommentersConfig {
    /// Pull request list CSV to process.
    ///
    /// Usually supplied positionally; `--input <PATH>` / `-i <PATH>` is
    /// also accepted.
    #[ortho_config(cli_short = 'i')]
    pub input: Option<String>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PR_COMMENTERS_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Output CSV path; defaults to `commenters.csv`.
    #[ortho_config(cli_short = 'o')]
    pub output: String,

    /// Adds rows to an existing output file instead of replacing it.
    #[ortho_config(cli_short = 'a')]
    pub append: bool,

    /// Never writes the output header row.
    #[ortho_config(cli_short = 'n')]
    pub no_header: bool,

    /// Prints load checks and per-item results instead of a progress bar.
    #[ortho_config(cli_short = 'v')]
    pub verbose: bool,

    /// Records a JSON-lines trace of the session in `debug_log`.
    ///
    /// Set from configuration files or the hidden `--debug` flag, which the
    /// binary strips before parsing so it stays out of `--help`.
    #[ortho_config(skip_cli)]
    pub debug: bool,

    /// Path of the debug trace; defaults to `debug.log`.
    #[ortho_config(cli_short = 'D')]
    pub debug_log: String,

    /// GitHub web or API URL. Enterprise hosts are served from `/api/v3`.
    #[ortho_config(cli_short = 'A')]
    pub api_url: String,

    /// Requests charged per pull request by the quota check.
    #[ortho_config(cli_short = 'r')]
    pub requests_per_pull_request: u32,
}

impl Default for CommentersConfig {
    fn default() -> Self {
        Self {
            input: None,
            token: None,
            output: DEFAULT_OUTPUT_FILE.to_owned(),
            append: false,
            no_header: false,
            verbose: false,
            debug: false,
            debug_log: DEFAULT_DEBUG_LOG.to_owned(),
            api_url: DEFAULT_API_URL.to_owned(),
            requests_per_pull_request: DEFAULT_REQUESTS_PER_PULL_REQUEST,
        }
    }
}

impl CommentersConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, IntakeError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(IntakeError::MissingToken)
    }

    /// Returns the input path or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingInputFile`] when no input is configured.
    pub fn require_input(&self) -> Result<&Utf8Path, IntakeError> {
        self.input
            .as_deref()
            .map(Utf8Path::new)
            .ok_or(IntakeError::MissingInputFile)
    }

    /// Applies the positional input path, which wins over `--input`.
    pub fn set_input(&mut self, positional: Option<String>) {
        if positional.is_some() {
            self.input = positional;
        }
    }

    /// Validates the configuration before any processing starts.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingInputFile`] or
    /// [`IntakeError::InputFileNotFound`] for usage errors, and
    /// [`IntakeError::Configuration`] for a blank output path or a zero
    /// request cost.
    pub fn validate(&self) -> Result<(), IntakeError> {
        let input = self.require_input()?;
        if !input.is_file() {
            return Err(IntakeError::InputFileNotFound {
                path: input.to_string(),
            });
        }

        if self.output.trim().is_empty() {
            return Err(IntakeError::Configuration {
                message: "output path must not be empty (use --output or -o)".to_owned(),
            });
        }

        if self.requests_per_pull_request == 0 {
            return Err(IntakeError::Configuration {
                message: "requests per pull request must be at least 1".to_owned(),
            });
        }

        Ok(())
    }

    /// Output handling derived from the configuration.
    #[must_use]
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            path: Utf8PathBuf::from(self.output.as_str()),
            append: self.append,
            no_header: self.no_header,
        }
    }
}
