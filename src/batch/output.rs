//! Output CSV handling for fetched commenters.

use std::fs::{self, OpenOptions};
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use csv::WriterBuilder;

use crate::github::{IntakeError, PullRequestComment};
use crate::worklist::WorkItem;

/// Header row of the output file.
pub const OUTPUT_HEADER: [&str; 3] = ["pr_ref", "commenter", "month_year"];

/// Commenter recorded when GitHub omits the comment author.
pub const UNKNOWN_COMMENTER: &str = "unknown";

/// Where and how commenter rows are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    /// Output CSV path.
    pub path: Utf8PathBuf,
    /// Keep an existing file and add rows after its content.
    pub append: bool,
    /// Never write the header row.
    pub no_header: bool,
}

impl OutputOptions {
    /// Creates options for `path` that replace the file and write a header.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            append: false,
            no_header: false,
        }
    }
}

fn io_error(path: &Utf8Path, error: &impl std::fmt::Display) -> IntakeError {
    IntakeError::Io {
        message: format!("{path}: {error}"),
    }
}

/// Readies the output file before the batch starts.
///
/// Outside append mode an existing file is removed; in append mode the file
/// is left untouched.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] when an existing file cannot be removed.
pub fn prepare_output(options: &OutputOptions) -> Result<(), IntakeError> {
    if options.append {
        return Ok(());
    }

    match fs::remove_file(&options.path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(io_error(&options.path, &error)),
    }
}

/// Appends one row per comment of `item` to the output file.
///
/// The header row is written first when the file is new or empty, unless
/// disabled by the options.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] when the file cannot be opened or written.
pub fn append_commenter_rows(
    options: &OutputOptions,
    item: &WorkItem,
    comments: &[PullRequestComment],
) -> Result<(), IntakeError> {
    let path = &options.path;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| io_error(path, &error))?;
    let is_empty = file
        .metadata()
        .map_err(|error| io_error(path, &error))?
        .len()
        == 0;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if is_empty && !options.no_header {
        writer
            .write_record(OUTPUT_HEADER)
            .map_err(|error| io_error(path, &error))?;
    }

    let pull_request = item.to_string();
    for comment in comments {
        let commenter = comment.author.as_deref().unwrap_or(UNKNOWN_COMMENTER);
        let month_year = comment.month_year().unwrap_or_default();
        writer
            .write_record([pull_request.as_str(), commenter, month_year.as_str()])
            .map_err(|error| io_error(path, &error))?;
    }

    writer.flush().map_err(|error| io_error(path, &error))
}
