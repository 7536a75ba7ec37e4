//! Error types raised while loading and validating the pull request list.

use thiserror::Error;

/// Reasons a pull request list file is rejected.
///
/// Loading is all-or-nothing: the first failure rejects the whole file and no
/// partial work list is produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The input file could not be opened for reading.
    #[error("unable to read input file \"{path}\": {message}")]
    Unreadable {
        /// Path that failed to open.
        path: String,
        /// Error detail from the operating system.
        message: String,
    },

    /// The file contained no header line at all.
    #[error("input file is empty, expected a header line")]
    MissingHeader,

    /// The header has a different number of fields than the schema.
    #[error("header is incorrect: field number mismatch (found {found}, wanted {expected})")]
    HeaderFieldCount {
        /// Number of fields found in the header.
        found: usize,
        /// Number of fields required by the schema.
        expected: usize,
    },

    /// A header field differs from the schema field at the same position.
    #[error(
        "header is incorrect: not the expected header field at column {column} \
         (found \"{found}\", wanted \"{expected}\")"
    )]
    HeaderField {
        /// One-based column of the first mismatch.
        column: usize,
        /// Header value found in the file.
        found: String,
        /// Header value required by the schema.
        expected: String,
    },

    /// The CSV reader could not parse a record.
    #[error("malformed CSV data: {message}")]
    MalformedRecord {
        /// Parser error detail, including the position when known.
        message: String,
    },

    /// The header was valid but no data rows follow it.
    #[error("no data available after the header")]
    NoDataRows,

    /// The organisation field is not a plausible GitHub organisation name.
    #[error("line {line}: ORG field \"{value}\" doesn't seem to be a valid GitHub org")]
    InvalidOrganisation {
        /// One-based line of the offending row.
        line: u64,
        /// Rejected field value.
        value: String,
    },

    /// The repository field does not match the project name format.
    #[error("line {line}: PRJ field \"{value}\" is not of the expected format")]
    InvalidProject {
        /// One-based line of the offending row.
        line: u64,
        /// Rejected field value.
        value: String,
    },

    /// The number field is not made of digits only.
    #[error("line {line}: PR field \"{value}\" is not a (positive) number")]
    InvalidNumber {
        /// One-based line of the offending row.
        line: u64,
        /// Rejected field value.
        value: String,
    },
}

impl LoadError {
    /// Returns true when the failure concerns the header rather than a row.
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::MissingHeader | Self::HeaderFieldCount { .. } | Self::HeaderField { .. }
        )
    }

    /// Returns true when a data row failed semantic validation.
    #[must_use]
    pub const fn is_row_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidOrganisation { .. } | Self::InvalidProject { .. } | Self::InvalidNumber { .. }
        )
    }
}
