//! Loads a pull request list file into a [`WorkList`].

use std::fs::File;
use std::io::Read;

use camino::Utf8Path;
use csv::{Position, ReaderBuilder, StringRecord};

use super::error::LoadError;
use super::item::{WorkList, WorkListBuilder};
use super::validator::Validator;

/// Reads, validates, and converts pull request list files.
#[derive(Debug, Clone, Default)]
pub struct PullRequestListLoader {
    validator: Validator,
}

impl PullRequestListLoader {
    /// Creates a loader using the given validator.
    #[must_use]
    pub const fn new(validator: Validator) -> Self {
        Self { validator }
    }

    /// Loads the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Unreadable`] when the file cannot be opened, and
    /// otherwise any error from [`Self::load_from_reader`].
    pub fn load(&self, path: &Utf8Path) -> Result<WorkList, LoadError> {
        let file = File::open(path).map_err(|error| LoadError::Unreadable {
            path: path.to_string(),
            message: error.to_string(),
        })?;
        self.load_from_reader(file)
    }

    /// Loads a pull request list from any reader.
    ///
    /// The first record must be a header matching the schema, at least one
    /// data row must follow, and every data row must validate. The first
    /// failure aborts the load.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingHeader`] for empty input, a header error
    /// when the header does not match, [`LoadError::MalformedRecord`] when a
    /// record cannot be parsed or has the wrong number of fields,
    /// [`LoadError::NoDataRows`] when only a header is present, or the first
    /// row validation error.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<WorkList, LoadError> {
        let mut csv_reader = ReaderBuilder::new().has_headers(false).from_reader(reader);
        let mut records = csv_reader.records();

        let header = records
            .next()
            .ok_or(LoadError::MissingHeader)?
            .map_err(|error| malformed(&error))?;
        self.validator.validate_header(&fields_of(&header))?;

        let mut builder = WorkListBuilder::default();
        for next_record in records {
            let record = next_record.map_err(|error| malformed(&error))?;
            let line = record.position().map_or(0, Position::line);
            builder.push(self.validator.validate_row(line, &fields_of(&record))?);
        }

        let work_list = builder.build();
        if work_list.is_empty() {
            return Err(LoadError::NoDataRows);
        }
        Ok(work_list)
    }
}

fn fields_of(record: &StringRecord) -> Vec<&str> {
    record.iter().collect()
}

fn malformed(error: &csv::Error) -> LoadError {
    LoadError::MalformedRecord {
        message: error.to_string(),
    }
}
