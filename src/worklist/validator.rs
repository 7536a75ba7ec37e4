//! Header and row validation against a [`Schema`].

use super::error::LoadError;
use super::item::{OrganisationName, ProjectName, PullRequestNumber, WorkItem};
use super::schema::Schema;

const ORGANISATION_COLUMN: usize = 0;
const PROJECT_COLUMN: usize = 1;
const NUMBER_COLUMN: usize = 2;

/// Checks headers and data rows of a pull request list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    schema: Schema,
}

impl Validator {
    /// Creates a validator bound to the given schema.
    #[must_use]
    pub const fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Checks that the header matches the schema in length and, position by
    /// position, case-sensitively.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::HeaderFieldCount`] when the lengths differ, or
    /// [`LoadError::HeaderField`] for the first column that differs.
    pub fn validate_header(&self, header: &[&str]) -> Result<(), LoadError> {
        let expected = self.schema.len();
        if header.len() != expected {
            return Err(LoadError::HeaderFieldCount {
                found: header.len(),
                expected,
            });
        }

        let mismatch = header
            .iter()
            .zip(self.schema.fields())
            .enumerate()
            .find(|(_, (found, wanted))| **found != wanted.as_str());

        match mismatch {
            Some((index, (found, wanted))) => Err(LoadError::HeaderField {
                column: index + 1,
                found: (*found).to_owned(),
                expected: wanted.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Returns true when [`Self::validate_header`] accepts the header.
    #[must_use]
    pub fn header_matches(&self, header: &[&str]) -> bool {
        self.validate_header(header).is_ok()
    }

    /// Validates the organisation, repository, and number fields of a data
    /// row, in that order, and builds the corresponding work item.
    ///
    /// Remaining fields are passed through unchecked. `line` is the one-based
    /// file line used in error messages.
    ///
    /// # Errors
    ///
    /// Returns the error for the first field that fails its rule.
    pub fn validate_row(&self, line: u64, row: &[&str]) -> Result<WorkItem, LoadError> {
        let field = |column: usize| row.get(column).copied().unwrap_or_default();

        let organisation_value = field(ORGANISATION_COLUMN);
        let organisation = OrganisationName::parse(organisation_value).ok_or_else(|| {
            LoadError::InvalidOrganisation {
                line,
                value: organisation_value.to_owned(),
            }
        })?;

        let project_value = field(PROJECT_COLUMN);
        let project =
            ProjectName::parse(project_value).ok_or_else(|| LoadError::InvalidProject {
                line,
                value: project_value.to_owned(),
            })?;

        let number_value = field(NUMBER_COLUMN);
        let number =
            PullRequestNumber::parse(number_value).ok_or_else(|| LoadError::InvalidNumber {
                line,
                value: number_value.to_owned(),
            })?;

        Ok(WorkItem::new(organisation, project, number))
    }
}
