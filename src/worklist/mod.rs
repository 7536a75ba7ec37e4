//! Pull request list validation and work list construction.
//!
//! A pull request list is a CSV file whose header must match a fixed
//! [`Schema`]. Every data row names one pull request through its
//! organisation, repository, and number columns; these are validated and
//! turned into canonical `org/project/number` [`WorkItem`]s. A single bad row
//! rejects the whole file.

pub mod error;
pub mod item;
pub mod loader;
pub mod schema;
pub mod validator;

pub use error::LoadError;
pub use item::{
    OrganisationName, ProjectName, PullRequestNumber, WorkItem, WorkList, WorkListBuilder,
};
pub use loader::PullRequestListLoader;
pub use schema::{PULL_REQUEST_LIST_FIELDS, Schema};
pub use validator::Validator;
