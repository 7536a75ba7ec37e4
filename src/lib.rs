//! Commenter statistics for lists of GitHub pull requests.
//!
//! The library validates a pull request list CSV, builds an ordered work
//! list of `org/project/number` identifiers, checks the remaining GitHub
//! quota, then fetches the commenters of each pull request through Octocrab
//! and appends them to an output CSV while keeping per-batch accounting.

pub mod batch;
pub mod config;
pub mod github;
pub mod telemetry;
pub mod worklist;

pub use batch::{BatchAccounting, BatchOptions, BatchRunner};
pub use config::CommentersConfig;
pub use github::{
    ApiBase, CommentGateway, IntakeError, OctocrabCommentGateway, PersonalAccessToken,
    RateLimitGateway, RateLimitInfo,
};
pub use worklist::{LoadError, PullRequestListLoader, WorkItem, WorkList};
