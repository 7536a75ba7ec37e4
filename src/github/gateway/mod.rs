//! Gateways for reading pull request comments and quota through Octocrab.
//!
//! The traits here are the seams the batch depends on; tests mock them while
//! the Octocrab implementation handles real HTTP requests.

mod comments;
mod commenters;
mod error_mapping;

pub use commenters::OctocrabCommentGateway;

use async_trait::async_trait;

use crate::github::error::IntakeError;
use crate::github::models::PullRequestComment;
use crate::github::rate_limit::RateLimitInfo;
use crate::worklist::WorkItem;

/// Gateway that can list the comments of a pull request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentGateway: Send + Sync {
    /// Fetch every conversation and review comment of the pull request.
    async fn pull_request_comments(
        &self,
        item: &WorkItem,
    ) -> Result<Vec<PullRequestComment>, IntakeError>;
}

/// Gateway that reports the caller's API quota.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimitGateway: Send + Sync {
    /// Fetch the current REST quota.
    async fn rate_limit(&self) -> Result<RateLimitInfo, IntakeError>;
}
