//! GitHub access for the commenters batch.
//!
//! This module wraps Octocrab to list the comments of a pull request and to
//! read the caller's REST quota. Errors are mapped into user-friendly variants
//! so that callers can surface precise failures without exposing Octocrab
//! internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod rate_limit;

pub use error::IntakeError;
pub use gateway::{CommentGateway, OctocrabCommentGateway, RateLimitGateway};
pub use locator::{ApiBase, DEFAULT_API_URL, PersonalAccessToken};
pub use models::PullRequestComment;
pub use rate_limit::RateLimitInfo;

#[cfg(test)]
pub use gateway::{MockCommentGateway, MockRateLimitGateway};
