//! Octocrab implementation of the comment and quota gateways.

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::github::error::IntakeError;
use crate::github::locator::{ApiBase, PersonalAccessToken};
use crate::github::models::PullRequestComment;
use crate::github::rate_limit::RateLimitInfo;
use crate::worklist::WorkItem;

use super::comments::fetch_all_comments;
use super::error_mapping::{describe, is_rate_limited, map_octocrab_error, rate_limit_exceeded};
use super::{CommentGateway, RateLimitGateway};

/// Octocrab-backed gateway for commenters and quota.
pub struct OctocrabCommentGateway {
    client: Octocrab,
}

impl OctocrabCommentGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an authenticated Octocrab client for the given API base.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidUrl` when the base URI cannot be parsed or
    /// `IntakeError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &ApiBase) -> Result<Self, IntakeError> {
        let client = Octocrab::builder()
            .personal_token(token.as_ref())
            .base_uri(api_base.uri()?)
            .map_err(|error| IntakeError::Api {
                message: format!("configure client: {}", describe(&error)),
            })?
            .build()
            .map_err(|error| map_octocrab_error("build client", &error))?;
        Ok(Self::new(client))
    }

    async fn fetch_comments(
        &self,
        operation: &str,
        path: String,
    ) -> Result<Vec<PullRequestComment>, IntakeError> {
        match fetch_all_comments(&self.client, path).await {
            Ok(comments) => Ok(comments),
            Err(error) => Err(self.map_error_with_rate_limit(operation, &error).await),
        }
    }

    async fn map_error_with_rate_limit(
        &self,
        operation: &str,
        error: &octocrab::Error,
    ) -> IntakeError {
        match error {
            octocrab::Error::GitHub { source, .. } if is_rate_limited(source) => {
                let rate_limit = self.rate_limit().await.ok();
                rate_limit_exceeded(operation, source, rate_limit)
            }
            _ => map_octocrab_error(operation, error),
        }
    }
}

#[async_trait]
impl CommentGateway for OctocrabCommentGateway {
    async fn pull_request_comments(
        &self,
        item: &WorkItem,
    ) -> Result<Vec<PullRequestComment>, IntakeError> {
        let mut comments = self
            .fetch_comments("issue comments", item.comments_path())
            .await?;
        let review_comments = self
            .fetch_comments("review comments", item.review_comments_path())
            .await?;
        comments.extend(review_comments);
        Ok(comments)
    }
}

#[async_trait]
impl RateLimitGateway for OctocrabCommentGateway {
    async fn rate_limit(&self) -> Result<RateLimitInfo, IntakeError> {
        let rate = self
            .client
            .ratelimit()
            .get()
            .await
            .map_err(|error| map_octocrab_error("rate limit", &error))?
            .rate;

        let limit = u32::try_from(rate.limit).map_err(|_| IntakeError::Api {
            message: format!("rate limit {} is out of range", rate.limit),
        })?;
        let remaining = u32::try_from(rate.remaining).map_err(|_| IntakeError::Api {
            message: format!("remaining quota {} is out of range", rate.remaining),
        })?;
        Ok(RateLimitInfo::new(limit, remaining, rate.reset))
    }
}
