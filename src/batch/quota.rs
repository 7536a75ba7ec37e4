//! Pre-flight quota gate.

use crate::github::{IntakeError, RateLimitGateway, RateLimitInfo};

/// Requests spent per pull request: conversation comments plus review
/// comments.
pub const DEFAULT_REQUESTS_PER_PULL_REQUEST: u32 = 2;

/// Decides whether the remaining quota covers a batch.
pub struct QuotaGuard<'c, G: RateLimitGateway> {
    gateway: &'c G,
    requests_per_pull_request: u32,
}

impl<'c, G: RateLimitGateway> QuotaGuard<'c, G> {
    /// Creates a guard charging `requests_per_pull_request` per item.
    #[must_use]
    pub const fn new(gateway: &'c G, requests_per_pull_request: u32) -> Self {
        Self {
            gateway,
            requests_per_pull_request,
        }
    }

    /// Reads the current quota without side effects.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn snapshot(&self) -> Result<RateLimitInfo, IntakeError> {
        self.gateway.rate_limit().await
    }

    /// Requests needed to process `item_count` pull requests.
    #[must_use]
    pub fn projected_cost(&self, item_count: usize) -> u64 {
        let items = u64::try_from(item_count).unwrap_or(u64::MAX);
        items.saturating_mul(u64::from(self.requests_per_pull_request))
    }

    /// Fails unless the remaining quota covers `item_count` pull requests.
    ///
    /// Returns the snapshot the decision was based on.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InsufficientQuota`] when the projected cost
    /// exceeds the remaining requests, or the gateway error when the quota
    /// cannot be read.
    pub async fn check_sufficient_quota(
        &self,
        item_count: usize,
    ) -> Result<RateLimitInfo, IntakeError> {
        let info = self.snapshot().await?;
        let required = self.projected_cost(item_count);

        if info.covers(required) {
            Ok(info)
        } else {
            Err(IntakeError::InsufficientQuota {
                required,
                remaining: info.remaining(),
                reset_at: info.reset_at(),
            })
        }
    }
}
