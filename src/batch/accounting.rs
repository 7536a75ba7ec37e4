//! Per-batch tallies of processed pull requests.

/// Counters accumulated while a batch runs.
///
/// Owned by the orchestrator for the duration of one batch and handed to the
/// reporter once the loop completes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchAccounting {
    without_comments: usize,
    with_comments: usize,
    total_comments: usize,
    failed: usize,
}

impl BatchAccounting {
    /// Records the comment count of one successfully processed pull request.
    pub const fn record(&mut self, comment_count: usize) {
        if comment_count == 0 {
            self.without_comments += 1;
        } else {
            self.with_comments += 1;
        }
        self.total_comments += comment_count;
    }

    /// Records a pull request whose commenters could not be fetched.
    pub const fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Pull requests that returned no comments.
    #[must_use]
    pub const fn without_comments(&self) -> usize {
        self.without_comments
    }

    /// Pull requests that returned at least one comment.
    #[must_use]
    pub const fn with_comments(&self) -> usize {
        self.with_comments
    }

    /// Comments across every processed pull request.
    #[must_use]
    pub const fn total_comments(&self) -> usize {
        self.total_comments
    }

    /// Pull requests whose fetch failed.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }
}
