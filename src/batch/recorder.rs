//! Fetch collaborator that turns one work item into output rows.

use async_trait::async_trait;

use super::output::{OutputOptions, append_commenter_rows};
use crate::github::{CommentGateway, IntakeError};
use crate::worklist::WorkItem;

/// Fetches the commenters of one pull request and records them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommenterFetcher: Send + Sync {
    /// Fetches and records the comments of `item`, returning how many were
    /// found.
    async fn fetch_commenters(
        &self,
        item: &WorkItem,
        output: &OutputOptions,
    ) -> Result<usize, IntakeError>;
}

/// Writes every fetched comment as a row of the output CSV.
pub struct CsvCommenterRecorder<'c, G: CommentGateway> {
    gateway: &'c G,
}

impl<'c, G: CommentGateway> CsvCommenterRecorder<'c, G> {
    /// Creates a recorder reading comments through `gateway`.
    #[must_use]
    pub const fn new(gateway: &'c G) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G: CommentGateway> CommenterFetcher for CsvCommenterRecorder<'_, G> {
    async fn fetch_commenters(
        &self,
        item: &WorkItem,
        output: &OutputOptions,
    ) -> Result<usize, IntakeError> {
        let comments = self.gateway.pull_request_comments(item).await?;
        append_commenter_rows(output, item, &comments)?;
        Ok(comments.len())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    use super::{CommenterFetcher, CsvCommenterRecorder};
    use crate::batch::OutputOptions;
    use crate::github::{IntakeError, MockCommentGateway, PullRequestComment};
    use crate::worklist::{OrganisationName, ProjectName, PullRequestNumber, WorkItem};

    fn item() -> WorkItem {
        WorkItem::new(
            OrganisationName::parse("acme").expect("valid organisation"),
            ProjectName::parse("widget-api").expect("valid project"),
            PullRequestNumber::parse("7").expect("valid number"),
        )
    }

    fn output_in(dir: &TempDir) -> OutputOptions {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("out.csv"))
            .expect("temporary path should be UTF-8");
        OutputOptions::new(path)
    }

    #[tokio::test]
    async fn returns_comment_count_and_writes_rows() {
        let dir = TempDir::new().expect("temporary directory should be created");
        let output = output_in(&dir);
        let mut gateway = MockCommentGateway::new();
        gateway.expect_pull_request_comments().returning(|_| {
            Ok(vec![
                PullRequestComment {
                    id: 1,
                    author: Some("alice".to_owned()),
                    created_at: None,
                },
                PullRequestComment {
                    id: 2,
                    author: Some("bob".to_owned()),
                    created_at: None,
                },
            ])
        });
        let recorder = CsvCommenterRecorder::new(&gateway);

        let count = recorder
            .fetch_commenters(&item(), &output)
            .await
            .expect("fetch should succeed");

        assert_eq!(count, 2);
        let contents = fs::read_to_string(&output.path).expect("output should be readable");
        assert_eq!(
            contents,
            "pr_ref,commenter,month_year\nacme/widget-api/7,alice,\nacme/widget-api/7,bob,\n"
        );
    }

    #[tokio::test]
    async fn gateway_failure_writes_nothing() {
        let dir = TempDir::new().expect("temporary directory should be created");
        let output = output_in(&dir);
        let mut gateway = MockCommentGateway::new();
        gateway.expect_pull_request_comments().returning(|_| {
            Err(IntakeError::Api {
                message: "not found".to_owned(),
            })
        });
        let recorder = CsvCommenterRecorder::new(&gateway);

        let result = recorder.fetch_commenters(&item(), &output).await;

        assert!(matches!(result, Err(IntakeError::Api { .. })));
        assert!(!output.path.exists(), "no output should be created");
    }
}
