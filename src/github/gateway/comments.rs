//! Shared comment fetching helpers for GitHub gateways.

use octocrab::{Octocrab, Page};

use crate::github::models::{ApiComment, PullRequestComment};

/// Fetches every page of comments at `path`.
///
/// The raw Octocrab error is returned so callers can inspect it for rate
/// limiting before mapping it.
pub(super) async fn fetch_all_comments(
    client: &Octocrab,
    path: String,
) -> Result<Vec<PullRequestComment>, octocrab::Error> {
    let page = client
        .get::<Page<ApiComment>, _, _>(path, None::<&()>)
        .await?;

    client
        .all_pages(page)
        .await
        .map(|comments| comments.into_iter().map(ApiComment::into).collect())
}
