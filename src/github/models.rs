//! Data models representing pull request comments.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A comment left on a pull request, either in the conversation or on the
/// diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestComment {
    /// Comment identifier.
    pub id: u64,
    /// Author login, absent for deleted accounts.
    pub author: Option<String>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
}

impl PullRequestComment {
    /// Month the comment was written, formatted `YYYY-MM`.
    #[must_use]
    pub fn month_year(&self) -> Option<String> {
        self.created_at
            .map(|created_at| created_at.format("%Y-%m").to_string())
    }
}

/// Shape shared by issue comments and review comments in the REST API.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComment {
    pub(super) id: u64,
    pub(super) user: Option<ApiUser>,
    pub(super) created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

impl From<ApiComment> for PullRequestComment {
    fn from(value: ApiComment) -> Self {
        Self {
            id: value.id,
            author: value.user.and_then(|user| user.login),
            created_at: value.created_at,
        }
    }
}
