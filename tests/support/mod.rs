//! Shared test utilities.

use serde_json::{Value, json};
use tempfile::TempDir;

pub mod runtime;

/// Header row every pull request list must carry.
pub const LIST_HEADER: &str =
    "org,repository,number,url,state,created_at,merged_at,user.login,month_year,title";

/// Creates a temporary directory for input and output files.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Builds one data row for `org/repository#number`.
pub fn list_row(org: &str, repository: &str, number: &str) -> String {
    format!(
        "{org},{repository},{number},https://github.com/{org}/{repository}/pull/{number},\
         merged,2023-01-10T10:00:00Z,2023-01-11T10:00:00Z,octocat,2023-01,Improve docs"
    )
}

/// Builds a complete list for `acme/widget-api` with the given numbers.
pub fn widget_list(numbers: &[&str]) -> String {
    let mut text = format!("{LIST_HEADER}\n");
    for number in numbers {
        text.push_str(&list_row("acme", "widget-api", number));
        text.push('\n');
    }
    text
}

/// `GET /rate_limit` response body with the given remaining core quota.
pub fn rate_limit_body(remaining: u64) -> Value {
    let core = json!({
        "limit": 5000,
        "used": 5000_u64.saturating_sub(remaining),
        "remaining": remaining,
        "reset": 1_700_000_000_u64
    });
    json!({
        "resources": {
            "core": core,
            "search": { "limit": 30, "used": 0, "remaining": 30, "reset": 1_700_000_000_u64 }
        },
        "rate": core
    })
}

/// `count` comments by distinct authors, all created in February 2023.
pub fn comments_body(count: u64) -> Value {
    let comments: Vec<Value> = (0..count)
        .map(|index| {
            json!({
                "id": index + 1,
                "body": format!("comment {index}"),
                "user": { "login": format!("reviewer-{index}") },
                "created_at": "2023-02-14T09:30:00Z"
            })
        })
        .collect();
    Value::Array(comments)
}
