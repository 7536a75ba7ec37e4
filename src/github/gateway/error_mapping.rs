//! Translation of Octocrab failures into `IntakeError`.

use std::error::Error as _;

use http::StatusCode;

use crate::github::error::IntakeError;
use crate::github::rate_limit::RateLimitInfo;

/// True when GitHub refused the call because the quota ran out.
///
/// GitHub answers 403 or 429 for an exhausted quota and names it in the
/// message or the documentation link.
pub(super) fn is_rate_limited(source: &octocrab::GitHubError) -> bool {
    if !matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    ) {
        return false;
    }
    source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"))
}

/// Maps an Octocrab error raised while performing `operation`.
pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> IntakeError {
    match error {
        octocrab::Error::GitHub { source, .. } => map_github_error(operation, source),
        octocrab::Error::Http { .. }
        | octocrab::Error::Hyper { .. }
        | octocrab::Error::Service { .. } => IntakeError::Network {
            message: format!("{operation}: {}", describe(error)),
        },
        other => IntakeError::Api {
            message: format!("{operation}: {}", describe(other)),
        },
    }
}

/// Joins the cause chain of `error`.
///
/// Octocrab's own `Display` appends a captured backtrace, so only its first
/// line is used when there is no underlying cause.
pub(super) fn describe(error: &octocrab::Error) -> String {
    let mut causes = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    if causes.is_empty() {
        let rendered = error.to_string();
        return rendered.lines().next().unwrap_or_default().to_owned();
    }
    causes.join(": ")
}

fn map_github_error(operation: &str, source: &octocrab::GitHubError) -> IntakeError {
    let status = source.status_code;
    let message = format!("{operation}: GitHub answered {status} {}", source.message);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            IntakeError::Authentication { message }
        }
        _ => IntakeError::Api { message },
    }
}

/// Builds the quota error, naming the reset timestamp when it could be read.
pub(super) fn rate_limit_exceeded(
    operation: &str,
    source: &octocrab::GitHubError,
    rate_limit: Option<RateLimitInfo>,
) -> IntakeError {
    let message = rate_limit.map_or_else(
        || format!("{operation}: {}", source.message),
        |info| {
            format!(
                "{operation}: {} (quota resets at {})",
                source.message,
                info.reset_at()
            )
        },
    );
    IntakeError::RateLimitExceeded {
        rate_limit,
        message,
    }
}
