//! API endpoint and credential wrappers for GitHub access.

use http::Uri;
use url::Url;

use super::error::IntakeError;

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, IntakeError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IntakeError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// REST API base URL.
///
/// Accepts either an API URL or the web URL of a GitHub host:
/// `https://github.com` and `https://api.github.com` both resolve to the
/// public API, while any other host is treated as GitHub Enterprise and
/// served under `/api/v3`.
///
/// # Example
///
/// ```
/// use pr_commenters::github::ApiBase;
///
/// let public = ApiBase::parse("https://github.com").expect("valid URL");
/// assert_eq!(public.as_str(), "https://api.github.com/");
///
/// let enterprise = ApiBase::parse("https://ghe.example.com").expect("valid URL");
/// assert_eq!(enterprise.as_str(), "https://ghe.example.com/api/v3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    /// Parses and normalises an API or host URL.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidUrl` when the input is not an absolute URL
    /// with a host.
    pub fn parse(input: &str) -> Result<Self, IntakeError> {
        let parsed =
            Url::parse(input).map_err(|error| IntakeError::InvalidUrl(error.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| IntakeError::InvalidUrl("URL must include a host".to_owned()))?;

        derive_api_base_from_host(parsed.scheme(), host, parsed.port()).map(Self)
    }

    /// Borrow the URL as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The base as an HTTP URI for the Octocrab builder.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidUrl` when the URL is not a valid URI.
    pub fn uri(&self) -> Result<Uri, IntakeError> {
        self.as_str()
            .parse::<Uri>()
            .map_err(|error| IntakeError::InvalidUrl(error.to_string()))
    }
}

fn derive_api_base_from_host(
    scheme: &str,
    host: &str,
    port: Option<u16>,
) -> Result<Url, IntakeError> {
    if host.eq_ignore_ascii_case("github.com") || host.eq_ignore_ascii_case("api.github.com") {
        return Url::parse(DEFAULT_API_URL)
            .map_err(|error| IntakeError::InvalidUrl(error.to_string()));
    }

    let authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("{scheme}://{authority}"))
        .map_err(|error| IntakeError::InvalidUrl(error.to_string()))?;

    api_url
        .set_port(port)
        .map_err(|()| IntakeError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api/v3");
    Ok(api_url)
}
