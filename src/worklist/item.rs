//! Identity wrappers for the pull requests named in a work list.

use std::fmt;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// GitHub rejects organisation logins longer than this.
const MAX_ORGANISATION_LENGTH: usize = 39;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static ORGANISATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$")
        .case_insensitive(true)
        .unicode(false)
        .build()
        .expect("organisation pattern should compile")
});

// https://stackoverflow.com/questions/59081778/rules-for-special-characters-in-github-repository-name
#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static PROJECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^[\w\-.]+$")
        .unicode(false)
        .build()
        .expect("project pattern should compile")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^\d+$")
        .unicode(false)
        .build()
        .expect("number pattern should compile")
});

/// GitHub organisation (or user) login owning a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrganisationName(String);

impl OrganisationName {
    /// Accepts plausible GitHub organisation names: ASCII alphanumerics
    /// separated by single hyphens, at most 39 characters.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        (value.len() <= MAX_ORGANISATION_LENGTH && ORGANISATION_PATTERN.is_match(value))
            .then(|| Self(value.to_owned()))
    }

    /// Borrow the organisation name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository (project) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Accepts names whose lower-cased form fully matches `^[\w\-.]+$`.
    ///
    /// The original casing is kept.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        PROJECT_PATTERN
            .is_match(&value.to_lowercase())
            .then(|| Self(value.to_owned()))
    }

    /// Borrow the project name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number as written in the source row.
///
/// The digits are kept verbatim so the canonical identifier reproduces the
/// input exactly, leading zeros included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PullRequestNumber(String);

impl PullRequestNumber {
    /// Accepts one or more ASCII digits with no sign or whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        NUMBER_PATTERN
            .is_match(value)
            .then(|| Self(value.to_owned()))
    }

    /// Borrow the digits.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// One pull request to process, rendered as `org/project/number`.
///
/// # Example
///
/// ```
/// use pr_commenters::worklist::{OrganisationName, ProjectName, PullRequestNumber, WorkItem};
///
/// let item = WorkItem::new(
///     OrganisationName::parse("acme").expect("valid org"),
///     ProjectName::parse("widget-api").expect("valid project"),
///     PullRequestNumber::parse("42").expect("valid number"),
/// );
/// assert_eq!(item.to_string(), "acme/widget-api/42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    organisation: OrganisationName,
    project: ProjectName,
    number: PullRequestNumber,
}

impl WorkItem {
    /// Creates a work item from validated parts.
    #[must_use]
    pub const fn new(
        organisation: OrganisationName,
        project: ProjectName,
        number: PullRequestNumber,
    ) -> Self {
        Self {
            organisation,
            project,
            number,
        }
    }

    /// Owning organisation.
    #[must_use]
    pub const fn organisation(&self) -> &OrganisationName {
        &self.organisation
    }

    /// Repository name.
    #[must_use]
    pub const fn project(&self) -> &ProjectName {
        &self.project
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> &PullRequestNumber {
        &self.number
    }

    pub(crate) fn comments_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues/{}/comments",
            self.organisation.as_str(),
            self.project.as_str(),
            self.number.as_str()
        )
    }

    pub(crate) fn review_comments_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls/{}/comments",
            self.organisation.as_str(),
            self.project.as_str(),
            self.number.as_str()
        )
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}/{}/{}",
            self.organisation.as_str(),
            self.project.as_str(),
            self.number.as_str()
        )
    }
}

/// Ordered list of pull requests, in input file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkList {
    items: Vec<WorkItem>,
}

impl WorkList {
    /// Items in order.
    #[must_use]
    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the list holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, WorkItem> {
        self.items.iter()
    }

    /// Canonical `org/project/number` strings in order.
    #[must_use]
    pub fn canonical(&self) -> Vec<String> {
        self.items.iter().map(ToString::to_string).collect()
    }
}

impl<'list> IntoIterator for &'list WorkList {
    type Item = &'list WorkItem;
    type IntoIter = std::slice::Iter<'list, WorkItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Accumulates validated items into a [`WorkList`].
///
/// No deduplication happens: a pull request listed twice is processed twice.
#[derive(Debug, Default)]
pub struct WorkListBuilder {
    items: Vec<WorkItem>,
}

impl WorkListBuilder {
    /// Appends an item after the ones already pushed.
    pub fn push(&mut self, item: WorkItem) {
        self.items.push(item);
    }

    /// Finishes the list.
    #[must_use]
    pub fn build(self) -> WorkList {
        WorkList { items: self.items }
    }
}
