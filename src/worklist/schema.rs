//! Fixed header schema for pull request list files.

/// Header fields of a pull request list, in the order they must appear.
///
/// Files in this shape are produced by the submitter extraction tooling.
pub const PULL_REQUEST_LIST_FIELDS: [&str; 10] = [
    "org",
    "repository",
    "number",
    "url",
    "state",
    "created_at",
    "merged_at",
    "user.login",
    "month_year",
    "title",
];

/// Ordered field names a header must match exactly.
///
/// A schema is fixed once built; validators receive it at construction.
///
/// # Example
///
/// ```
/// use pr_commenters::worklist::Schema;
///
/// let schema = Schema::pull_request_list();
/// assert_eq!(schema.len(), 10);
/// assert_eq!(schema.fields().first().map(String::as_str), Some("org"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<String>,
}

impl Schema {
    /// Builds a schema from the given field names.
    #[must_use]
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Schema of the pull request list consumed by the commenters batch.
    #[must_use]
    pub fn pull_request_list() -> Self {
        Self::new(PULL_REQUEST_LIST_FIELDS)
    }

    /// Field names in order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the schema has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::pull_request_list()
    }
}
