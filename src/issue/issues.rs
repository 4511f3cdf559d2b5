//! Issue and issue collection types.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::{IssuePath, PathSegment};

/// A single validation failure.
///
/// `Issue` carries:
/// - **message**: Human-readable description of the failure
/// - **path**: The field the failure applies to; absent or empty means the
///   issue applies to the form as a whole
///
/// # Example
///
/// ```rust
/// use issuetree::{Issue, IssuePath};
///
/// let issue = Issue::new("must not be empty").at(["user", "name"]);
///
/// assert_eq!(issue.path, Some(IssuePath::from_field("user").push_field("name")));
/// assert!(!issue.is_form_level());
/// assert!(Issue::new("passwords do not match").is_form_level());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Issue {
    /// Human-readable error message.
    pub message: String,
    /// The path to the offending field, if any.
    pub path: Option<IssuePath>,
}

impl Issue {
    /// Creates a form-level issue with the given message and no path.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    /// Sets the path and returns self for chaining.
    pub fn with_path(mut self, path: IssuePath) -> Self {
        self.path = Some(path);
        self
    }

    /// Sets the path from a sequence of segments and returns self for chaining.
    pub fn at<I, S>(self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.with_path(segments.into_iter().map(Into::into).collect())
    }

    /// Returns the path segments, or an empty slice when no path is set.
    pub fn path_segments(&self) -> &[PathSegment] {
        match &self.path {
            Some(path) => path.as_slice(),
            None => &[],
        }
    }

    /// Returns true if the issue applies to the form as a whole.
    pub fn is_form_level(&self) -> bool {
        self.path_segments().is_empty()
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) if !path.is_root() => write!(f, "{}: {}", path, self.message),
            _ => write!(f, "(root): {}", self.message),
        }
    }
}

impl std::error::Error for Issue {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// A non-empty collection of issues.
///
/// `Issues` wraps a `NonEmptyVec<Issue>` so that a failed validation always
/// carries at least one issue. It implements `Semigroup`, allowing issues from
/// independent validations to be accumulated:
///
/// ```rust
/// use issuetree::{Issue, Issues};
/// use stillwater::prelude::*;
///
/// let name = Issues::single(Issue::new("required").at(["name"]));
/// let email = Issues::single(Issue::new("invalid format").at(["email"]));
///
/// let combined = name.combine(email);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    /// Creates an `Issues` containing a single issue.
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Creates an `Issues` from a `NonEmptyVec`.
    pub fn from_non_empty(issues: NonEmptyVec<Issue>) -> Self {
        Self(issues)
    }

    /// Creates an `Issues` from a `Vec`, or `None` if the vec is empty.
    pub fn from_vec(issues: Vec<Issue>) -> Option<Self> {
        let mut issues = issues.into_iter();
        let head = issues.next()?;
        Some(Self(NonEmptyVec::new(head, issues.collect())))
    }

    /// Returns the number of issues.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the issues in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// Returns the first issue.
    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    /// Returns all issues whose path equals `path`.
    ///
    /// The root path matches issues with no path as well.
    pub fn at_path(&self, path: &IssuePath) -> Vec<&Issue> {
        self.0
            .iter()
            .filter(|issue| issue.path_segments() == path.as_slice())
            .collect()
    }

    /// Converts this collection into a `Vec<Issue>`.
    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_creation() {
        let issue = Issue::new("field is required");

        assert_eq!(issue.message, "field is required");
        assert!(issue.path.is_none());
        assert!(issue.is_form_level());
        assert!(issue.path_segments().is_empty());
    }

    #[test]
    fn test_empty_path_is_form_level() {
        let issue = Issue::new("x").with_path(IssuePath::root());
        assert!(issue.is_form_level());
    }

    #[test]
    fn test_at_mixes_segment_kinds() {
        let issue = Issue::new("x").at([PathSegment::field("items"), PathSegment::index(2)]);
        assert_eq!(issue.path.unwrap().to_string(), "items[2]");
    }

    #[test]
    fn test_issue_display() {
        assert_eq!(Issue::new("too short").at(["name"]).to_string(), "name: too short");
        assert_eq!(Issue::new("mismatch").to_string(), "(root): mismatch");
        assert_eq!(
            Issue::new("mismatch").with_path(IssuePath::root()).to_string(),
            "(root): mismatch"
        );
    }

    #[test]
    fn test_issues_from_empty_vec() {
        assert!(Issues::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_issues_combine_preserves_order() {
        let combined = Issues::single(Issue::new("1"))
            .combine(Issues::single(Issue::new("2")))
            .combine(Issues::single(Issue::new("3")));

        let messages: Vec<_> = combined.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["1", "2", "3"]);
        assert_eq!(combined.first().message, "1");
    }

    #[test]
    fn test_issues_at_path() {
        let issues = Issues::from_vec(vec![
            Issue::new("a1").at(["a"]),
            Issue::new("b").at(["b"]),
            Issue::new("a2").at(["a"]),
            Issue::new("form"),
        ])
        .unwrap();

        assert_eq!(issues.at_path(&IssuePath::from_field("a")).len(), 2);
        assert_eq!(issues.at_path(&IssuePath::root()).len(), 1);
    }

    #[test]
    fn test_issues_display() {
        let issues = Issues::single(Issue::new("required").at(["name"]))
            .combine(Issues::single(Issue::new("invalid").at(["email"])));
        let display = issues.to_string();

        assert!(display.contains("2 issue(s)"));
        assert!(display.contains("name: required"));
        assert!(display.contains("email: invalid"));
    }
}
