//! Grouping issues into a tree keyed by field path.
//!
//! Every entry point runs the same single pass over the input:
//!
//! 1. Start from an empty root node.
//! 2. For each issue, in order, map it to a value, then walk its path from the
//!    root, creating one child per segment as needed, and append the value to
//!    the node reached. Issues with no path (or an empty one) land on the root.
//! 3. Return the root.
//!
//! The schema variants take a [`SchemaDescriptor`] only to tag the returned tree
//! with the validated shape; their output equals the untyped variants'.
//!
//! # Example
//!
//! ```rust
//! use issuetree::{format_issues_with, Issue};
//!
//! let issues = vec![
//!     Issue::new("passwords do not match"),
//!     Issue::new("is required").at(["email"]),
//!     Issue::new("is too short").at(["email"]),
//! ];
//!
//! let tree = format_issues_with(&issues, |issue| issue.message.clone());
//!
//! assert_eq!(tree.issues(), &["passwords do not match"]);
//! assert_eq!(tree.field("email").unwrap().issues(), &["is required", "is too short"]);
//! ```

mod schema;
mod tree;

pub use schema::{SchemaDescriptor, Unknown};
pub use tree::{FormattedIssues, IssueNode, ISSUES_KEY};

use std::convert::Infallible;

use stillwater::Validation;

use crate::issue::Issue;
use crate::ValidationResult;

fn build<'a, I, R, E, F>(issues: I, mut mapper: F) -> Result<FormattedIssues<Unknown, R>, E>
where
    I: IntoIterator<Item = &'a Issue>,
    F: FnMut(&Issue) -> Result<R, E>,
{
    let mut root = IssueNode::new();
    let mut seen = 0usize;

    for issue in issues {
        let value = mapper(issue)?;
        root.descend_mut(issue.path_segments()).push(value);
        seen += 1;
    }

    log::trace!(
        "formatted {} issue(s): {} form-level, {} top-level field(s)",
        seen,
        root.issues().len(),
        root.field_count()
    );

    Ok(FormattedIssues::from_node(root))
}

fn infallible<R, F>(mut mapper: F) -> impl FnMut(&Issue) -> Result<R, Infallible>
where
    F: FnMut(&Issue) -> R,
{
    move |issue| Ok(mapper(issue))
}

fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Groups issues by path, keeping each issue unchanged.
pub fn format_issues<'a, I>(issues: I) -> FormattedIssues<Unknown, Issue>
where
    I: IntoIterator<Item = &'a Issue>,
{
    format_issues_with(issues, Issue::clone)
}

/// Groups issues by path, keeping only each issue's message.
///
/// ```rust
/// use issuetree::{format_messages, Issue};
///
/// let tree = format_messages(&[Issue::new("m1").at(["foo"])]);
/// assert_eq!(tree.field("foo").unwrap().issues(), &["m1".to_string()]);
/// ```
pub fn format_messages<'a, I>(issues: I) -> FormattedIssues<Unknown, String>
where
    I: IntoIterator<Item = &'a Issue>,
{
    format_issues_with(issues, |issue| issue.message.clone())
}

/// Groups issues by path, storing `mapper(issue)` for each one.
///
/// `mapper` is called exactly once per issue, in input order.
pub fn format_issues_with<'a, I, R, F>(issues: I, mapper: F) -> FormattedIssues<Unknown, R>
where
    I: IntoIterator<Item = &'a Issue>,
    F: FnMut(&Issue) -> R,
{
    unwrap_infallible(build(issues, infallible(mapper)))
}

/// Groups issues by path with a fallible mapper.
///
/// The first error returned by `mapper` aborts the call and is returned as-is;
/// no partial tree is produced and later issues are not mapped.
///
/// ```rust
/// use issuetree::{try_format_issues_with, Issue};
///
/// let issues = vec![Issue::new("ok").at(["a"]), Issue::new("").at(["b"])];
///
/// let result = try_format_issues_with(&issues, |issue| {
///     if issue.message.is_empty() {
///         Err("empty message")
///     } else {
///         Ok(issue.message.to_uppercase())
///     }
/// });
///
/// assert_eq!(result.unwrap_err(), "empty message");
/// ```
pub fn try_format_issues_with<'a, I, R, E, F>(
    issues: I,
    mapper: F,
) -> Result<FormattedIssues<Unknown, R>, E>
where
    I: IntoIterator<Item = &'a Issue>,
    F: FnMut(&Issue) -> Result<R, E>,
{
    build(issues, mapper)
}

/// Schema-typed form of [`format_issues`].
///
/// `schema` is not read; it only fixes the shape marker of the result.
pub fn format_schema_issues<'a, S, I>(_schema: &S, issues: I) -> FormattedIssues<S::Output, Issue>
where
    S: SchemaDescriptor + ?Sized,
    I: IntoIterator<Item = &'a Issue>,
{
    format_issues(issues).reshape()
}

/// Schema-typed form of [`format_issues_with`].
pub fn format_schema_issues_with<'a, S, I, R, F>(
    _schema: &S,
    issues: I,
    mapper: F,
) -> FormattedIssues<S::Output, R>
where
    S: SchemaDescriptor + ?Sized,
    I: IntoIterator<Item = &'a Issue>,
    F: FnMut(&Issue) -> R,
{
    format_issues_with(issues, mapper).reshape()
}

/// Schema-typed form of [`try_format_issues_with`].
pub fn try_format_schema_issues_with<'a, S, I, R, E, F>(
    _schema: &S,
    issues: I,
    mapper: F,
) -> Result<FormattedIssues<S::Output, R>, E>
where
    S: SchemaDescriptor + ?Sized,
    I: IntoIterator<Item = &'a Issue>,
    F: FnMut(&Issue) -> Result<R, E>,
{
    try_format_issues_with(issues, mapper).map(FormattedIssues::reshape)
}

/// Unwraps a validation result, formatting the issues of a failure.
///
/// ```rust
/// use issuetree::{format_validation, Issue, Issues, ValidationResult};
/// use stillwater::Validation;
///
/// let result: ValidationResult<u32> =
///     Validation::Failure(Issues::single(Issue::new("must be positive").at(["age"])));
///
/// let tree = format_validation(result).unwrap_err();
/// assert_eq!(tree.field("age").unwrap().issues()[0].message, "must be positive");
/// ```
pub fn format_validation<T>(result: ValidationResult<T>) -> Result<T, FormattedIssues> {
    match result {
        Validation::Success(value) => Ok(value),
        Validation::Failure(issues) => Err(format_issues(&issues)),
    }
}
