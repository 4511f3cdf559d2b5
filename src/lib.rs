//! # Issuetree
//!
//! Turns a flat list of validation issues into a tree of messages keyed by
//! field path, ready for a form to render next to each field.
//!
//! ## Overview
//!
//! Schema validators report failures as a list of issues, each with a message
//! and an optional path to the offending field. Forms want the opposite view:
//! for every field, the issues that belong to it. Issuetree groups the list in
//! one ordered pass, optionally mapping each issue to whatever value the form
//! displays.
//!
//! ## Core Types
//!
//! - [`Issue`]: A validation failure with a message and optional [`IssuePath`]
//! - [`Issues`]: A non-empty collection of issues, the failure side of [`ValidationResult`]
//! - [`FormattedIssues`]: The grouped tree; each [`IssueNode`] holds the issues ending there
//! - [`SchemaDescriptor`]: Type-level description of the validated data
//!
//! ## Example
//!
//! ```rust
//! use issuetree::{format_issues_with, Issue, ToJson};
//! use serde_json::json;
//!
//! let issues = vec![
//!     Issue::new("Error message 1").at(["foo"]),
//!     Issue::new("Error message 2").at(["bar"]),
//! ];
//!
//! let tree = format_issues_with(&issues, |issue| issue.message.clone());
//!
//! assert_eq!(
//!     tree.to_json(),
//!     json!({
//!         "_issues": [],
//!         "foo": { "_issues": ["Error message 1"] },
//!         "bar": { "_issues": ["Error message 2"] }
//!     })
//! );
//! ```

pub mod format;
pub mod interop;
pub mod issue;
pub mod path;

pub use format::{
    format_issues, format_issues_with, format_messages, format_schema_issues,
    format_schema_issues_with, format_validation, try_format_issues_with,
    try_format_schema_issues_with, FormattedIssues, IssueNode, SchemaDescriptor, Unknown,
    ISSUES_KEY,
};
pub use interop::{escape_field_key, issues_from_json, IssueParseError, ToJson};
pub use issue::{Issue, Issues};
pub use path::{IssuePath, PathParseError, PathSegment};

/// Type alias for validation results carrying [`Issues`] on failure.
pub type ValidationResult<T> = stillwater::Validation<T, Issues>;
