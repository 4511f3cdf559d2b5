//! Type-level schema descriptors.
//!
//! A [`SchemaDescriptor`] names the shape of the data a schema validates. The
//! formatter only uses it to tag the returned tree with that shape; it is never
//! called or inspected at runtime.

use std::marker::PhantomData;

/// A description of the data a schema validates.
///
/// Implement this for your schema type so formatted trees carry the validated
/// shape in their type:
///
/// ```rust
/// use issuetree::{format_schema_issues, FormattedIssues, Issue, SchemaDescriptor};
///
/// struct SignupForm {
///     email: String,
/// }
///
/// struct SignupSchema;
///
/// impl SchemaDescriptor for SignupSchema {
///     type Output = SignupForm;
/// }
///
/// let issues = vec![Issue::new("invalid email").at(["email"])];
/// let tree: FormattedIssues<SignupForm> = format_schema_issues(&SignupSchema, &issues);
/// assert_eq!(tree.field("email").unwrap().issues().len(), 1);
/// ```
pub trait SchemaDescriptor {
    /// The type of a successfully validated value.
    type Output;
}

impl<S: SchemaDescriptor + ?Sized> SchemaDescriptor for &S {
    type Output = S::Output;
}

impl<T> SchemaDescriptor for PhantomData<T> {
    type Output = T;
}

/// Shape marker for trees formatted without a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown {}
