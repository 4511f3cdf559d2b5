//! The formatted issue tree.
//!
//! [`IssueNode`] is one level of the tree: the issues that end exactly at its
//! path plus one child per distinct next path segment. [`FormattedIssues`] is the
//! root node tagged with the shape of the validated data.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use indexmap::IndexMap;

use crate::path::{IssuePath, PathSegment};

use super::schema::Unknown;

/// Key under which a node's own issues appear in serialized output.
pub const ISSUES_KEY: &str = "_issues";

/// A node of a formatted issue tree.
///
/// Children are kept in the order their field names were first seen in the
/// input issue list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueNode<R> {
    issues: Vec<R>,
    children: IndexMap<String, IssueNode<R>>,
}

impl<R> IssueNode<R> {
    /// Creates a node with no issues and no children.
    pub fn new() -> Self {
        Self {
            issues: Vec::new(),
            children: IndexMap::new(),
        }
    }

    /// Returns the issues that apply exactly at this node, in input order.
    pub fn issues(&self) -> &[R] {
        &self.issues
    }

    /// Returns the child node for `name`, if any issue reached it.
    pub fn field(&self, name: &str) -> Option<&IssueNode<R>> {
        self.children.get(name)
    }

    /// Returns the child nodes in first-seen order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &IssueNode<R>)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Returns the number of child nodes.
    pub fn field_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the node at `path` relative to this node.
    ///
    /// The root path returns this node.
    pub fn get(&self, path: &IssuePath) -> Option<&IssueNode<R>> {
        path.segments()
            .try_fold(self, |node, segment| node.children.get(&*segment.key()))
    }

    /// Returns the number of issues in this node and all of its descendants.
    pub fn issue_count(&self) -> usize {
        self.issues.len()
            + self
                .children
                .values()
                .map(IssueNode::issue_count)
                .sum::<usize>()
    }

    /// Returns true if the node has neither issues nor children.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.children.is_empty()
    }

    /// Consumes the node, returning its own issues and its children.
    pub fn into_parts(self) -> (Vec<R>, IndexMap<String, IssueNode<R>>) {
        (self.issues, self.children)
    }

    /// Walks `segments` from this node, creating missing children on the way.
    pub(crate) fn descend_mut(&mut self, segments: &[PathSegment]) -> &mut IssueNode<R> {
        let mut node = self;
        for segment in segments {
            node = node
                .children
                .entry(segment.key().into_owned())
                .or_insert_with(IssueNode::new);
        }
        node
    }

    pub(crate) fn push(&mut self, value: R) {
        self.issues.push(value);
    }
}

impl<R> Default for IssueNode<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// A tree of issues grouped by field path.
///
/// `T` is the shape of the validated data when the tree was built from a
/// [`SchemaDescriptor`](super::SchemaDescriptor), and [`Unknown`] otherwise.
/// It only affects the type; two trees with the same nodes are equal whatever
/// their shape marker.
///
/// `FormattedIssues` dereferences to its root [`IssueNode`].
pub struct FormattedIssues<T = Unknown, R = crate::Issue> {
    root: IssueNode<R>,
    shape: PhantomData<fn() -> T>,
}

impl<T, R> FormattedIssues<T, R> {
    pub(crate) fn from_node(root: IssueNode<R>) -> Self {
        Self {
            root,
            shape: PhantomData,
        }
    }

    /// Returns the root node.
    pub fn as_node(&self) -> &IssueNode<R> {
        &self.root
    }

    /// Consumes the tree, returning the root node.
    pub fn into_node(self) -> IssueNode<R> {
        self.root
    }

    /// Drops the shape marker.
    pub fn erase(self) -> FormattedIssues<Unknown, R> {
        self.reshape()
    }

    /// Re-tags the same nodes with another shape marker.
    pub(crate) fn reshape<U>(self) -> FormattedIssues<U, R> {
        FormattedIssues::from_node(self.root)
    }
}

impl<T, R> Deref for FormattedIssues<T, R> {
    type Target = IssueNode<R>;

    fn deref(&self) -> &Self::Target {
        &self.root
    }
}

impl<T, R: Clone> Clone for FormattedIssues<T, R> {
    fn clone(&self) -> Self {
        Self::from_node(self.root.clone())
    }
}

impl<T, R: fmt::Debug> fmt::Debug for FormattedIssues<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattedIssues")
            .field("root", &self.root)
            .finish()
    }
}

impl<T, U, R: PartialEq> PartialEq<FormattedIssues<U, R>> for FormattedIssues<T, R> {
    fn eq(&self, other: &FormattedIssues<U, R>) -> bool {
        self.root == other.root
    }
}

impl<T, R: Eq> Eq for FormattedIssues<T, R> {}
