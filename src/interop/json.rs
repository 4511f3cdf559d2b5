//! JSON conversion for issues and formatted trees.

use std::borrow::Cow;

use serde_json::{json, Map, Value};

use crate::format::{FormattedIssues, IssueNode, ISSUES_KEY};
use crate::issue::Issue;
use crate::path::{IssuePath, PathSegment};

/// Trait for values that can be rendered as JSON.
///
/// Formatted trees render their node values through this trait, so any mapper
/// output implementing it can be serialized.
pub trait ToJson {
    /// Converts this value to a `serde_json::Value`.
    fn to_json(&self) -> Value;
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

impl ToJson for str {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToJson for Value {
    fn to_json(&self) -> Value {
        self.clone()
    }
}

impl ToJson for PathSegment {
    fn to_json(&self) -> Value {
        match self {
            PathSegment::Field(name) => Value::String(name.clone()),
            PathSegment::Index(idx) => json!(idx),
        }
    }
}

impl ToJson for IssuePath {
    fn to_json(&self) -> Value {
        Value::Array(self.segments().map(ToJson::to_json).collect())
    }
}

impl ToJson for Issue {
    fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("message".to_string(), Value::String(self.message.clone()));
        if let Some(path) = &self.path {
            obj.insert("path".to_string(), path.to_json());
        }
        Value::Object(obj)
    }
}

/// Returns the JSON key for a child field.
///
/// A name made of zero or more backslashes followed by `_issues` gains one more
/// leading backslash, so a field named `_issues` renders as `\_issues` and never
/// collides with the node's own issue list.
pub fn escape_field_key(name: &str) -> Cow<'_, str> {
    if name.trim_start_matches('\\') == ISSUES_KEY {
        Cow::Owned(format!("\\{}", name))
    } else {
        Cow::Borrowed(name)
    }
}

impl<R: ToJson> ToJson for IssueNode<R> {
    /// Renders the node with `_issues` first, then one entry per field.
    ///
    /// Field keys go through [`escape_field_key`].
    fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(
            ISSUES_KEY.to_string(),
            Value::Array(self.issues().iter().map(ToJson::to_json).collect()),
        );

        for (name, child) in self.fields() {
            obj.insert(escape_field_key(name).into_owned(), child.to_json());
        }

        Value::Object(obj)
    }
}

impl<T, R: ToJson> ToJson for FormattedIssues<T, R> {
    fn to_json(&self) -> Value {
        self.as_node().to_json()
    }
}

/// Errors produced when reading issues from JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IssueParseError {
    /// An issue was not a JSON object.
    #[error("issue must be an object")]
    NotAnObject,

    /// The issue list was not a JSON array.
    #[error("issues must be an array")]
    NotAnArray,

    /// An entry of an issue list failed to parse.
    #[error("issue {index}: {source}")]
    InvalidIssue {
        index: usize,
        #[source]
        source: Box<IssueParseError>,
    },
}

fn property_key(value: &Value) -> PathSegment {
    match value {
        Value::String(name) => PathSegment::Field(name.clone()),
        Value::Number(n) => match n.as_u64().and_then(|idx| usize::try_from(idx).ok()) {
            Some(idx) => PathSegment::Index(idx),
            None => PathSegment::Field(n.to_string()),
        },
        other => PathSegment::Field(other.to_string()),
    }
}

fn segment_from_json(value: &Value) -> PathSegment {
    match value.get("key") {
        Some(key) if value.is_object() => property_key(key),
        _ => property_key(value),
    }
}

impl Issue {
    /// Reads an issue from its JSON form.
    ///
    /// The expected shape is `{ "message": string, "path"?: [segment, ...] }` where
    /// each segment is a string, a non-negative integer, or `{ "key": ... }`.
    /// Anything else inside the object is tolerated rather than rejected:
    ///
    /// - a missing `message` becomes `""`, a non-string one its JSON text
    /// - a `path` that is not an array means no path
    /// - a segment that is neither a string nor an index is keyed by its JSON
    ///   text (`-1`, `true`, `1.5`)
    ///
    /// Only a value that is not an object is an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use issuetree::{Issue, IssuePath};
    /// use serde_json::json;
    ///
    /// let issue = Issue::from_json(&json!({
    ///     "message": "too short",
    ///     "path": ["tags", {"key": 0}]
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(issue.path, Some(IssuePath::from_field("tags").push_index(0)));
    /// ```
    pub fn from_json(value: &Value) -> Result<Issue, IssueParseError> {
        let obj = value.as_object().ok_or(IssueParseError::NotAnObject)?;

        let message = match obj.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let path = match obj.get("path") {
            Some(Value::Array(segments)) => Some(segments.iter().map(segment_from_json).collect()),
            _ => None,
        };

        Ok(Issue { message, path })
    }
}

/// Reads a JSON array of issues, preserving order.
pub fn issues_from_json(value: &Value) -> Result<Vec<Issue>, IssueParseError> {
    let items = value.as_array().ok_or(IssueParseError::NotAnArray)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Issue::from_json(item).map_err(|source| IssueParseError::InvalidIssue {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}
