//! Issue path representation for locating the field an issue applies to.
//!
//! This module provides [`IssuePath`] and [`PathSegment`] types for building,
//! parsing and rendering paths such as `users[0].email`.

use std::borrow::Cow;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// A single step of `field`, `.field`, `[index]` or `["quoted field"]` in the display form.
static SEGMENT_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r#"(?s)^(?:\.?([^.\[\]"\\]+)|\[(\d+)\]|\["((?:[^"\\]|\\.)*)"\])"#)
});

/// Returns true if a field name can be written bare, without brackets and quotes.
fn is_bare_field(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| matches!(c, '.' | '[' | ']' | '"' | '\\'))
}

fn write_quoted(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    write!(f, "[\"")?;
    for c in name.chars() {
        if matches!(c, '"' | '\\') {
            write!(f, "\\")?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, "\"]")
}

fn unquote(quoted: &str) -> String {
    let mut name = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => name.extend(chars.next()),
            c => name.push(c),
        }
    }
    name
}

/// A segment of an issue path.
///
/// Paths are built from segments that represent either field access or array indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `user`, `email`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Returns the key this segment occupies in a formatted issue tree.
    ///
    /// Index segments are keyed by their decimal rendering, so `Index(0)` and
    /// `Field("0")` address the same child.
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            PathSegment::Field(name) => Cow::Borrowed(name.as_str()),
            PathSegment::Index(idx) => Cow::Owned(idx.to_string()),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// The path of the field an issue applies to.
///
/// `IssuePath` represents locations like `users[0].email` and provides
/// methods for building paths incrementally. The root path (no segments)
/// addresses the form as a whole.
///
/// Field names that are empty or contain `.`, `[`, `]`, `"` or `\` are
/// written in quoted brackets (`["a.b"]`, with `"` and `\` backslash-escaped),
/// so every path parses back from its display form.
///
/// # Example
///
/// ```rust
/// use issuetree::IssuePath;
///
/// let path = IssuePath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// assert_eq!("users[0].email".parse::<IssuePath>().unwrap(), path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IssuePath {
    segments: Vec<PathSegment>,
}

impl IssuePath {
    /// Creates an empty path representing the whole form.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Creates a path from a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![PathSegment::Index(idx)],
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the segments as a slice.
    pub fn as_slice(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for IssuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if is_bare_field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Field(name) => write_quoted(f, name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl From<Vec<PathSegment>> for IssuePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<PathSegment> for IssuePath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// Errors produced when parsing a dotted path string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    /// The input could not be split into segments at the given byte offset.
    #[error("invalid path segment at offset {offset} in '{input}'")]
    InvalidSegment { input: String, offset: usize },

    /// An index segment does not fit in `usize`.
    #[error("index '{0}' is out of range")]
    IndexOutOfRange(String),

    /// The segment pattern failed to compile.
    #[error("invalid segment pattern: {0}")]
    Pattern(String),
}

impl FromStr for IssuePath {
    type Err = PathParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let segment_re = SEGMENT_RE
            .as_ref()
            .map_err(|err| PathParseError::Pattern(err.to_string()))?;
        let mut segments = Vec::new();
        let mut offset = 0;

        while offset < input.len() {
            let rest = &input[offset..];
            // A leading dot is only a separator, never the first character.
            if offset == 0 && rest.starts_with('.') {
                return Err(PathParseError::InvalidSegment {
                    input: input.to_string(),
                    offset,
                });
            }

            let caps = segment_re
                .captures(rest)
                .ok_or_else(|| PathParseError::InvalidSegment {
                    input: input.to_string(),
                    offset,
                })?;

            // Field segments after the first must be introduced by a dot.
            if let Some(name) = caps.get(1) {
                if offset > 0 && !rest.starts_with('.') {
                    return Err(PathParseError::InvalidSegment {
                        input: input.to_string(),
                        offset,
                    });
                }
                segments.push(PathSegment::Field(name.as_str().to_string()));
            } else if let Some(idx) = caps.get(2) {
                let idx = idx
                    .as_str()
                    .parse::<usize>()
                    .map_err(|_| PathParseError::IndexOutOfRange(idx.as_str().to_string()))?;
                segments.push(PathSegment::Index(idx));
            } else if let Some(quoted) = caps.get(3) {
                segments.push(PathSegment::Field(unquote(quoted.as_str())));
            }

            offset += caps.get(0).map_or(0, |m| m.end());
        }

        Ok(Self { segments })
    }
}
