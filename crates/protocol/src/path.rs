//! Namespace path convention.
//!
//! The store namespace is flat: "directories" are only string prefixes.
//! A [`RemotePath`] is the normalized form of such a prefix (or of a full
//! file path). Joining a leaf onto a directory always inserts exactly one
//! `/`, so `"/docs"` and `"/docs/"` resolve `report.csv` to the same
//! `"/docs/report.csv"`.

use std::fmt;
use std::str::FromStr;

/// Errors produced when building namespace paths.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("empty file name")]
    EmptyName,

    #[error("file name must not contain '/': {0}")]
    Separator(String),

    #[error("reserved file name not allowed: {0}")]
    Reserved(String),

    #[error("parent directory traversal not allowed: {0}")]
    Traversal(String),
}

/// A normalized, absolute path in the store namespace.
///
/// Always starts with `/`, never ends with `/` (except the root itself),
/// and never contains empty, `.` or `..` segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemotePath(String);

impl RemotePath {
    /// The namespace root, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Parses and normalizes a path string.
    ///
    /// Repeated and trailing slashes are collapsed and `.` segments are
    /// dropped. A missing leading slash is added. `..` is rejected.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let mut normalized = String::with_capacity(raw.len() + 1);
        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => return Err(PathError::Traversal(raw.to_string())),
                s => {
                    normalized.push('/');
                    normalized.push_str(s);
                }
            }
        }
        if normalized.is_empty() {
            return Ok(Self::root());
        }
        Ok(Self(normalized))
    }

    /// Resolves `leaf` inside this directory.
    pub fn join(&self, leaf: &str) -> Result<Self, PathError> {
        validate_leaf_name(leaf)?;
        if self.is_root() {
            Ok(Self(format!("/{leaf}")))
        } else {
            Ok(Self(format!("{}/{leaf}", self.0)))
        }
    }

    /// Returns `true` for `/`.
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// The path as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Last segment, or `None` for the root.
    pub fn leaf(&self) -> Option<&str> {
        self.segments().last()
    }

    /// The enclosing prefix; the root is its own parent.
    pub fn parent(&self) -> Self {
        match self.0.rfind('/') {
            Some(0) | None => Self::root(),
            Some(idx) => Self(self.0[..idx].to_string()),
        }
    }
}

impl Default for RemotePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RemotePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validates a single entry name before it is joined onto a directory.
///
/// Rejects:
/// - Empty names
/// - Names containing `/` (they would fabricate extra prefix levels)
/// - `.` and `..`
pub fn validate_leaf_name(name: &str) -> Result<(), PathError> {
    if name.is_empty() {
        return Err(PathError::EmptyName);
    }
    if name.contains('/') {
        return Err(PathError::Separator(name.to_string()));
    }
    if name == "." || name == ".." {
        return Err(PathError::Reserved(name.to_string()));
    }
    Ok(())
}
