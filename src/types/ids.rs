//! Newtype wrappers for post identifiers and resolved paths.
//!
//! These types prevent accidental mixing of the different strings that flow
//! through a transition (e.g., passing a post type where a slug is expected).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The CMS's numeric post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PostId {
    fn from(n: u64) -> Self {
        PostId(n)
    }
}

/// A post type identifier (e.g., "post", "page", "book").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostType(pub String);

impl PostType {
    pub fn new(s: impl Into<String>) -> Self {
        PostType(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PostType {
    fn from(s: &str) -> Self {
        PostType(s.to_string())
    }
}

/// A post's URL-safe slug fragment.
///
/// Only unique within its type and hierarchy, and may change over the life
/// of the post. May be empty for posts that have never been published.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostName(pub String);

impl PostName {
    pub fn new(s: impl Into<String>) -> Self {
        PostName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PostName {
    fn from(s: &str) -> Self {
        PostName(s.to_string())
    }
}

/// A frontend path to invalidate (e.g., "/blog/hello-world").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevalidationTarget(pub String);

impl RevalidationTarget {
    pub fn new(s: impl Into<String>) -> Self {
        RevalidationTarget(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if there is nothing to revalidate.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RevalidationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RevalidationTarget {
    fn from(s: &str) -> Self {
        RevalidationTarget(s.to_string())
    }
}

impl From<String> for RevalidationTarget {
    fn from(s: String) -> Self {
        RevalidationTarget(s)
    }
}
