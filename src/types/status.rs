//! Post lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A post's lifecycle status as reported by the CMS.
///
/// The set of statuses is CMS-defined and open-ended (plugins can register
/// their own), so anything unrecognised is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostStatus {
    Draft,
    AutoDraft,
    Pending,
    Private,
    Future,
    Publish,
    /// Revisions and attachments inherit their parent's status.
    Inherit,
    Trash,
    Other(String),
}

impl PostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::AutoDraft => "auto-draft",
            PostStatus::Pending => "pending",
            PostStatus::Private => "private",
            PostStatus::Future => "future",
            PostStatus::Publish => "publish",
            PostStatus::Inherit => "inherit",
            PostStatus::Trash => "trash",
            PostStatus::Other(s) => s,
        }
    }
}

impl From<&str> for PostStatus {
    fn from(s: &str) -> Self {
        match s {
            "draft" => PostStatus::Draft,
            "auto-draft" => PostStatus::AutoDraft,
            "pending" => PostStatus::Pending,
            "private" => PostStatus::Private,
            "future" => PostStatus::Future,
            "publish" => PostStatus::Publish,
            "inherit" => PostStatus::Inherit,
            "trash" => PostStatus::Trash,
            other => PostStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for PostStatus {
    fn from(s: String) -> Self {
        PostStatus::from(s.as_str())
    }
}

impl From<PostStatus> for String {
    fn from(status: PostStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
