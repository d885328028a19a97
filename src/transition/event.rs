//! Post lifecycle transition events.

use serde::{Deserialize, Serialize};

use crate::types::{PostId, PostName, PostStatus, PostType};

/// The post whose status changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// The CMS's post ID, when the sender includes it.
    pub id: Option<PostId>,
    pub post_type: PostType,
    pub post_name: PostName,
}

/// Describes what was running when the transition fired.
///
/// These are properties of the request that caused the change, not of the
/// post itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerContext {
    /// The editor's periodic autosave.
    pub is_autosave: bool,
    /// A scheduled background task (e.g., publishing a future post).
    pub is_cron: bool,
}

/// A single lifecycle transition, delivered once and handled synchronously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTransitionEvent {
    pub new_status: PostStatus,
    pub old_status: PostStatus,
    pub post: PostSummary,
    pub context: TriggerContext,
}

impl PostTransitionEvent {
    /// Creates an event fired from an ordinary editor request.
    pub fn new(
        new_status: impl Into<PostStatus>,
        old_status: impl Into<PostStatus>,
        post_type: impl Into<String>,
        post_name: impl Into<String>,
    ) -> Self {
        Self {
            new_status: new_status.into(),
            old_status: old_status.into(),
            post: PostSummary {
                id: None,
                post_type: PostType::new(post_type),
                post_name: PostName::new(post_name),
            },
            context: TriggerContext::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<PostId>) -> Self {
        self.post.id = Some(id.into());
        self
    }

    pub fn with_context(mut self, context: TriggerContext) -> Self {
        self.context = context;
        self
    }

    pub fn post_type(&self) -> &PostType {
        &self.post.post_type
    }

    pub fn post_name(&self) -> &PostName {
        &self.post.post_name
    }
}
