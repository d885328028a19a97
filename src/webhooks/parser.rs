//! CMS webhook payload parser.
//!
//! The event type comes from the `x-bridge-event` header. Known event types
//! are parsed into typed events; unknown ones return `Ok(None)` so the CMS
//! can add hooks without breaking older bridges.

use serde::Deserialize;
use thiserror::Error;

use crate::transition::{PostSummary, PostTransitionEvent, TriggerContext};
use crate::types::{PostId, PostName, PostStatus, PostType};

/// Event type for post status transitions.
pub const EVENT_TRANSITION_POST_STATUS: &str = "transition_post_status";

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Field has an invalid value.
    #[error("invalid field value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// A parsed CMS webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmsEvent {
    PostTransition(PostTransitionEvent),
}

/// Parses a webhook payload into a typed event.
///
/// # Returns
///
/// * `Ok(Some(event))` - a known event type
/// * `Ok(None)` - an unknown event type (ignored, not an error)
/// * `Err(e)` - malformed payload
///
/// # Examples
///
/// ```
/// use headless_bridge::webhooks::{CmsEvent, parse_webhook};
///
/// let payload = br#"{
///     "new_status": "publish",
///     "old_status": "draft",
///     "post": { "ID": 42, "post_type": "post", "post_name": "hello-world" }
/// }"#;
///
/// let event = parse_webhook("transition_post_status", payload).unwrap();
/// assert!(matches!(event, Some(CmsEvent::PostTransition(_))));
/// ```
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> Result<Option<CmsEvent>, ParseError> {
    match event_type {
        EVENT_TRANSITION_POST_STATUS => {
            parse_transition(payload).map(|e| Some(CmsEvent::PostTransition(e)))
        }
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct RawTransitionPayload {
    new_status: String,
    old_status: String,
    post: RawPost,
    #[serde(default)]
    context: RawContext,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    #[serde(rename = "ID", alias = "id", default)]
    id: Option<u64>,
    post_type: String,
    // Never-published posts have no slug yet; the CMS may send null.
    #[serde(default)]
    post_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawContext {
    #[serde(default)]
    autosave: bool,
    #[serde(default)]
    cron: bool,
}

fn parse_transition(payload: &[u8]) -> Result<PostTransitionEvent, ParseError> {
    let raw: RawTransitionPayload = serde_json::from_slice(payload)?;

    let new_status = required("new_status", raw.new_status)?;
    let old_status = required("old_status", raw.old_status)?;
    let post_type = required("post.post_type", raw.post.post_type)?;

    Ok(PostTransitionEvent {
        new_status: PostStatus::from(new_status),
        old_status: PostStatus::from(old_status),
        post: PostSummary {
            id: raw.post.id.map(PostId),
            post_type: PostType(post_type),
            post_name: PostName(raw.post.post_name.unwrap_or_default()),
        },
        context: TriggerContext {
            is_autosave: raw.context.autosave,
            is_cron: raw.context.cron,
        },
    })
}

fn required(field: &'static str, value: String) -> Result<String, ParseError> {
    if value.trim().is_empty() {
        Err(ParseError::InvalidField { field, value })
    } else {
        Ok(value)
    }
}
