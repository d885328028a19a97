//! Deciding which transitions warrant revalidation.
//!
//! Most status changes the CMS reports are noise from the frontend's point of
//! view: autosaves, background tasks, repeated draft saves, and revisions.
//! The filter is pure; the same event always gets the same answer.

use std::fmt;

use super::event::PostTransitionEvent;
use crate::types::PostStatus;

/// Why a transition was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fired by the editor's autosave.
    Autosave,
    /// Fired by a scheduled background task.
    Cron,
    /// A draft was saved again as a draft.
    DraftResave,
    /// A revision or attachment, which is never a standalone page.
    Inherit,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::Autosave => "autosave",
            SkipReason::Cron => "cron",
            SkipReason::DraftResave => "draft re-save",
            SkipReason::Inherit => "inherit status",
        };
        f.write_str(s)
    }
}

/// Returns the reason to ignore `event`, or `None` if it should be revalidated.
pub fn skip_reason(event: &PostTransitionEvent) -> Option<SkipReason> {
    if event.context.is_autosave {
        return Some(SkipReason::Autosave);
    }
    if event.context.is_cron {
        return Some(SkipReason::Cron);
    }

    match (&event.new_status, &event.old_status) {
        (PostStatus::Inherit, _) => Some(SkipReason::Inherit),
        (PostStatus::Draft, PostStatus::Draft) => Some(SkipReason::DraftResave),
        _ => None,
    }
}

/// Returns true if `event` should trigger revalidation.
pub fn should_revalidate(event: &PostTransitionEvent) -> bool {
    skip_reason(event).is_none()
}
