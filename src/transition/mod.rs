//! Post lifecycle transitions and the listener that turns them into
//! revalidation requests.
//!
//! Flow: event → filter (autosave, cron, draft re-save, inherit) → slug
//! resolution → notifier.

pub mod event;
pub mod filter;
pub mod listener;

pub use event::{PostSummary, PostTransitionEvent, TriggerContext};
pub use filter::{SkipReason, should_revalidate, skip_reason};
pub use listener::{PostTransitionHandler, TransitionListener, TransitionOutcome};
