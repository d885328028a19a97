//! Reacting to post lifecycle transitions.

use std::future::Future;

use tracing::{debug, info};

use super::event::PostTransitionEvent;
use super::filter::{SkipReason, skip_reason};
use crate::revalidation::{RevalidationNotifier, RevalidationOutcome};
use crate::slug::SlugResolver;
use crate::types::RevalidationTarget;

/// What happened in response to a transition.
#[derive(Debug)]
pub enum TransitionOutcome {
    /// The transition was filtered out; nothing was sent.
    Ignored(SkipReason),

    /// The post's path was resolved and handed to the notifier.
    Notified {
        target: RevalidationTarget,
        outcome: RevalidationOutcome,
    },
}

impl TransitionOutcome {
    /// Returns the revalidation outcome, if a notification was attempted.
    pub fn revalidation(&self) -> Option<&RevalidationOutcome> {
        match self {
            TransitionOutcome::Notified { outcome, .. } => Some(outcome),
            TransitionOutcome::Ignored(_) => None,
        }
    }
}

/// Receives post lifecycle transitions.
///
/// Called once per transition, in delivery order. Implementations must not
/// fail: the content change that fired the event has already happened.
pub trait PostTransitionHandler {
    fn on_post_transition(
        &self,
        event: &PostTransitionEvent,
    ) -> impl Future<Output = TransitionOutcome> + Send;
}

/// Filters transitions, resolves their frontend path and requests revalidation.
#[derive(Debug, Clone)]
pub struct TransitionListener<N> {
    resolver: SlugResolver,
    notifier: N,
}

impl<N> TransitionListener<N> {
    pub fn new(resolver: SlugResolver, notifier: N) -> Self {
        Self { resolver, notifier }
    }

    pub fn resolver(&self) -> &SlugResolver {
        &self.resolver
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

impl<N> PostTransitionHandler for TransitionListener<N>
where
    N: RevalidationNotifier + Sync,
{
    async fn on_post_transition(&self, event: &PostTransitionEvent) -> TransitionOutcome {
        if let Some(reason) = skip_reason(event) {
            debug!(
                post_id = event.post.id.map(|id| id.0),
                new_status = %event.new_status,
                old_status = %event.old_status,
                post_type = %event.post_type(),
                reason = %reason,
                "Ignoring transition"
            );
            return TransitionOutcome::Ignored(reason);
        }

        let target = self.resolver.resolve(event.post_type(), event.post_name());
        let outcome = self.notifier.notify(&target).await;

        if outcome.is_success() {
            info!(
                post_id = event.post.id.map(|id| id.0),
                path = %target,
                new_status = %event.new_status,
                old_status = %event.old_status,
                "Revalidated frontend path"
            );
        }

        TransitionOutcome::Notified { target, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revalidation::{HttpNotifier, RevalidationConfig, RevalidationError, SkipCause};
    use crate::test_utils::{RecordingNotifier, capture_logs};
    use crate::transition::event::TriggerContext;

    fn listener() -> TransitionListener<RecordingNotifier> {
        TransitionListener::new(SlugResolver::default(), RecordingNotifier::default())
    }

    #[tokio::test]
    async fn publish_notifies_resolved_path() {
        let listener = listener();
        let event = PostTransitionEvent::new("publish", "draft", "post", "hello-world");

        let outcome = listener.on_post_transition(&event).await;

        assert!(matches!(
            &outcome,
            TransitionOutcome::Notified { target, .. } if target.as_str() == "/blog/hello-world"
        ));
        assert_eq!(listener.notifier().targets(), vec!["/blog/hello-world"]);
    }

    #[tokio::test]
    async fn draft_resave_sends_nothing() {
        let listener = listener();
        let event = PostTransitionEvent::new("draft", "draft", "post", "wip");

        let outcome = listener.on_post_transition(&event).await;

        assert!(matches!(outcome, TransitionOutcome::Ignored(SkipReason::DraftResave)));
        assert!(listener.notifier().targets().is_empty());
    }

    #[tokio::test]
    async fn inherit_sends_nothing() {
        let listener = listener();
        let event = PostTransitionEvent::new("inherit", "new", "attachment", "photo");

        listener.on_post_transition(&event).await;

        assert!(listener.notifier().targets().is_empty());
    }

    #[tokio::test]
    async fn autosave_sends_nothing() {
        let listener = listener();
        let event = PostTransitionEvent::new("publish", "publish", "book", "dune").with_context(
            TriggerContext {
                is_autosave: true,
                is_cron: false,
            },
        );

        listener.on_post_transition(&event).await;

        assert!(listener.notifier().targets().is_empty());
    }

    #[tokio::test]
    async fn unrouted_type_uses_bare_slug() {
        let listener = listener();
        let event = PostTransitionEvent::new("publish", "draft", "page", "about");

        listener.on_post_transition(&event).await;

        assert_eq!(listener.notifier().targets(), vec!["about"]);
    }

    #[tokio::test]
    async fn remote_failure_is_returned_not_raised() {
        let listener = TransitionListener::new(
            SlugResolver::default(),
            RecordingNotifier::responding_with(500),
        );
        let event = PostTransitionEvent::new("publish", "draft", "book", "dune");

        let outcome = listener.on_post_transition(&event).await;

        assert!(matches!(
            outcome.revalidation(),
            Some(RevalidationOutcome::Failed(RevalidationError::Rejected { status: 500, .. }))
        ));
    }

    #[tokio::test]
    async fn empty_slug_is_left_to_notifier() {
        let listener = listener();
        let event = PostTransitionEvent::new("publish", "draft", "page", "");

        listener.on_post_transition(&event).await;

        assert_eq!(listener.notifier().targets(), vec![""]);
    }

    #[tokio::test]
    async fn disabled_notifier_outcome_is_surfaced() {
        let listener = TransitionListener::new(
            SlugResolver::default(),
            HttpNotifier::new(RevalidationConfig::disabled()),
        );
        let event = PostTransitionEvent::new("publish", "draft", "post", "hello");

        let outcome = listener.on_post_transition(&event).await;

        assert!(matches!(
            outcome.revalidation(),
            Some(RevalidationOutcome::Skipped(SkipCause::NotConfigured))
        ));
    }

    #[tokio::test]
    async fn each_event_is_notified_independently() {
        let listener = listener();
        let event = PostTransitionEvent::new("publish", "publish", "post", "same");

        listener.on_post_transition(&event).await;
        listener.on_post_transition(&event).await;

        assert_eq!(listener.notifier().targets(), vec!["/blog/same", "/blog/same"]);
    }

    #[tokio::test]
    async fn revalidation_log_carries_post_id() {
        let listener = listener();
        let event = PostTransitionEvent::new("publish", "draft", "post", "hello").with_id(42u64);

        let (logs, _guard) = capture_logs();
        listener.on_post_transition(&event).await;

        let lines = logs.lines();
        let line = lines
            .iter()
            .find(|l| l.contains("Revalidated frontend path"))
            .expect("revalidation logged");
        assert!(line.contains("post_id=42"), "{}", line);
        assert!(line.contains("path=/blog/hello"), "{}", line);
    }
}
