//! Shared test utilities and arbitrary generators for property-based testing.

use std::io;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use reqwest::StatusCode;

use crate::revalidation::{RevalidationError, RevalidationNotifier, RevalidationOutcome};
use crate::transition::{PostTransitionEvent, TriggerContext};
use crate::types::{PostStatus, RevalidationTarget};

/// A notifier that records every target instead of touching the network.
///
/// Answers every call with success, or with a rejection carrying the
/// configured status.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    targets: Mutex<Vec<String>>,
    reject_with: Option<u16>,
}

impl RecordingNotifier {
    pub fn responding_with(status: u16) -> Self {
        Self {
            targets: Mutex::new(Vec::new()),
            reject_with: (status != 200).then_some(status),
        }
    }

    /// Targets received so far, in call order.
    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

impl RevalidationNotifier for RecordingNotifier {
    async fn notify(&self, target: &RevalidationTarget) -> RevalidationOutcome {
        self.targets.lock().unwrap().push(target.as_str().to_string());

        match self.reject_with {
            None => RevalidationOutcome::Success,
            Some(code) => {
                let status = StatusCode::from_u16(code).unwrap();
                RevalidationOutcome::Failed(RevalidationError::rejected(status, None))
            }
        }
    }
}

/// Log output collected by a test subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lines logged at `warn` or `error`.
    pub fn warn_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.contains("WARN") || l.contains("ERROR"))
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Captures `debug` and above on the current thread until the guard drops.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

pub fn arb_post_status() -> impl Strategy<Value = PostStatus> {
    prop_oneof![
        Just(PostStatus::Draft),
        Just(PostStatus::AutoDraft),
        Just(PostStatus::Pending),
        Just(PostStatus::Private),
        Just(PostStatus::Future),
        Just(PostStatus::Publish),
        Just(PostStatus::Inherit),
        Just(PostStatus::Trash),
        "[a-z]{3,12}".prop_map(|s| PostStatus::from(s.as_str())),
    ]
}

pub fn arb_post_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("post".to_string()),
        Just("page".to_string()),
        Just("book".to_string()),
        "[a-z_]{1,20}",
    ]
}

pub fn arb_post_name() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9-]{0,40}".prop_map(String::from)
}

pub fn arb_trigger_context() -> impl Strategy<Value = TriggerContext> {
    (any::<bool>(), any::<bool>()).prop_map(|(is_autosave, is_cron)| TriggerContext {
        is_autosave,
        is_cron,
    })
}

pub fn arb_transition_event() -> impl Strategy<Value = PostTransitionEvent> {
    (
        arb_post_status(),
        arb_post_status(),
        arb_post_type(),
        arb_post_name(),
        arb_trigger_context(),
    )
        .prop_map(|(new, old, post_type, post_name, context)| {
            PostTransitionEvent::new(new, old, post_type, post_name).with_context(context)
        })
}
