//! Sending revalidation requests to the frontend.
//!
//! The `RevalidationNotifier` trait is the seam between the transition
//! listener and the network. `HttpNotifier` is the production implementation;
//! tests substitute recording notifiers.

use std::future::Future;

use hyper::ext::ReasonPhrase;
use reqwest::Client;
use tracing::{debug, warn};

use super::config::RevalidationConfig;
use super::error::{RevalidationError, RevalidationOutcome, SkipCause, classify_status};
use super::request::{HEADER_REVALIDATION_SECRET, RevalidationRequest};
use crate::types::RevalidationTarget;

/// Notifies the frontend that a path is stale.
///
/// Implementations never fail: every problem is folded into the returned
/// outcome. Each call is independent; there is no deduplication.
pub trait RevalidationNotifier {
    fn notify(
        &self,
        target: &RevalidationTarget,
    ) -> impl Future<Output = RevalidationOutcome> + Send;
}

/// Sends revalidation requests over HTTP.
///
/// Uses the client's default timeout and never retries. A failure is logged
/// once at `warn` and returned as `RevalidationOutcome::Failed`.
#[derive(Clone, Debug)]
pub struct HttpNotifier {
    client: Client,
    config: RevalidationConfig,
}

impl HttpNotifier {
    pub fn new(config: RevalidationConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a notifier that shares an existing HTTP client.
    pub fn with_client(client: Client, config: RevalidationConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &RevalidationConfig {
        &self.config
    }

    async fn send(&self, request: &RevalidationRequest) -> Result<(), RevalidationError> {
        let response = self
            .client
            .request(request.method(), request.url().clone())
            .header(HEADER_REVALIDATION_SECRET, request.secret())
            .send()
            .await?;

        // Only present when the status line carried a non-canonical phrase.
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .and_then(|r| std::str::from_utf8(r.as_bytes()).ok());
        classify_status(response.status(), reason)
    }
}

impl RevalidationNotifier for HttpNotifier {
    async fn notify(&self, target: &RevalidationTarget) -> RevalidationOutcome {
        let Some((base_url, secret)) = self.config.credentials() else {
            debug!(path = %target, "Revalidation not configured, skipping");
            return RevalidationOutcome::Skipped(SkipCause::NotConfigured);
        };

        if target.is_empty() {
            debug!("Empty revalidation path, skipping");
            return RevalidationOutcome::Skipped(SkipCause::EmptyTarget);
        }

        let result = match RevalidationRequest::build(base_url, secret, target) {
            Ok(request) => {
                debug!(path = %target, url = %request.url(), "Sending revalidation request");
                self.send(&request).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                debug!(path = %target, "Revalidation succeeded");
                RevalidationOutcome::Success
            }
            Err(e) => {
                warn!(
                    path = %target,
                    status = ?e.status_code(),
                    "Revalidation error: {}",
                    e
                );
                RevalidationOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::capture_logs;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SECRET: &str = "s3cret";

    /// Serves one connection with a raw response, so the status line can
    /// carry any reason phrase.
    async fn raw_frontend(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn notifier_for(server: &MockServer) -> HttpNotifier {
        HttpNotifier::new(RevalidationConfig::new(Some(server.uri()), Some(SECRET)))
    }

    #[tokio::test]
    async fn success_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/revalidate"))
            .and(query_param("slug", "/blog/hello-world"))
            .and(header(HEADER_REVALIDATION_SECRET, SECRET))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = notifier_for(&server)
            .notify(&RevalidationTarget::from("/blog/hello-world"))
            .await;

        assert!(outcome.is_success(), "unexpected outcome: {:?}", outcome);
    }

    #[tokio::test]
    async fn trailing_slash_on_base_url_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/revalidate"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let config = RevalidationConfig::new(Some(format!("{}/", server.uri())), Some(SECRET));
        let outcome = HttpNotifier::new(config)
            .notify(&RevalidationTarget::from("about"))
            .await;

        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn non_200_is_rejected_with_remote_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = notifier_for(&server)
            .notify(&RevalidationTarget::from("/blog/foo"))
            .await;

        match outcome {
            RevalidationOutcome::Failed(RevalidationError::Rejected { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn other_2xx_is_still_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let outcome = notifier_for(&server)
            .notify(&RevalidationTarget::from("/blog/foo"))
            .await;

        assert_eq!(outcome.error().and_then(|e| e.status_code()), Some(204));
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        // Nothing listens on port 1.
        let config = RevalidationConfig::new(Some("http://127.0.0.1:1"), Some(SECRET));
        let outcome = HttpNotifier::new(config)
            .notify(&RevalidationTarget::from("/blog/foo"))
            .await;

        assert!(matches!(
            outcome,
            RevalidationOutcome::Failed(RevalidationError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn invalid_base_url_fails_without_network() {
        let config = RevalidationConfig::new(Some("not a url"), Some(SECRET));
        let outcome = HttpNotifier::new(config)
            .notify(&RevalidationTarget::from("/blog/foo"))
            .await;

        assert!(matches!(
            outcome,
            RevalidationOutcome::Failed(RevalidationError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn missing_secret_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = RevalidationConfig::new(Some(server.uri()), None::<String>);
        let outcome = HttpNotifier::new(config)
            .notify(&RevalidationTarget::from("/blog/foo"))
            .await;

        assert!(matches!(
            outcome,
            RevalidationOutcome::Skipped(SkipCause::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn missing_base_url_skips_for_any_target() {
        let notifier = HttpNotifier::new(RevalidationConfig::new(None::<String>, Some(SECRET)));

        for target in ["", "about", "/blog/foo"] {
            let outcome = notifier.notify(&RevalidationTarget::from(target)).await;
            assert!(outcome.is_skipped());
        }
    }

    #[tokio::test]
    async fn empty_target_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let outcome = notifier_for(&server)
            .notify(&RevalidationTarget::from(""))
            .await;

        assert!(matches!(
            outcome,
            RevalidationOutcome::Skipped(SkipCause::EmptyTarget)
        ));
    }

    #[tokio::test]
    async fn repeated_calls_send_independent_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("slug", "/books/dune"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        let notifier = notifier_for(&server);
        let target = RevalidationTarget::from("/books/dune");
        assert!(notifier.notify(&target).await.is_success());
        assert!(notifier.notify(&target).await.is_success());
    }

    #[tokio::test]
    async fn rejection_keeps_remote_reason_phrase() {
        let base_url = raw_frontend(
            "HTTP/1.1 401 Invalid Token\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let notifier = HttpNotifier::new(RevalidationConfig::new(Some(base_url), Some(SECRET)));

        let outcome = notifier.notify(&RevalidationTarget::from("/blog/foo")).await;

        match outcome {
            RevalidationOutcome::Failed(RevalidationError::Rejected { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid Token");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn failure_logs_exactly_one_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let (logs, _guard) = capture_logs();
        let outcome = notifier_for(&server)
            .notify(&RevalidationTarget::from("/blog/foo"))
            .await;

        assert!(outcome.error().is_some());
        let warnings = logs.warn_lines();
        assert_eq!(warnings.len(), 1, "warnings: {:?}", warnings);
        assert!(
            warnings[0].contains("Revalidation error: Internal Server Error"),
            "{}",
            warnings[0]
        );
    }

    #[tokio::test]
    async fn skip_logs_nothing_above_debug() {
        let (logs, _guard) = capture_logs();
        let notifier = HttpNotifier::new(RevalidationConfig::disabled());

        let outcome = notifier.notify(&RevalidationTarget::from("/blog/foo")).await;

        assert!(matches!(
            outcome,
            RevalidationOutcome::Skipped(SkipCause::NotConfigured)
        ));
        assert!(logs.warn_lines().is_empty(), "{:?}", logs.lines());
        assert!(logs.lines().iter().any(|l| l.contains("DEBUG")));
    }

    #[tokio::test]
    async fn success_logs_no_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let (logs, _guard) = capture_logs();
        let outcome = notifier_for(&server)
            .notify(&RevalidationTarget::from("/blog/foo"))
            .await;

        assert!(outcome.is_success());
        assert!(logs.warn_lines().is_empty(), "{:?}", logs.lines());
    }
}
