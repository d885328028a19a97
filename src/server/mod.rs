//! HTTP server for the headless bridge.
//!
//! This module implements the HTTP server that:
//! - Accepts post transition webhooks from the CMS, verifies signatures, and
//!   requests revalidation before answering
//! - Rewrites CMS links for the frontend on request
//! - Provides health checks for liveness probes
//!
//! # Endpoints
//!
//! - `POST /webhook` - Accepts CMS webhook deliveries (returns 202 Accepted)
//! - `POST /links/rewrite` - Rewrites links in post content
//! - `POST /links/preview` - Returns the frontend preview link for a post
//! - `POST /links/permalink` - Returns the frontend link a REST response should expose
//! - `POST /links/home` - Returns the home URL admin screens should link to
//! - `GET /health` - Returns 200 if server is running
//!
//! Every `POST` body must carry a valid `x-bridge-signature-256` header.

use std::sync::Arc;

use axum::http::HeaderMap;

pub mod health;
pub mod links;
pub mod webhook;

pub use health::health_handler;
pub use links::{home_handler, permalink_handler, preview_handler, rewrite_handler};
pub use webhook::webhook_handler;

use crate::links::LinkConfig;
use crate::revalidation::HttpNotifier;
use crate::transition::TransitionListener;
use crate::webhooks::verify_signature;

/// Header name for the CMS event type.
pub const HEADER_EVENT: &str = "x-bridge-event";
/// Header name for the CMS delivery ID (optional, used for logging).
pub const HEADER_DELIVERY: &str = "x-bridge-delivery";
/// Header name for the HMAC-SHA256 signature of the body.
pub const HEADER_SIGNATURE: &str = "x-bridge-signature-256";

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Webhook secret for HMAC-SHA256 signature verification.
    webhook_secret: Vec<u8>,

    /// Handles post transitions.
    listener: TransitionListener<HttpNotifier>,

    /// URLs used for link rewriting.
    links: LinkConfig,
}

impl AppState {
    pub fn new(
        webhook_secret: impl Into<Vec<u8>>,
        listener: TransitionListener<HttpNotifier>,
        links: LinkConfig,
    ) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                webhook_secret: webhook_secret.into(),
                listener,
                links,
            }),
        }
    }

    pub fn webhook_secret(&self) -> &[u8] {
        &self.inner.webhook_secret
    }

    pub fn listener(&self) -> &TransitionListener<HttpNotifier> {
        &self.inner.listener
    }

    pub fn links(&self) -> &LinkConfig {
        &self.inner.links
    }

    /// Returns true if `body` is signed with the webhook secret.
    pub fn is_signed(&self, headers: &HeaderMap, body: &[u8]) -> bool {
        headers
            .get(HEADER_SIGNATURE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|sig| verify_signature(body, sig, self.webhook_secret()))
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/links/rewrite", post(rewrite_handler))
        .route("/links/preview", post(preview_handler))
        .route("/links/permalink", post(permalink_handler))
        .route("/links/home", post(home_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
