//! Webhook endpoint handler.
//!
//! Accepts CMS webhook deliveries, validates signatures, and hands post
//! transitions to the listener. The frontend is notified before the response
//! is sent, but its answer never changes the response.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{AppState, HEADER_DELIVERY, HEADER_EVENT, HEADER_SIGNATURE};
use crate::transition::{PostTransitionHandler, TransitionOutcome};
use crate::webhooks::{CmsEvent, ParseError, parse_webhook, verify_signature};

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing required header.
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    /// Invalid signature.
    #[error("invalid signature")]
    InvalidSignature,

    /// Malformed payload.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] ParseError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Required headers:
///   - `X-Bridge-Event`: Event type (e.g., "transition_post_status")
///   - `X-Bridge-Signature-256`: HMAC-SHA256 signature of the payload
/// - Optional headers:
///   - `X-Bridge-Delivery`: Delivery ID, only used for logging
/// - Body: JSON webhook payload
///
/// # Response
///
/// - 202 Accepted: Delivery handled, including when it was skipped or the
///   frontend rejected the revalidation
/// - 400 Bad Request: Missing header or malformed payload
/// - 401 Unauthorized: Invalid signature
///
/// # Example
///
/// ```ignore
/// POST /webhook HTTP/1.1
/// X-Bridge-Event: transition_post_status
/// X-Bridge-Signature-256: sha256=...
/// Content-Type: application/json
///
/// {"new_status": "publish", "old_status": "draft", "post": {...}}
///
/// HTTP/1.1 202 Accepted
/// ```
pub async fn webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError> {
    let event_type = get_header(&headers, HEADER_EVENT)?;
    let signature_header = get_header(&headers, HEADER_SIGNATURE)?;
    let delivery_id = get_header(&headers, HEADER_DELIVERY).unwrap_or_default();

    debug!(
        delivery_id = %delivery_id,
        event_type = %event_type,
        "Received webhook"
    );

    // Verify signature before parsing anything.
    if !verify_signature(&body, &signature_header, app_state.webhook_secret()) {
        warn!(delivery_id = %delivery_id, "Invalid webhook signature");
        return Err(WebhookError::InvalidSignature);
    }

    let event = match parse_webhook(&event_type, &body) {
        Ok(Some(event)) => event,
        Ok(None) => {
            debug!(
                delivery_id = %delivery_id,
                event_type = %event_type,
                "Ignoring unknown event type"
            );
            return Ok((StatusCode::ACCEPTED, "Accepted (ignored)"));
        }
        Err(e) => {
            warn!(delivery_id = %delivery_id, error = %e, "Malformed webhook payload");
            return Err(e.into());
        }
    };

    match event {
        CmsEvent::PostTransition(event) => {
            let outcome = app_state.listener().on_post_transition(&event).await;
            if let TransitionOutcome::Notified { target, .. } = &outcome {
                info!(
                    delivery_id = %delivery_id,
                    path = %target,
                    success = outcome.revalidation().is_some_and(|r| r.is_success()),
                    "Handled post transition"
                );
            }
        }
    }

    Ok((StatusCode::ACCEPTED, "Accepted"))
}

/// Extracts a required header value as a string.
fn get_header(headers: &HeaderMap, name: &'static str) -> Result<String, WebhookError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .ok_or(WebhookError::MissingHeader(name))
}
