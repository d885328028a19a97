//! Liveness endpoint.

use axum::http::StatusCode;

/// `GET /health`: 200 OK with the text "OK" while the process is serving.
///
/// Does not check the frontend; an unreachable frontend only degrades
/// revalidation and must not get the bridge restarted.
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
