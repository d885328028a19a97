//! Link endpoints.
//!
//! The CMS calls these while rendering content and REST responses, so that
//! links point at the frontend instead of the CMS. Bodies are signed the same
//! way as webhook deliveries because responses can contain the preview secret.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::AppState;
use crate::links::{HomeUrlContext, home_url};
use crate::types::{PostId, PostStatus};

/// Errors that can occur when serving a link request.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Previews need both the frontend URL and the preview secret.
    #[error("preview links are not configured")]
    PreviewUnavailable,
}

impl IntoResponse for LinkError {
    fn into_response(self) -> Response {
        let status = match &self {
            LinkError::InvalidSignature => StatusCode::UNAUTHORIZED,
            LinkError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            LinkError::PreviewUnavailable => StatusCode::NOT_FOUND,
        };

        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    pub html: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewriteResponse {
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub post_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct PermalinkRequest {
    pub post_id: u64,
    pub status: PostStatus,
    pub permalink: String,
}

#[derive(Debug, Deserialize)]
pub struct HomeRequest {
    pub url: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_block_editor: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkResponse {
    pub link: String,
}

/// `POST /links/rewrite`: rewrites CMS links in post content.
///
/// Content is returned unchanged when the site or frontend URL is unset.
pub async fn rewrite_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RewriteResponse>, LinkError> {
    let request: RewriteRequest = signed_json(&app_state, &headers, &body)?;
    let html = app_state.links().rewrite_content(&request.html);
    Ok(Json(RewriteResponse { html }))
}

/// `POST /links/preview`: the frontend preview link for a post.
pub async fn preview_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LinkResponse>, LinkError> {
    let request: PreviewRequest = signed_json(&app_state, &headers, &body)?;
    let link = app_state
        .links()
        .preview_link(PostId(request.post_id))
        .ok_or(LinkError::PreviewUnavailable)?;
    Ok(Json(LinkResponse { link }))
}

/// `POST /links/permalink`: the link a REST response should expose.
///
/// Falls back to the given permalink when no frontend link applies.
pub async fn permalink_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LinkResponse>, LinkError> {
    let request: PermalinkRequest = signed_json(&app_state, &headers, &body)?;
    let link = app_state
        .links()
        .rest_link(&request.status, &request.permalink, PostId(request.post_id))
        .unwrap_or(request.permalink);
    debug!(post_id = request.post_id, status = %request.status, link = %link, "Resolved permalink");
    Ok(Json(LinkResponse { link }))
}

/// `POST /links/home`: the home URL admin screens should link to.
pub async fn home_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LinkResponse>, LinkError> {
    let request: HomeRequest = signed_json(&app_state, &headers, &body)?;
    let context = HomeUrlContext {
        scheme: request.scheme.as_deref(),
        is_admin: request.is_admin,
        is_block_editor: request.is_block_editor,
    };
    let link = home_url(
        &request.url,
        &request.path,
        context,
        app_state.links().frontend_url.as_deref(),
    );
    Ok(Json(LinkResponse { link }))
}

/// Verifies the body signature, then deserializes the body.
fn signed_json<T: DeserializeOwned>(
    app_state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<T, LinkError> {
    if !app_state.is_signed(headers, body) {
        warn!("Invalid link request signature");
        return Err(LinkError::InvalidSignature);
    }
    Ok(serde_json::from_slice(body)?)
}
