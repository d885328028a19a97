//! Preview, home and permalink URLs that should point at the frontend.

use reqwest::Url;

use super::rewrite::LinkRewriter;
use crate::types::{PostId, PostStatus};

/// Query parameter carrying the preview secret.
pub const PREVIEW_SECRET_PARAM: &str = "secret";

/// Builds the frontend preview link for a post.
///
/// `{frontend}/preview/{post_id}?secret={secret}`, or `None` if either the
/// frontend URL or the preview secret is missing (the CMS then keeps its own
/// preview link).
pub fn preview_link(
    frontend_url: Option<&str>,
    preview_secret: Option<&str>,
    post_id: PostId,
) -> Option<String> {
    let frontend_url = frontend_url.filter(|u| !u.is_empty())?;
    let secret = preview_secret.filter(|s| !s.is_empty())?;

    let mut url = Url::parse(&format!(
        "{}/preview/{}",
        frontend_url.trim_end_matches('/'),
        post_id
    ))
    .ok()?;
    url.query_pairs_mut().append_pair(PREVIEW_SECRET_PARAM, secret);
    Some(url.into())
}

/// The request context a home URL is generated in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HomeUrlContext<'a> {
    /// The URL scheme requested by the caller (`"rest"` for REST routes).
    pub scheme: Option<&'a str>,
    /// Whether the request is an admin screen.
    pub is_admin: bool,
    /// Whether the current admin screen is the block editor.
    pub is_block_editor: bool,
}

/// Points admin "view site" style links at the frontend.
///
/// Returns `url` unchanged for REST URLs, inside the block editor (which
/// needs the real site URL to work), outside the admin, or when no frontend
/// is configured.
pub fn home_url(url: &str, path: &str, context: HomeUrlContext<'_>, frontend_url: Option<&str>) -> String {
    if context.scheme == Some("rest") || context.is_block_editor || !context.is_admin {
        return url.to_string();
    }

    let Some(base) = frontend_url
        .map(|u| u.trim_end_matches('/'))
        .filter(|u| !u.is_empty())
    else {
        return url.to_string();
    };

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Computes the `link` a REST response should expose for a post.
///
/// - Drafts link to their preview.
/// - Published posts link to the frontend when their permalink is on the CMS
///   site.
///
/// Returns `None` when the CMS's own link should be kept.
pub fn rest_link(
    status: &PostStatus,
    permalink: &str,
    rewriter: Option<&LinkRewriter>,
    preview: Option<&str>,
) -> Option<String> {
    match status {
        PostStatus::Draft => preview.map(str::to_string),
        PostStatus::Publish => rewriter?.rewrite_url(permalink),
        _ => None,
    }
}
