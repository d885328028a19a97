//! Pointing CMS links at the headless frontend.
//!
//! All functions here are pure: they take the URLs they need and return new
//! strings. Missing configuration means "leave the CMS link as it is".

mod rewrite;
mod urls;

pub use rewrite::{LinkRewriter, rewrite_links};
pub use urls::{HomeUrlContext, PREVIEW_SECRET_PARAM, home_url, preview_link, rest_link};

use crate::types::{PostId, PostStatus};

/// URLs and secrets used for link rewriting.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LinkConfig {
    /// The CMS's own site URL, as it appears in stored content.
    pub site_url: Option<String>,
    /// The frontend's base URL.
    pub frontend_url: Option<String>,
    /// Secret the frontend expects on preview links.
    pub preview_secret: Option<String>,
}

impl LinkConfig {
    /// Returns a rewriter if both the site and frontend URLs are set.
    pub fn rewriter(&self) -> Option<LinkRewriter> {
        LinkRewriter::new(self.site_url.as_deref()?, self.frontend_url.as_deref()?)
    }

    /// Rewrites content links, or returns `html` unchanged when disabled.
    pub fn rewrite_content(&self, html: &str) -> String {
        match self.rewriter() {
            Some(rewriter) => rewriter.rewrite(html),
            None => html.to_string(),
        }
    }

    pub fn preview_link(&self, post_id: PostId) -> Option<String> {
        preview_link(
            self.frontend_url.as_deref(),
            self.preview_secret.as_deref(),
            post_id,
        )
    }

    /// The REST `link` for a post, or `None` to keep the CMS's own.
    pub fn rest_link(&self, status: &PostStatus, permalink: &str, post_id: PostId) -> Option<String> {
        let preview = self.preview_link(post_id);
        rest_link(
            status,
            permalink,
            self.rewriter().as_ref(),
            preview.as_deref(),
        )
    }
}

impl std::fmt::Debug for LinkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkConfig")
            .field("site_url", &self.site_url)
            .field("frontend_url", &self.frontend_url)
            .finish_non_exhaustive()
    }
}
