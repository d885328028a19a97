//! Rewriting CMS links in post content to point at the frontend.
//!
//! Only `href`s of `<a>` elements are touched. Links that wrap an image are
//! left alone so media keeps resolving against the CMS, and links to other
//! sites are left alone. Everything outside a rewritten `href` value is
//! preserved byte for byte.

use std::sync::LazyLock;

use regex::{Captures, Regex};

// Quoted attribute values may contain '>'.
static ANCHOR_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("valid anchor regex")
});

// An anchor's content ends at its close tag or, when unclosed, at the next anchor.
static ANCHOR_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</a\s*>|<a\b").expect("valid anchor end regex"));

static IMG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img\b").expect("valid img regex"));

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\shref\s*=\s*)(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).expect("valid href regex")
});

/// Replaces the CMS site URL with the frontend URL in content links.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    site_url: Regex,
    frontend_url: String,
}

impl LinkRewriter {
    /// Creates a rewriter, or `None` if either URL is empty.
    ///
    /// Trailing slashes on both URLs are ignored. The site URL is matched
    /// case-insensitively.
    pub fn new(site_url: &str, frontend_url: &str) -> Option<Self> {
        let site_url = site_url.trim_end_matches('/');
        let frontend_url = frontend_url.trim_end_matches('/');
        if site_url.is_empty() || frontend_url.is_empty() {
            return None;
        }

        let pattern = format!("(?i){}", regex::escape(site_url));
        Some(Self {
            site_url: Regex::new(&pattern).ok()?,
            frontend_url: frontend_url.to_string(),
        })
    }

    /// Rewrites a single URL, returning `None` if it doesn't reference the site.
    pub fn rewrite_url(&self, url: &str) -> Option<String> {
        if !self.site_url.is_match(url) {
            return None;
        }
        Some(
            self.site_url
                .replace_all(url, regex::NoExpand(&self.frontend_url))
                .into_owned(),
        )
    }

    /// Rewrites every eligible `<a href>` in `html`.
    pub fn rewrite(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut last = 0;

        for open in ANCHOR_OPEN.find_iter(html) {
            let content_end = ANCHOR_END
                .find_at(html, open.end())
                .map_or(html.len(), |m| m.start());

            out.push_str(&html[last..open.start()]);
            if IMG.is_match(&html[open.end()..content_end]) {
                out.push_str(open.as_str());
            } else {
                out.push_str(&self.rewrite_open_tag(open.as_str()));
            }
            last = open.end();
        }

        out.push_str(&html[last..]);
        out
    }

    fn rewrite_open_tag(&self, tag: &str) -> String {
        HREF.replace(tag, |href: &Captures| {
            let (quote, value) = match (href.get(2), href.get(3), href.get(4)) {
                (Some(v), _, _) => ("\"", v.as_str()),
                (_, Some(v), _) => ("'", v.as_str()),
                (_, _, Some(v)) => ("", v.as_str()),
                _ => return href[0].to_string(),
            };

            match self.rewrite_url(value) {
                Some(rewritten) => format!("{}{}{}{}", &href[1], quote, rewritten, quote),
                None => href[0].to_string(),
            }
        })
        .into_owned()
    }
}

/// Rewrites content links from `site_url` to `frontend_url`.
///
/// Returns `html` unchanged if either URL is empty.
///
/// # Examples
///
/// ```
/// use headless_bridge::links::rewrite_links;
///
/// let html = r#"<p><a href="https://cms.example.com/blog/hi">hi</a></p>"#;
/// assert_eq!(
///     rewrite_links(html, "https://cms.example.com", "https://www.example.com"),
///     r#"<p><a href="https://www.example.com/blog/hi">hi</a></p>"#
/// );
/// ```
pub fn rewrite_links(html: &str, site_url: &str, frontend_url: &str) -> String {
    match LinkRewriter::new(site_url, frontend_url) {
        Some(rewriter) => rewriter.rewrite(html),
        None => html.to_string(),
    }
}
