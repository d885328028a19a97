//! Construction of the outbound revalidation request.

use std::fmt;

use reqwest::{Method, Url};

use super::error::RevalidationError;
use crate::types::RevalidationTarget;

/// Path of the frontend's on-demand revalidation endpoint.
pub const REVALIDATE_PATH: &str = "/api/revalidate";
/// Query parameter carrying the path to revalidate.
pub const SLUG_PARAM: &str = "slug";
/// Header carrying the shared secret.
pub const HEADER_REVALIDATION_SECRET: &str = "x-vercel-revalidation-secret";

/// A fully-built revalidation request, ready to send.
///
/// Built fresh for every notification; never cached or reused.
#[derive(Clone, PartialEq, Eq)]
pub struct RevalidationRequest {
    url: Url,
    secret: String,
}

impl RevalidationRequest {
    /// Builds the request for `target`.
    ///
    /// The URL is `{base_url}/api/revalidate?slug={target}`, with any trailing
    /// slashes on `base_url` removed and the target form-url-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use headless_bridge::revalidation::RevalidationRequest;
    /// use headless_bridge::types::RevalidationTarget;
    ///
    /// let request = RevalidationRequest::build(
    ///     "https://example.com/",
    ///     "secret",
    ///     &RevalidationTarget::from("/blog/foo"),
    /// )
    /// .unwrap();
    /// assert_eq!(
    ///     request.url().as_str(),
    ///     "https://example.com/api/revalidate?slug=%2Fblog%2Ffoo"
    /// );
    /// ```
    pub fn build(
        base_url: &str,
        secret: &str,
        target: &RevalidationTarget,
    ) -> Result<Self, RevalidationError> {
        Ok(Self {
            url: revalidation_url(base_url, target)?,
            secret: secret.to_string(),
        })
    }

    pub fn method(&self) -> Method {
        Method::GET
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for RevalidationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevalidationRequest")
            .field("method", &self.method())
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

/// Builds the revalidation endpoint URL for `target`.
pub fn revalidation_url(base_url: &str, target: &RevalidationTarget) -> Result<Url, RevalidationError> {
    let endpoint = format!("{}{}", base_url.trim_end_matches('/'), REVALIDATE_PATH);

    let mut url = Url::parse(&endpoint).map_err(|e| RevalidationError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    url.query_pairs_mut().append_pair(SLUG_PARAM, target.as_str());
    Ok(url)
}
