//! Maps a post's type and slug to the frontend path that renders it.
//!
//! The route table mirrors the frontend's routing scheme and is meant to be
//! extended by operators: `post` lives under `/blog`, `book` under `/books`,
//! and every other type is served from its bare slug.

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{PostName, PostType, RevalidationTarget};

/// Error returned when a route table string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteParseError {
    /// An entry was not of the form `type=/prefix`.
    #[error("invalid route entry {0:?}: expected type=/prefix")]
    MalformedEntry(String),

    /// An entry had an empty post type.
    #[error("invalid route entry {0:?}: empty post type")]
    EmptyPostType(String),
}

/// Resolves revalidation targets from post type and slug.
///
/// Resolution is total: unknown types fall through to the bare slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugResolver {
    /// Post type -> path prefix (without trailing slash).
    routes: HashMap<String, String>,
}

impl SlugResolver {
    /// Creates a resolver with no routes; every type resolves to its bare slug.
    pub fn empty() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Adds or replaces the prefix for a post type.
    ///
    /// Trailing slashes on the prefix are ignored, so `/blog` and `/blog/`
    /// are equivalent.
    pub fn with_route(mut self, post_type: impl Into<String>, prefix: impl AsRef<str>) -> Self {
        self.routes.insert(
            post_type.into(),
            prefix.as_ref().trim_end_matches('/').to_string(),
        );
        self
    }

    /// Adds every route in `routes`, replacing existing entries.
    pub fn with_routes<I, T, P>(self, routes: I) -> Self
    where
        I: IntoIterator<Item = (T, P)>,
        T: Into<String>,
        P: AsRef<str>,
    {
        routes
            .into_iter()
            .fold(self, |resolver, (post_type, prefix)| {
                resolver.with_route(post_type, prefix)
            })
    }

    /// Returns the prefix configured for a post type, if any.
    pub fn prefix_for(&self, post_type: &PostType) -> Option<&str> {
        self.routes.get(post_type.as_str()).map(String::as_str)
    }

    /// Resolves the frontend path for a post.
    ///
    /// # Examples
    ///
    /// ```
    /// use headless_bridge::slug::SlugResolver;
    /// use headless_bridge::types::{PostName, PostType};
    ///
    /// let resolver = SlugResolver::default();
    /// let target = resolver.resolve(&PostType::from("post"), &PostName::from("hello-world"));
    /// assert_eq!(target.as_str(), "/blog/hello-world");
    /// ```
    pub fn resolve(&self, post_type: &PostType, post_name: &PostName) -> RevalidationTarget {
        match self.prefix_for(post_type) {
            Some(prefix) => RevalidationTarget::new(format!("{}/{}", prefix, post_name)),
            None => RevalidationTarget::new(post_name.as_str()),
        }
    }
}

impl Default for SlugResolver {
    fn default() -> Self {
        Self::empty()
            .with_route("post", "/blog")
            .with_route("book", "/books")
    }
}

/// A list of `(post_type, prefix)` routes parsed from `type=/prefix,type2=/prefix2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable(pub Vec<(String, String)>);

impl FromStr for RouteTable {
    type Err = RouteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut routes = Vec::new();

        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (post_type, prefix) = entry
                .split_once('=')
                .ok_or_else(|| RouteParseError::MalformedEntry(entry.to_string()))?;

            let post_type = post_type.trim();
            if post_type.is_empty() {
                return Err(RouteParseError::EmptyPostType(entry.to_string()));
            }

            routes.push((post_type.to_string(), prefix.trim().to_string()));
        }

        Ok(RouteTable(routes))
    }
}
