//! Process configuration, read once from the environment at startup.
//!
//! | variable | meaning |
//! |---|---|
//! | `NEXTJS_FRONTEND_URL` | frontend base URL (optional) |
//! | `NEXTJS_REVALIDATION_SECRET` | revalidation shared secret (optional) |
//! | `NEXTJS_PREVIEW_SECRET` | preview link secret (optional) |
//! | `CMS_SITE_URL` | the CMS's own URL, for content link rewriting (optional) |
//! | `BRIDGE_WEBHOOK_SECRET` | HMAC secret for inbound webhooks (required) |
//! | `BRIDGE_LISTEN_ADDR` | listen address, default `0.0.0.0:3000` |
//! | `REVALIDATION_ROUTES` | extra slug routes, `type=/prefix,...` (optional) |
//!
//! Empty values are treated as unset.

use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

use crate::links::LinkConfig;
use crate::revalidation::RevalidationConfig;
use crate::slug::{RouteParseError, RouteTable, SlugResolver};

pub const ENV_FRONTEND_URL: &str = "NEXTJS_FRONTEND_URL";
pub const ENV_REVALIDATION_SECRET: &str = "NEXTJS_REVALIDATION_SECRET";
pub const ENV_PREVIEW_SECRET: &str = "NEXTJS_PREVIEW_SECRET";
pub const ENV_SITE_URL: &str = "CMS_SITE_URL";
pub const ENV_WEBHOOK_SECRET: &str = "BRIDGE_WEBHOOK_SECRET";
pub const ENV_LISTEN_ADDR: &str = "BRIDGE_LISTEN_ADDR";
pub const ENV_ROUTES: &str = "REVALIDATION_ROUTES";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Errors that can occur while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// The listen address could not be parsed.
    #[error("invalid BRIDGE_LISTEN_ADDR {value:?}: {source}")]
    InvalidListenAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// The route table could not be parsed.
    #[error("invalid REVALIDATION_ROUTES: {0}")]
    InvalidRoutes(#[from] RouteParseError),
}

/// Everything the bridge needs to run.
#[derive(Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub webhook_secret: Vec<u8>,
    pub revalidation: RevalidationConfig,
    pub links: LinkConfig,
    pub routes: RouteTable,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let webhook_secret = get(ENV_WEBHOOK_SECRET)
            .ok_or(ConfigError::Missing(ENV_WEBHOOK_SECRET))?
            .into_bytes();

        let listen_addr_str = get(ENV_LISTEN_ADDR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr_str
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: listen_addr_str.clone(),
                source,
            })?;

        let routes = match get(ENV_ROUTES) {
            Some(value) => value.parse()?,
            None => RouteTable::default(),
        };

        let frontend_url = get(ENV_FRONTEND_URL);

        Ok(Config {
            listen_addr,
            webhook_secret,
            revalidation: RevalidationConfig::new(frontend_url.clone(), get(ENV_REVALIDATION_SECRET)),
            links: LinkConfig {
                site_url: get(ENV_SITE_URL),
                frontend_url,
                preview_secret: get(ENV_PREVIEW_SECRET),
            },
            routes,
        })
    }

    /// The default slug routes extended with the configured ones.
    pub fn slug_resolver(&self) -> SlugResolver {
        SlugResolver::default().with_routes(self.routes.0.iter().map(|(t, p)| (t.clone(), p)))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("listen_addr", &self.listen_addr)
            .field("revalidation", &self.revalidation)
            .field("links", &self.links)
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}
