//! Frontend connection settings for revalidation.

use std::fmt;

/// Where to send revalidation requests and the secret that authenticates them.
///
/// Both values are optional. If either is absent the feature is disabled and
/// every notification is skipped without touching the network. Empty strings
/// count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RevalidationConfig {
    frontend_base_url: Option<String>,
    revalidation_secret: Option<String>,
}

impl RevalidationConfig {
    pub fn new(
        frontend_base_url: Option<impl Into<String>>,
        revalidation_secret: Option<impl Into<String>>,
    ) -> Self {
        Self {
            frontend_base_url: non_empty(frontend_base_url.map(Into::into)),
            revalidation_secret: non_empty(revalidation_secret.map(Into::into)),
        }
    }

    /// A configuration with revalidation turned off.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn frontend_base_url(&self) -> Option<&str> {
        self.frontend_base_url.as_deref()
    }

    pub fn revalidation_secret(&self) -> Option<&str> {
        self.revalidation_secret.as_deref()
    }

    /// Returns the base URL and secret if both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.frontend_base_url()?, self.revalidation_secret()?))
    }

    pub fn is_enabled(&self) -> bool {
        self.credentials().is_some()
    }
}

impl fmt::Debug for RevalidationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevalidationConfig")
            .field("frontend_base_url", &self.frontend_base_url)
            .field(
                "revalidation_secret",
                &self.revalidation_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
