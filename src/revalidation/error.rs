//! Revalidation outcomes and failure classification.
//!
//! A notification ends in one of three ways:
//!
//! - **Skipped**: the feature is disabled or there is nothing to revalidate.
//!   Not an error; no network activity took place.
//! - **Success**: the frontend answered HTTP 200.
//! - **Failed**: the request could not be sent (transport), the frontend
//!   answered with any other status (rejected), or the configured base URL
//!   could not form a URL.
//!
//! None of these are retried.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a revalidation attempt failed.
#[derive(Debug, Error)]
pub enum RevalidationError {
    /// The frontend base URL could not be turned into a revalidation URL.
    #[error("invalid frontend URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request never completed (DNS, connection refused, TLS, etc.).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The frontend answered with a status other than 200.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl RevalidationError {
    /// Builds a rejection from the frontend's response status.
    ///
    /// The message is the reason phrase the frontend sent, then the canonical
    /// phrase for the status, then the numeric code.
    pub fn rejected(status: StatusCode, reason: Option<&str>) -> Self {
        let message = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .or_else(|| status.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        RevalidationError::Rejected {
            status: status.as_u16(),
            message,
        }
    }

    /// Returns the HTTP status code, if the frontend answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RevalidationError::Rejected { status, .. } => Some(*status),
            RevalidationError::Transport(e) => e.status().map(|s| s.as_u16()),
            RevalidationError::InvalidUrl { .. } => None,
        }
    }
}

/// Why a notification was skipped without any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipCause {
    /// The frontend base URL or the shared secret is not configured.
    NotConfigured,
    /// The resolved path was empty.
    EmptyTarget,
}

/// The result of one notification attempt.
#[derive(Debug)]
pub enum RevalidationOutcome {
    Skipped(SkipCause),
    Success,
    Failed(RevalidationError),
}

impl RevalidationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RevalidationOutcome::Success)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RevalidationOutcome::Skipped(_))
    }

    /// Returns the failure, if the attempt failed.
    pub fn error(&self) -> Option<&RevalidationError> {
        match self {
            RevalidationOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Classifies a response status: exactly 200 is success.
///
/// `reason` is the reason phrase from the status line, when the frontend sent
/// a non-standard one.
pub fn classify_status(status: StatusCode, reason: Option<&str>) -> Result<(), RevalidationError> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(RevalidationError::rejected(status, reason))
    }
}
