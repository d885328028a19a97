//! On-demand revalidation of frontend pages.
//!
//! When content changes, the frontend's cache for the affected path must be
//! discarded. This module builds and sends that request:
//!
//! - `GET {frontend}/api/revalidate?slug={path}`
//! - `x-vercel-revalidation-secret: {secret}`
//!
//! Revalidation is best-effort. Missing configuration turns it off silently,
//! and failures are logged and returned as data rather than raised.

mod config;
mod error;
mod notifier;
mod request;

pub use config::RevalidationConfig;
pub use error::{RevalidationError, RevalidationOutcome, SkipCause, classify_status};
pub use notifier::{HttpNotifier, RevalidationNotifier};
pub use request::{
    HEADER_REVALIDATION_SECRET, REVALIDATE_PATH, RevalidationRequest, SLUG_PARAM,
    revalidation_url,
};
