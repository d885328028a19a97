//! Webhook handling for CMS events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Parsing payloads into typed events

pub mod parser;
pub mod signature;

pub use parser::{CmsEvent, EVENT_TRANSITION_POST_STATUS, ParseError, parse_webhook};
pub use signature::{Signature, verify_signature};
