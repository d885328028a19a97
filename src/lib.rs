//! Headless bridge - keeps a headless frontend in sync with a CMS.
//!
//! The CMS reports post status transitions by webhook. The bridge decides
//! which transitions matter, maps each post to its frontend path, and asks the
//! frontend to revalidate that path. It also rewrites CMS links so they point
//! at the frontend.

pub mod config;
pub mod links;
pub mod revalidation;
pub mod server;
pub mod slug;
pub mod transition;
pub mod types;
pub mod webhooks;

#[cfg(test)]
mod test_utils;
