//! Core domain types for the headless bridge.

pub mod ids;
pub mod status;

pub use ids::{PostId, PostName, PostType, RevalidationTarget};
pub use status::PostStatus;
