//! Domain types consumed by the rendering pipeline.
//!
//! - [`document`]: the parsed rich-text tree (blocks and inlines) plus the
//!   adapter that builds it from raw markdown via pulldown-cmark.
//! - [`message`]: the message value hosts hand to the renderer, including
//!   the optional quoted parent for reply previews.
//! - [`users`]: the per-call set of known usernames that drives mention
//!   detection.
//!
//! Everything here is immutable input from the renderer's point of view:
//! values are built fresh for one render call and discarded afterwards.

pub mod document;
pub mod message;
pub mod users;
