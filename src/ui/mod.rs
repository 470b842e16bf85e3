//! The rendering pipeline, from inline trees to styled terminal lines.
//!
//! Data flows [`fragment`] → [`classify`] → [`wrap`] → [`render`], with
//! the cursor sentinel (see [`crate::utils::cursor`]) riding through
//! every stage and [`reply`] composing two pipeline invocations for
//! quoted parents.
//!
//! Key submodules:
//! - [`fragment`]: flattening inlines into style-tagged atoms.
//! - [`classify`]: mention and emoji detection over merged runs.
//! - [`wrap`]: greedy width-aware line packing.
//! - [`render`]: span merging, block constructs, vertical composition.
//! - [`theme`] and [`builtin_themes`]: style-tag and username resolution.
//! - [`links`]: `(url, displayText)` harvesting for the open-link flow.
//! - [`span`]: semantic metadata attached to every rendered span.

pub mod builtin_themes;
pub mod classify;
pub mod fragment;
pub mod links;
pub mod render;
pub mod reply;
pub mod span;
pub mod theme;
pub mod wrap;
