//! Chatspan is a rendering engine that turns parsed chat messages into
//! fixed-width terminal lines for ratatui front ends.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the document model (blocks and inlines), the message
//!   value handed in by hosts, and the known-user set that drives mention
//!   highlighting.
//! - [`ui`] is the pipeline itself: fragment building, semantic
//!   reclassification, width-aware wrapping, widget assembly, reply
//!   previews, link extraction, and theming.
//! - [`utils`] carries cross-cutting helpers: the cursor sentinel that
//!   tracks a live edit position through every transformation, and the
//!   viewport scroll calculation that keeps it visible.
//!
//! The pipeline is synchronous and purely functional per call: the same
//! (document, user set, width, cursor) inputs always produce identical
//! output, so hosts may re-render on every repaint without flicker.
//!
//! Typical entry point is [`ui::render::render_message`], which parses a
//! message body via [`core::document::parse_markdown`] and runs the full
//! pipeline, including a one-level reply preview when the message quotes a
//! parent.

pub mod core;
pub mod ui;
pub mod utils;
