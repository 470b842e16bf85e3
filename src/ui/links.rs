//! Link harvesting for the host's "open link" affordance.
//!
//! A pure extraction over the block tree, independent of layout: every
//! link contributes its target plus the text a reader sees for it.

use crate::core::document::{Block, Inline};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedLink {
    pub url: String,
    pub text: String,
}

/// Collect `(url, displayText)` pairs from the tree in document order.
/// The display text falls back to the url itself when the label carries
/// no text of its own.
pub fn extract_links(blocks: &[Block]) -> Vec<ExtractedLink> {
    let mut out = Vec::new();
    for block in blocks {
        walk_block(block, &mut out);
    }
    out
}

fn walk_block(block: &Block, out: &mut Vec<ExtractedLink>) {
    match block {
        Block::Paragraph(inlines) | Block::Heading { content: inlines, .. } => {
            walk_inlines(inlines, out)
        }
        Block::BlockQuote(blocks) => {
            for block in blocks {
                walk_block(block, out);
            }
        }
        Block::List { items, .. } => {
            for item in items {
                for block in item {
                    walk_block(block, out);
                }
            }
        }
        Block::CodeBlock(_) | Block::HtmlBlock(_) | Block::Rule => {}
    }
}

fn walk_inlines(inlines: &[Inline], out: &mut Vec<ExtractedLink>) {
    for inline in inlines {
        match inline {
            Inline::Link { label, url } => {
                let text = plain_text(label);
                out.push(ExtractedLink {
                    url: url.clone(),
                    text: if text.is_empty() { url.clone() } else { text },
                });
                // Nested links are impossible in commonmark, but the label
                // may still carry images worth surfacing.
                walk_inlines(label, out);
            }
            Inline::Image { label, url } => {
                let text = plain_text(label);
                out.push(ExtractedLink {
                    url: url.clone(),
                    text: if text.is_empty() { url.clone() } else { text },
                });
            }
            Inline::Emphasis(children) | Inline::Strong(children) => walk_inlines(children, out),
            _ => {}
        }
    }
}

fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Str(t) | Inline::Code(t) | Inline::Entity(t) => out.push_str(t),
            Inline::Space => out.push(' '),
            Inline::SoftBreak | Inline::HardBreak => out.push(' '),
            Inline::Emphasis(children) | Inline::Strong(children) => {
                out.push_str(&plain_text(children))
            }
            Inline::Link { label, .. } | Inline::Image { label, .. } => {
                out.push_str(&plain_text(label))
            }
            Inline::Html(_) => {}
        }
    }
    out
}
