//! Parsed rich-text document model.
//!
//! [`Block`] and [`Inline`] form a closed sum-type tree mirroring what a
//! commonmark-family parser produces. The kind sets are fixed by the
//! parser's grammar, so every consumer pattern-matches exhaustively.
//!
//! [`parse_markdown`] adapts pulldown-cmark's event stream into this tree
//! so hosts can hand the renderer raw message text. Text events are
//! tokenized into alternating [`Inline::Str`]/[`Inline::Space`] tokens at
//! space boundaries; consecutive `Str` tokens produced by separate parser
//! events are left unmerged (the reclassifier owns merging).

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Block-level node. Immutable; owned by the caller for one render call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, content: Vec<Inline> },
    BlockQuote(Vec<Block>),
    List { kind: ListKind, items: Vec<Vec<Block>> },
    CodeBlock(String),
    HtmlBlock(String),
    Rule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Numbered(u64),
}

/// Inline node. `Entity` is kept in the model for parsers that emit
/// entities unresolved; pulldown-cmark resolves them into `Str` so
/// [`parse_markdown`] never produces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Str(String),
    Space,
    SoftBreak,
    HardBreak,
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Code(String),
    Link { label: Vec<Inline>, url: String },
    Image { label: Vec<Inline>, url: String },
    Entity(String),
    Html(String),
}

enum FrameKind {
    Root,
    Quote,
    Item,
}

enum InlineFrame {
    Emphasis,
    Strong,
    Link(String),
    Image(String),
}

struct TreeBuilder {
    frames: Vec<(FrameKind, Vec<Block>)>,
    list_frames: Vec<(ListKind, Vec<Vec<Block>>)>,
    inline_frames: Vec<(InlineFrame, Vec<Inline>)>,
    inlines: Vec<Inline>,
    code_block: Option<String>,
    html_block: Option<String>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            frames: vec![(FrameKind::Root, Vec::new())],
            list_frames: Vec::new(),
            inline_frames: Vec::new(),
            inlines: Vec::new(),
            code_block: None,
            html_block: None,
        }
    }

    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self
            .frames
            .last_mut()
            .expect("document builder lost its root frame")
            .1
    }

    fn push_inline(&mut self, inline: Inline) {
        match self.inline_frames.last_mut() {
            Some((_, children)) => children.push(inline),
            None => self.inlines.push(inline),
        }
    }

    fn push_text(&mut self, text: &str) {
        let mut rest = text;
        loop {
            match rest.find(' ') {
                Some(at) => {
                    if at > 0 {
                        self.push_inline(Inline::Str(rest[..at].to_string()));
                    }
                    self.push_inline(Inline::Space);
                    rest = &rest[at + 1..];
                }
                None => {
                    if !rest.is_empty() {
                        self.push_inline(Inline::Str(rest.to_string()));
                    }
                    break;
                }
            }
        }
    }

    /// Close the current leaf, wrapping pending inlines in a paragraph.
    /// Tight list items carry bare text with no paragraph tag, so this
    /// also runs when an item ends.
    fn flush_paragraph(&mut self) {
        if self.inlines.is_empty() {
            return;
        }
        let content = std::mem::take(&mut self.inlines);
        self.blocks_mut().push(Block::Paragraph(content));
    }

    fn close_frame(&mut self) -> (FrameKind, Vec<Block>) {
        let frame = self
            .frames
            .pop()
            .expect("document builder lost its root frame");
        if self.frames.is_empty() {
            unreachable!("closed the root frame of the document builder");
        }
        frame
    }
}

/// Parse raw markdown into the block tree.
///
/// Extensions (tables, footnotes, task lists) stay disabled: the document
/// model has no nodes for them, and with the options off their syntax
/// flows through as ordinary text instead of being dropped.
pub fn parse_markdown(content: &str) -> Vec<Block> {
    let parser = Parser::new_ext(content, Options::empty());
    let mut builder = TreeBuilder::new();

    for event in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph => {}
                Tag::Heading { .. } => {}
                Tag::BlockQuote(_) => {
                    builder.flush_paragraph();
                    builder.frames.push((FrameKind::Quote, Vec::new()));
                }
                Tag::List(start) => {
                    // A tight item may carry bare text straight before a
                    // nested list; close it out first.
                    builder.flush_paragraph();
                    let kind = match start {
                        Some(n) => ListKind::Numbered(n),
                        None => ListKind::Bullet,
                    };
                    builder.list_frames.push((kind, Vec::new()));
                }
                Tag::Item => {
                    builder.frames.push((FrameKind::Item, Vec::new()));
                }
                Tag::CodeBlock(_) => {
                    builder.flush_paragraph();
                    builder.code_block = Some(String::new());
                }
                Tag::HtmlBlock => {
                    builder.flush_paragraph();
                    builder.html_block = Some(String::new());
                }
                Tag::Emphasis => {
                    builder.inline_frames.push((InlineFrame::Emphasis, Vec::new()));
                }
                Tag::Strong => {
                    builder.inline_frames.push((InlineFrame::Strong, Vec::new()));
                }
                Tag::Link { dest_url, .. } => {
                    builder
                        .inline_frames
                        .push((InlineFrame::Link(dest_url.into_string()), Vec::new()));
                }
                Tag::Image { dest_url, .. } => {
                    builder
                        .inline_frames
                        .push((InlineFrame::Image(dest_url.into_string()), Vec::new()));
                }
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Paragraph => builder.flush_paragraph(),
                TagEnd::Heading(level) => {
                    if builder.inlines.is_empty() {
                        continue;
                    }
                    let content = std::mem::take(&mut builder.inlines);
                    builder.blocks_mut().push(Block::Heading {
                        level: level as u8,
                        content,
                    });
                }
                TagEnd::BlockQuote(_) => match builder.close_frame() {
                    (FrameKind::Quote, blocks) => {
                        builder.blocks_mut().push(Block::BlockQuote(blocks));
                    }
                    _ => unreachable!("blockquote closed a frame it did not open"),
                },
                TagEnd::Item => {
                    builder.flush_paragraph();
                    match builder.close_frame() {
                        (FrameKind::Item, blocks) => {
                            let (_, items) = builder
                                .list_frames
                                .last_mut()
                                .expect("list item ended outside a list");
                            items.push(blocks);
                        }
                        _ => unreachable!("list item closed a frame it did not open"),
                    }
                }
                TagEnd::List(_) => {
                    let (kind, items) = builder
                        .list_frames
                        .pop()
                        .expect("list ended without a matching start");
                    builder.blocks_mut().push(Block::List { kind, items });
                }
                TagEnd::CodeBlock => {
                    let text = builder.code_block.take().unwrap_or_default();
                    builder.blocks_mut().push(Block::CodeBlock(text));
                }
                TagEnd::HtmlBlock => {
                    let text = builder.html_block.take().unwrap_or_default();
                    builder.blocks_mut().push(Block::HtmlBlock(text));
                }
                TagEnd::Emphasis | TagEnd::Strong | TagEnd::Link | TagEnd::Image => {
                    let (frame, children) = builder
                        .inline_frames
                        .pop()
                        .expect("inline span ended without a matching start");
                    let inline = match frame {
                        InlineFrame::Emphasis => Inline::Emphasis(children),
                        InlineFrame::Strong => Inline::Strong(children),
                        InlineFrame::Link(url) => Inline::Link {
                            label: children,
                            url,
                        },
                        InlineFrame::Image(url) => Inline::Image {
                            label: children,
                            url,
                        },
                    };
                    builder.push_inline(inline);
                }
                _ => {}
            },
            Event::Text(text) => {
                if let Some(buf) = builder.code_block.as_mut() {
                    buf.push_str(&text);
                } else if let Some(buf) = builder.html_block.as_mut() {
                    buf.push_str(&text);
                } else {
                    builder.push_text(&text);
                }
            }
            Event::Code(code) => builder.push_inline(Inline::Code(code.into_string())),
            Event::Html(html) => {
                if let Some(buf) = builder.html_block.as_mut() {
                    buf.push_str(&html);
                } else {
                    builder.push_inline(Inline::Html(html.into_string()));
                }
            }
            Event::InlineHtml(html) => builder.push_inline(Inline::Html(html.into_string())),
            Event::SoftBreak => builder.push_inline(Inline::SoftBreak),
            Event::HardBreak => builder.push_inline(Inline::HardBreak),
            Event::Rule => builder.blocks_mut().push(Block::Rule),
            _ => {}
        }
    }

    builder.flush_paragraph();
    let (_, blocks) = builder
        .frames
        .pop()
        .expect("document builder lost its root frame");
    blocks
}
