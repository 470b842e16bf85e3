//! Widget assembly: from block trees to styled terminal lines.
//!
//! Runs the full pipeline (fragments → reclassify → wrap) per inline
//! leaf, merges adjacent same-style fragments into single spans, resolves
//! visual attributes through the theme, and stacks blocks vertically.
//! Output is plain `ratatui` lines; the host owns painting and outer
//! layout.

use crate::core::document::{parse_markdown, Block, Inline, ListKind};
use crate::core::message::Message;
use crate::core::users::UserSet;
use crate::ui::classify::reclassify;
use crate::ui::fragment::{build_fragments, Fragment, StyleTag};
use crate::ui::span::SpanKind;
use crate::ui::theme::Theme;
use crate::ui::wrap::wrap_fragments;
use crate::utils::cursor;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

const QUOTE_INDENT: &str = "    ";
const CODE_GUTTER: &str = " | ";
const BULLET_MARKER: &str = "• ";

/// Per-call rendering parameters. Copyable so sub-renders (reply
/// previews, quoted blocks) can tweak a field without touching the
/// caller's copy.
#[derive(Clone, Copy)]
pub struct RenderConfig<'a> {
    pub theme: &'a Theme,
    pub users: &'a UserSet,
    pub width: usize,
    pub expand_replies: bool,
}

impl<'a> RenderConfig<'a> {
    pub fn new(theme: &'a Theme, users: &'a UserSet, width: usize) -> Self {
        Self {
            theme,
            users,
            width,
            expand_replies: true,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Reply previews render their parent with expansion off; the chain
    /// is capped at one level by construction.
    pub fn without_reply_expansion(mut self) -> Self {
        self.expand_replies = false;
        self
    }
}

/// Line-based description of a rendered message, ready for vertical
/// composition by the host.
#[derive(Debug, Default)]
pub struct RenderedMessage {
    pub lines: Vec<Line<'static>>,
    /// Parallel to `lines`: one [`SpanKind`] per span.
    pub metadata: Vec<Vec<SpanKind>>,
    /// Position of the run carrying the cursor sentinel, when present.
    /// The host scrolls its preview viewport to keep this line visible.
    pub cursor: Option<CursorHint>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorHint {
    pub line: usize,
    pub span: usize,
}

struct AssembledLine {
    spans: Vec<Span<'static>>,
    kinds: Vec<SpanKind>,
    cursor_span: Option<usize>,
}

/// Render a message: one-level reply preview (when quoting a parent),
/// then the parsed body blocks.
pub fn render_message(msg: &Message, cfg: &RenderConfig) -> RenderedMessage {
    let mut out = RenderedMessage::default();
    if cfg.expand_replies {
        if let Some(parent) = msg.reply_to.as_deref() {
            let (line, kinds) = crate::ui::reply::render_reply_preview(parent, cfg);
            out.lines.push(line);
            out.metadata.push(kinds);
        }
    }
    let blocks = parse_markdown(&msg.body);
    let body = render_blocks(&blocks, cfg);
    let base = out.lines.len();
    if let Some(hint) = body.cursor {
        out.cursor = Some(CursorHint {
            line: base + hint.line,
            span: hint.span,
        });
    }
    out.lines.extend(body.lines);
    out.metadata.extend(body.metadata);
    out
}

/// Render an externally supplied block tree through the pipeline.
pub fn render_blocks(blocks: &[Block], cfg: &RenderConfig) -> RenderedMessage {
    debug!(blocks = blocks.len(), width = cfg.width, "rendering block tree");
    let mut out = RenderedMessage::default();
    for block in blocks {
        render_block(block, cfg.width.max(1), cfg, &mut out);
    }
    out
}

fn render_block(block: &Block, width: usize, cfg: &RenderConfig, out: &mut RenderedMessage) {
    match block {
        Block::Paragraph(inlines) => {
            for assembled in assemble_inlines(inlines, None, width, cfg) {
                push_assembled(out, None, assembled);
            }
        }
        Block::Heading { level, content } => {
            let marker = format!("{} ", "#".repeat(usize::from(*level)));
            let inner = width.saturating_sub(marker.as_str().width()).max(1);
            let assembled = assemble_inlines(content, Some(cfg.theme.heading_style), inner, cfg);
            for (i, line) in assembled.into_iter().enumerate() {
                let prefix = (i == 0).then(|| (marker.as_str(), cfg.theme.heading_style));
                push_assembled(out, prefix, line);
            }
        }
        Block::BlockQuote(blocks) => {
            let inner = width.saturating_sub(QUOTE_INDENT.len()).max(1);
            let mut sub = RenderedMessage::default();
            for block in blocks {
                render_block(block, inner, cfg, &mut sub);
            }
            let pad = (QUOTE_INDENT, cfg.theme.quote_style);
            append_indented(out, sub, pad, pad);
        }
        Block::List { kind, items } => {
            for (i, item) in items.iter().enumerate() {
                let marker = match kind {
                    ListKind::Bullet => BULLET_MARKER.to_string(),
                    ListKind::Numbered(start) => format!("{}. ", start + i as u64),
                };
                let marker_width = marker.as_str().width();
                let inner = width.saturating_sub(marker_width).max(1);
                let mut sub = RenderedMessage::default();
                for block in item {
                    render_block(block, inner, cfg, &mut sub);
                }
                let indent = " ".repeat(marker_width);
                append_indented(
                    out,
                    sub,
                    (marker.as_str(), cfg.theme.list_marker_style),
                    (indent.as_str(), cfg.theme.text_style),
                );
            }
        }
        Block::CodeBlock(text) => {
            // Literal per-line rendering, no reflow.
            for raw in text.lines() {
                out.lines.push(Line::from(vec![
                    Span::styled(CODE_GUTTER.to_string(), cfg.theme.code_gutter_style),
                    Span::styled(detab(raw), cfg.theme.code_block_style),
                ]));
                out.metadata.push(vec![SpanKind::Marker, SpanKind::CodeBlock]);
            }
        }
        Block::HtmlBlock(text) => {
            for raw in text.lines() {
                out.lines
                    .push(Line::from(Span::styled(raw.to_string(), cfg.theme.text_style)));
                out.metadata.push(vec![SpanKind::Text]);
            }
        }
        Block::Rule => {
            out.lines.push(Line::from(Span::styled(
                "─".repeat(width),
                cfg.theme.rule_style,
            )));
            out.metadata.push(vec![SpanKind::Marker]);
        }
    }
}

fn assemble_inlines(
    inlines: &[Inline],
    base: Option<Style>,
    width: usize,
    cfg: &RenderConfig,
) -> Vec<AssembledLine> {
    let fragments = reclassify(build_fragments(inlines), cfg.users);
    wrap_fragments(fragments, width)
        .into_iter()
        .map(|line| merge_line(line, base, cfg))
        .collect()
}

/// Merge consecutive same-style fragments into one run each and resolve
/// the run's visual attribute. A `base` style substitutes for `Normal`
/// when a block construct (heading) restyles its whole content.
fn merge_line(fragments: Vec<Fragment>, base: Option<Style>, cfg: &RenderConfig) -> AssembledLine {
    let mut runs: Vec<(String, StyleTag)> = Vec::new();
    for fragment in fragments {
        let text = fragment.rendered_text();
        if text.is_empty() {
            continue;
        }
        match runs.last_mut() {
            Some((acc, style)) if *style == fragment.style => acc.push_str(text),
            _ => runs.push((text.to_string(), fragment.style)),
        }
    }

    let mut spans = Vec::with_capacity(runs.len());
    let mut kinds = Vec::with_capacity(runs.len());
    let mut cursor_span = None;
    for (text, tag) in runs {
        let style = match (tag, base) {
            (StyleTag::Normal, Some(style)) => style,
            _ => cfg.theme.style_for(tag, &text),
        };
        if cursor::contains(&text) {
            cursor_span = Some(spans.len());
        }
        kinds.push(span_kind_for(tag));
        spans.push(Span::styled(text, style));
    }
    AssembledLine {
        spans,
        kinds,
        cursor_span,
    }
}

fn span_kind_for(tag: StyleTag) -> SpanKind {
    match tag {
        StyleTag::Normal | StyleTag::Emphasis | StyleTag::Strong | StyleTag::Code => SpanKind::Text,
        StyleTag::Link => SpanKind::Link,
        StyleTag::Username => SpanKind::Username,
        StyleTag::Emoji => SpanKind::Emoji,
    }
}

fn push_assembled(
    out: &mut RenderedMessage,
    prefix: Option<(&str, Style)>,
    assembled: AssembledLine,
) {
    let AssembledLine {
        mut spans,
        mut kinds,
        cursor_span,
    } = assembled;
    let mut shift = 0;
    if let Some((pad, style)) = prefix {
        spans.insert(0, Span::styled(pad.to_string(), style));
        kinds.insert(0, SpanKind::Marker);
        shift = 1;
    }
    if let Some(span) = cursor_span {
        out.cursor = Some(CursorHint {
            line: out.lines.len(),
            span: span + shift,
        });
    }
    out.lines.push(Line::from(spans));
    out.metadata.push(kinds);
}

/// Splice a sub-render into `out`, prefixing the first line with `first`
/// and every following line with `rest` (hanging indent).
fn append_indented(
    out: &mut RenderedMessage,
    sub: RenderedMessage,
    first: (&str, Style),
    rest: (&str, Style),
) {
    let base = out.lines.len();
    if let Some(hint) = sub.cursor {
        out.cursor = Some(CursorHint {
            line: base + hint.line,
            span: hint.span + 1,
        });
    }
    for (i, (line, mut kinds)) in sub.lines.into_iter().zip(sub.metadata).enumerate() {
        let (pad, style) = if i == 0 { first } else { rest };
        let mut spans = line.spans;
        spans.insert(0, Span::styled(pad.to_string(), style));
        kinds.insert(0, SpanKind::Marker);
        out.lines.push(Line::from(spans));
        out.metadata.push(kinds);
    }
}

fn detab(line: &str) -> String {
    line.replace('\t', "    ")
}
