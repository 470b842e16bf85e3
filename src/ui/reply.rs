//! Reply-chain previews: a quoted parent collapsed to one line.
//!
//! The parent runs through the full pipeline with reply expansion
//! disabled, so a chain of replies never recurses past one level. If the
//! natural rendering needs more than one line or overflows the width, it
//! is truncated at a grapheme boundary and finished with an ellipsis that
//! still fits the budget.

use crate::core::message::Message;
use crate::ui::render::{render_message, RenderConfig};
use crate::ui::span::SpanKind;
use crate::utils::cursor;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Corner marker and indentation glyph shown ahead of the quoted parent.
pub const REPLY_PREFIX: &str = "╭▸ ";

const ELLIPSIS: &str = "…";

/// Render `parent` as a single preview line under the reply attribute.
pub fn render_reply_preview(
    parent: &Message,
    cfg: &RenderConfig,
) -> (Line<'static>, Vec<SpanKind>) {
    let budget = cfg
        .width
        .saturating_sub(REPLY_PREFIX.width())
        .max(1);
    let sub_cfg = cfg.without_reply_expansion().with_width(budget);
    let rendered = render_message(parent, &sub_cfg);

    let line_count = rendered.lines.len();
    let mut spans: Vec<Span<'static>> = rendered
        .lines
        .into_iter()
        .next()
        .map(|line| line.spans)
        .unwrap_or_default();
    for span in &mut spans {
        span.style = cfg.theme.reply_style;
    }

    let natural_width: usize = spans
        .iter()
        .map(|s| cursor::display_width(&s.content))
        .sum();
    if line_count > 1 || natural_width > budget {
        trace!(line_count, natural_width, budget, "truncating reply preview");
        spans = truncate_spans(
            spans,
            budget.saturating_sub(ELLIPSIS.width()),
            cfg.theme.reply_style,
        );
        spans.push(Span::styled(ELLIPSIS.to_string(), cfg.theme.reply_style));
    }

    let mut out = vec![Span::styled(
        REPLY_PREFIX.to_string(),
        cfg.theme.reply_style,
    )];
    out.extend(spans);
    let mut kinds = vec![SpanKind::Marker];
    kinds.resize(out.len(), SpanKind::Text);
    (Line::from(out), kinds)
}

/// Keep whole spans while they fit, then cut the first overflowing span
/// at a grapheme boundary. Atomic fragments are never split mid-grapheme.
fn truncate_spans(spans: Vec<Span<'static>>, budget: usize, style: Style) -> Vec<Span<'static>> {
    let mut out = Vec::new();
    let mut used = 0usize;
    for span in spans {
        let width = cursor::display_width(&span.content);
        if used + width <= budget {
            used += width;
            out.push(span);
            continue;
        }
        let mut cut = String::new();
        for grapheme in span.content.graphemes(true) {
            let gw = grapheme.width();
            if used + gw > budget {
                break;
            }
            used += gw;
            cut.push_str(grapheme);
        }
        if !cut.is_empty() {
            out.push(Span::styled(cut, style));
        }
        break;
    }
    out
}
