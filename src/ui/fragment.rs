//! Fragment building: flattening inline trees into style-tagged atoms.
//!
//! A [`Fragment`] is the atomic renderable unit the wrapper and assembler
//! operate on. Order is significant end-to-end; only the reclassifier is
//! allowed to merge adjacent fragments.

use crate::core::document::Inline;
use crate::utils::cursor;

/// Closed style set carried by every fragment. `Username` and `Emoji` are
/// only produced by the reclassification pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleTag {
    Normal,
    Emphasis,
    Strong,
    Code,
    Username,
    Link,
    Emoji,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentKind {
    Text(String),
    Space,
    SoftBreak,
    HardBreak,
    Html(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub style: StyleTag,
}

impl Fragment {
    pub fn text(content: impl Into<String>, style: StyleTag) -> Self {
        Self {
            kind: FragmentKind::Text(content.into()),
            style,
        }
    }

    pub fn space(style: StyleTag) -> Self {
        Self {
            kind: FragmentKind::Space,
            style,
        }
    }

    /// Forced line breaks; the wrapper consumes these without emitting
    /// visible content.
    pub fn is_break(&self) -> bool {
        matches!(self.kind, FragmentKind::SoftBreak | FragmentKind::HardBreak)
    }

    pub fn is_space(&self) -> bool {
        matches!(self.kind, FragmentKind::Space)
    }

    /// Display-cell width with the cursor sentinel excluded.
    pub fn display_width(&self) -> usize {
        match &self.kind {
            FragmentKind::Text(t) | FragmentKind::Html(t) => cursor::display_width(t),
            FragmentKind::Space => 1,
            FragmentKind::SoftBreak | FragmentKind::HardBreak => 0,
        }
    }

    /// The fragment's contribution to rendered text, sentinel preserved.
    pub fn rendered_text(&self) -> &str {
        match &self.kind {
            FragmentKind::Text(t) | FragmentKind::Html(t) => t,
            FragmentKind::Space => " ",
            FragmentKind::SoftBreak | FragmentKind::HardBreak => "",
        }
    }
}

/// Flatten an inline tree into fragments, starting from `Normal` style.
pub fn build_fragments(inlines: &[Inline]) -> Vec<Fragment> {
    let mut out = Vec::new();
    push_inlines(inlines, StyleTag::Normal, &mut out);
    out
}

fn push_inlines(inlines: &[Inline], style: StyleTag, out: &mut Vec<Fragment>) {
    for inline in inlines {
        match inline {
            Inline::Str(text) => out.push(Fragment::text(text.clone(), style)),
            // Breaks carry Normal regardless of the surrounding style.
            Inline::Space => out.push(Fragment::space(StyleTag::Normal)),
            Inline::SoftBreak => out.push(Fragment {
                kind: FragmentKind::SoftBreak,
                style: StyleTag::Normal,
            }),
            Inline::HardBreak => out.push(Fragment {
                kind: FragmentKind::HardBreak,
                style: StyleTag::Normal,
            }),
            Inline::Emphasis(children) => {
                push_inlines(children, sub_style(style, StyleTag::Emphasis), out)
            }
            Inline::Strong(children) => {
                push_inlines(children, sub_style(style, StyleTag::Strong), out)
            }
            Inline::Code(text) => push_code(text, sub_style(style, StyleTag::Code), out),
            Inline::Link { label, url } => {
                // Bare autolinks collapse to a single fragment; otherwise
                // link style overrides whatever the label nests.
                if let [Inline::Str(text)] = label.as_slice() {
                    if text == url {
                        out.push(Fragment::text(url.clone(), StyleTag::Link));
                        continue;
                    }
                }
                push_inlines(label, StyleTag::Link, out);
            }
            Inline::Image { .. } => out.push(Fragment::text("[image]", StyleTag::Link)),
            // Entities render as text but keep the historical link-adjacent
            // styling. Fixed quirk, not worth optimizing away.
            Inline::Entity(text) => out.push(Fragment::text(text.clone(), StyleTag::Link)),
            Inline::Html(text) => out.push(Fragment {
                kind: FragmentKind::Html(text.clone()),
                style,
            }),
        }
    }
}

/// Link style wins over whatever the label nests; elsewhere the nested
/// style takes effect for its subtree only.
fn sub_style(current: StyleTag, nested: StyleTag) -> StyleTag {
    if current == StyleTag::Link {
        StyleTag::Link
    } else {
        nested
    }
}

/// Inline code splits on spaces so long runs can wrap. The split yields an
/// empty leading piece when the code starts with a space; that artifact
/// must not surface as a leading space fragment.
fn push_code(text: &str, style: StyleTag, out: &mut Vec<Fragment>) {
    let mut emitted = false;
    for (i, piece) in text.split(' ').enumerate() {
        if i > 0 && emitted {
            out.push(Fragment::space(style));
        }
        if !piece.is_empty() {
            out.push(Fragment::text(piece, style));
            emitted = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(frag: &Fragment) -> &str {
        match &frag.kind {
            FragmentKind::Text(t) => t,
            other => panic!("expected text fragment, got {other:?}"),
        }
    }

    #[test]
    fn plain_words_keep_normal_style() {
        let frags = build_fragments(&[
            Inline::Str("hi".into()),
            Inline::Space,
            Inline::Str("there".into()),
        ]);
        assert_eq!(frags.len(), 3);
        assert_eq!(frags[0].style, StyleTag::Normal);
        assert!(frags[1].is_space());
    }

    #[test]
    fn emphasis_styles_only_its_subtree() {
        let frags = build_fragments(&[
            Inline::Emphasis(vec![Inline::Str("soft".into())]),
            Inline::Space,
            Inline::Str("loud".into()),
        ]);
        assert_eq!(frags[0].style, StyleTag::Emphasis);
        assert_eq!(frags[2].style, StyleTag::Normal);
    }

    #[test]
    fn code_splits_on_spaces_and_drops_leading_artifact() {
        let frags = build_fragments(&[Inline::Code(" cargo test".into())]);
        assert!(!frags[0].is_space(), "leading artifact space must be dropped");
        assert_eq!(text_of(&frags[0]), "cargo");
        assert!(frags[1].is_space());
        assert_eq!(frags[1].style, StyleTag::Code);
        assert_eq!(text_of(&frags[2]), "test");
        assert!(frags.iter().all(|f| f.style == StyleTag::Code));
    }

    #[test]
    fn bare_autolink_collapses_to_one_fragment() {
        let url = "https://example.com";
        let frags = build_fragments(&[Inline::Link {
            label: vec![Inline::Str(url.into())],
            url: url.into(),
        }]);
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].style, StyleTag::Link);
        assert_eq!(text_of(&frags[0]), url);
    }

    #[test]
    fn labeled_link_overrides_nested_style() {
        let frags = build_fragments(&[Inline::Link {
            label: vec![
                Inline::Emphasis(vec![Inline::Str("the".into())]),
                Inline::Space,
                Inline::Str("docs".into()),
            ],
            url: "https://example.com".into(),
        }]);
        assert_eq!(frags[0].style, StyleTag::Link);
        assert_eq!(frags[2].style, StyleTag::Link);
    }

    #[test]
    fn image_renders_as_link_placeholder() {
        let frags = build_fragments(&[Inline::Image {
            label: vec![Inline::Str("cat".into())],
            url: "https://example.com/cat.png".into(),
        }]);
        assert_eq!(frags.len(), 1);
        assert_eq!(text_of(&frags[0]), "[image]");
        assert_eq!(frags[0].style, StyleTag::Link);
    }

    #[test]
    fn entity_keeps_link_adjacent_styling() {
        let frags = build_fragments(&[Inline::Entity("&".into())]);
        assert_eq!(frags[0].style, StyleTag::Link);
        assert_eq!(text_of(&frags[0]), "&");
    }

    #[test]
    fn raw_html_keeps_current_style() {
        let frags = build_fragments(&[Inline::Strong(vec![Inline::Html("<b>".into())])]);
        assert!(matches!(frags[0].kind, FragmentKind::Html(_)));
        assert_eq!(frags[0].style, StyleTag::Strong);
    }

    #[test]
    fn empty_inlines_build_nothing() {
        assert!(build_fragments(&[]).is_empty());
    }
}
