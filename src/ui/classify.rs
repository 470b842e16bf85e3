//! Semantic reclassification: mention and emoji detection over merged
//! text runs.
//!
//! Runs between fragment building and wrapping, because retagging changes
//! run lengths and therefore line-break decisions. Adjacent text fragments
//! sharing a style are merged first regardless of the eventual
//! classification; a mention split across parser tokens only matches once
//! the pieces are glued back together. All membership and pattern tests
//! operate on sentinel-stripped text.

use crate::core::users::UserSet;
use crate::ui::fragment::{Fragment, FragmentKind, StyleTag};
use crate::utils::cursor;

/// Reclassify a fragment sequence against the known-user set. Idempotent;
/// output length only shrinks through merging, except where a trailing
/// punctuation split separates a mention from its punctuation.
pub fn reclassify(fragments: Vec<Fragment>, users: &UserSet) -> Vec<Fragment> {
    let mut out = Vec::with_capacity(fragments.len());
    let mut run: Option<(String, StyleTag)> = None;

    for fragment in fragments {
        match fragment.kind {
            FragmentKind::Text(text) => match run.as_mut() {
                Some((acc, style)) if *style == fragment.style => acc.push_str(&text),
                _ => {
                    flush(run.take(), users, &mut out);
                    run = Some((text, fragment.style));
                }
            },
            _ => {
                flush(run.take(), users, &mut out);
                out.push(fragment);
            }
        }
    }
    flush(run.take(), users, &mut out);
    out
}

fn flush(run: Option<(String, StyleTag)>, users: &UserSet, out: &mut Vec<Fragment>) {
    let Some((text, style)) = run else {
        return;
    };
    let stripped = cursor::strip(&text).into_owned();

    if is_emoji_shorthand(&stripped) {
        out.push(Fragment::text(text, StyleTag::Emoji));
        return;
    }
    if is_mention(&stripped, users) {
        out.push(Fragment::text(text, StyleTag::Username));
        return;
    }
    // Parser tokens are whitespace-delimited, so "@alice!" arrives as one
    // run. Retry with the trailing punctuation split off and emit it
    // separately under the original style.
    let head_len = stripped
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .len();
    if head_len > 0 && head_len < stripped.len() && is_mention(&stripped[..head_len], users) {
        let (head, tail) = split_at_stripped(&text, head_len);
        out.push(Fragment::text(head, StyleTag::Username));
        out.push(Fragment::text(tail, style));
        return;
    }
    out.push(Fragment::text(text, style));
}

/// `:name:` shorthand: wrapped in a colon on both ends and wider than the
/// two delimiters alone.
fn is_emoji_shorthand(stripped: &str) -> bool {
    stripped.starts_with(':')
        && stripped.ends_with(':')
        && unicode_width::UnicodeWidthStr::width(stripped) > 2
}

/// A run is a mention when it names a known user outright or with a
/// leading `@` (which stays in the rendered text).
fn is_mention(stripped: &str, users: &UserSet) -> bool {
    if users.contains(stripped) {
        return true;
    }
    stripped
        .strip_prefix('@')
        .is_some_and(|name| users.contains(name))
}

/// Split `text` so the head covers `stripped_len` bytes of sentinel-free
/// content. The sentinel glues to the side it sits in, keeping the
/// at-most-one-occurrence invariant intact across the split.
fn split_at_stripped(text: &str, stripped_len: usize) -> (String, String) {
    let mut seen = 0;
    for (at, c) in text.char_indices() {
        if seen == stripped_len && c != cursor::CURSOR_SENTINEL {
            return (text[..at].to_string(), text[at..].to_string());
        }
        if c != cursor::CURSOR_SENTINEL {
            seen += c.len_utf8();
        }
    }
    (text.to_string(), String::new())
}
