//! Greedy style-preserving line wrap over fragment sequences.
//!
//! One pass, linear in fragment count, no state beyond the open line and
//! its column. Greedy fill matches what terminal editors do and keeps the
//! renderer deterministic; total raggedness is not optimized.

use crate::ui::fragment::Fragment;

/// Pack fragments into lines of at most `width` display columns.
///
/// - Forced breaks close the open line (even empty) and are dropped.
/// - A space that does not fit closes the line and is dropped; spaces are
///   preferred break points and never carry over.
/// - Any other fragment that does not fit starts a new line alone. An
///   atomic fragment wider than `width` stays whole on that line; this
///   overflow fallback is what guarantees progress at degenerate widths.
/// - The final, possibly empty, line is always emitted.
pub fn wrap_fragments(fragments: Vec<Fragment>, width: usize) -> Vec<Vec<Fragment>> {
    let width = width.max(1);
    let mut lines: Vec<Vec<Fragment>> = Vec::new();
    let mut current: Vec<Fragment> = Vec::new();
    let mut column = 0usize;

    for fragment in fragments {
        if fragment.is_break() {
            lines.push(std::mem::take(&mut current));
            column = 0;
            continue;
        }
        let needed = fragment.display_width();
        // saturating: an overflow fragment leaves `column` past `width`
        if width.saturating_sub(column) >= needed {
            column += needed;
            current.push(fragment);
        } else if fragment.is_space() {
            lines.push(std::mem::take(&mut current));
            column = 0;
        } else {
            lines.push(std::mem::take(&mut current));
            column = needed;
            current.push(fragment);
        }
    }
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::fragment::{FragmentKind, StyleTag};
    use crate::utils::cursor::{self, CURSOR_SENTINEL};

    fn word(text: &str) -> Fragment {
        Fragment::text(text, StyleTag::Normal)
    }

    fn space() -> Fragment {
        Fragment::space(StyleTag::Normal)
    }

    fn soft_break() -> Fragment {
        Fragment {
            kind: FragmentKind::SoftBreak,
            style: StyleTag::Normal,
        }
    }

    fn line_width(line: &[Fragment]) -> usize {
        line.iter().map(Fragment::display_width).sum()
    }

    fn line_text(line: &[Fragment]) -> String {
        line.iter().map(Fragment::rendered_text).collect()
    }

    #[test]
    fn words_fill_greedily() {
        let lines = wrap_fragments(
            vec![word("one"), space(), word("two"), space(), word("three")],
            8,
        );
        // The space after "two" still fits on the first line; only spaces
        // that overflow are dropped.
        let texts: Vec<_> = lines.iter().map(|l| line_text(l)).collect();
        assert_eq!(texts, vec!["one two ", "three"]);
    }

    #[test]
    fn width_bound_holds_for_every_nonoverflow_line() {
        let words = "the quick brown fox jumps over the lazy dog";
        let mut frags = Vec::new();
        for (i, w) in words.split(' ').enumerate() {
            if i > 0 {
                frags.push(space());
            }
            frags.push(word(w));
        }
        for target in [1usize, 4, 7, 12, 80] {
            let lines = wrap_fragments(frags.clone(), target);
            for line in &lines {
                let over = line_width(line) > target;
                // Overflow is only legal for a single over-wide fragment
                // alone on its line.
                if over {
                    assert_eq!(line.len(), 1);
                    assert!(line[0].display_width() > target);
                }
            }
        }
    }

    #[test]
    fn overflow_fragment_lands_alone_unsplit() {
        let lines = wrap_fragments(vec![word("abcdefghij")], 5);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "abcdefghij");
        assert_eq!(line_width(&lines[0]), 10);
    }

    #[test]
    fn forced_break_produces_two_lines() {
        let lines = wrap_fragments(vec![word("a"), soft_break(), word("b")], 40);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "a");
        assert_eq!(line_text(&lines[1]), "b");
    }

    #[test]
    fn breaks_close_even_an_empty_line() {
        let lines = wrap_fragments(vec![soft_break(), soft_break(), word("x")], 40);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].is_empty());
        assert!(lines[1].is_empty());
    }

    #[test]
    fn boundary_space_is_dropped_not_carried() {
        // "ab" fills the line; the space must vanish, not start line two.
        let lines = wrap_fragments(vec![word("ab"), space(), word("cd")], 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "ab");
        assert_eq!(line_text(&lines[1]), "cd");
    }

    #[test]
    fn exact_fit_stays_on_the_line() {
        let lines = wrap_fragments(vec![word("ab"), space(), word("cd")], 5);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "ab cd");
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        let lines = wrap_fragments(Vec::new(), 10);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }

    #[test]
    fn wide_characters_wrap_by_display_cells() {
        let lines = wrap_fragments(vec![word("日本"), space(), word("語")], 4);
        assert_eq!(line_text(&lines[0]), "日本");
        assert_eq!(line_text(&lines[1]), "語");
    }

    #[test]
    fn sentinel_does_not_consume_columns() {
        let with_cursor = format!("ab{CURSOR_SENTINEL}");
        let lines = wrap_fragments(vec![word(&with_cursor), space(), word("cd")], 5);
        assert_eq!(lines.len(), 1, "sentinel must not force a wrap");
        assert!(cursor::contains(&line_text(&lines[0])));
    }

    #[test]
    fn content_survives_wrapping_intact() {
        let input = vec![
            word("alpha"),
            space(),
            word("beta"),
            soft_break(),
            word("gamma"),
            space(),
            word("delta"),
        ];
        let joined_input: String = input
            .iter()
            .filter(|f| !f.is_break() && !f.is_space())
            .map(Fragment::rendered_text)
            .collect();
        let lines = wrap_fragments(input.clone(), 7);
        let joined_output: String = lines
            .iter()
            .flatten()
            .filter(|f| !f.is_space())
            .map(Fragment::rendered_text)
            .collect();
        assert_eq!(joined_input, joined_output);
    }

    #[test]
    fn zero_width_degenerates_without_looping() {
        let lines = wrap_fragments(vec![word("ab"), space(), word("cd")], 0);
        assert!(lines.iter().flatten().count() >= 2);
    }
}
