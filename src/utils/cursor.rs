//! Cursor sentinel protocol.
//!
//! While the user is composing a message, the host inserts
//! [`CURSOR_SENTINEL`] once into the text at the live edit position before
//! the pipeline sees it. The character is invisible to width measurement
//! and membership tests (both operate on the stripped form) but rides
//! through fragment building, reclassification, and wrapping untouched, so
//! the assembler can flag whichever final run contains it. The host then
//! scrolls its preview viewport to that run's line.
//!
//! Invariant: at most one occurrence per render call, and stripping the
//! sentinel from the rendered output reproduces the original input text
//! exactly.

use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

/// Private-use marker standing in for the live edit cursor. Guaranteed by
/// contract never to appear in ordinary message text.
pub const CURSOR_SENTINEL: char = '\u{E000}';

pub fn contains(text: &str) -> bool {
    text.contains(CURSOR_SENTINEL)
}

/// Sentinel-free view of `text`; borrows when no sentinel is present.
pub fn strip(text: &str) -> Cow<'_, str> {
    if contains(text) {
        Cow::Owned(text.chars().filter(|&c| c != CURSOR_SENTINEL).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Display-cell width of `text` with the sentinel excluded. Wide
/// characters count as 2 and combining marks as 0, matching the terminal
/// cell convention used by the rendering host.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip(text).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_borrows_when_sentinel_absent() {
        assert!(matches!(strip("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn strip_removes_exactly_the_sentinel() {
        let text = format!("ali{CURSOR_SENTINEL}ce");
        assert_eq!(strip(&text), "alice");
    }

    #[test]
    fn sentinel_is_invisible_to_width() {
        let text = format!("ab{CURSOR_SENTINEL}");
        assert_eq!(display_width(&text), 2);
        assert_eq!(display_width("ab"), 2);
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(display_width("日本"), 4);
    }
}
