//! Viewport scroll arithmetic for the live-editing preview.
//!
//! The renderer reports which output line carries the cursor sentinel
//! (see [`crate::ui::render::RenderedMessage::cursor`]); the host feeds
//! that line and its viewport geometry through [`scroll_to_cursor`] each
//! repaint to keep the cursor on-screen with minimal movement.

/// Adjust `offset` (index of the first visible line) so `cursor_line`
/// falls inside a viewport of `viewport_height` rows over `total_lines`
/// lines. The offset moves only as far as needed, so scrolling stays
/// stable while the cursor wanders within the visible region.
pub fn scroll_to_cursor(
    total_lines: usize,
    viewport_height: usize,
    cursor_line: usize,
    offset: usize,
) -> usize {
    if total_lines == 0 || viewport_height == 0 {
        return 0;
    }
    let max_offset = total_lines.saturating_sub(viewport_height);
    let mut offset = offset.min(max_offset);
    let cursor_line = cursor_line.min(total_lines - 1);
    if cursor_line < offset {
        offset = cursor_line;
    } else if cursor_line >= offset + viewport_height {
        offset = cursor_line + 1 - viewport_height;
    }
    offset.min(max_offset)
}
