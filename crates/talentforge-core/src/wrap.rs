//! Display-width text wrapping shared by the input widgets and the renderer.
//!
//! Widths are terminal columns, so CJK and most emoji count as two.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal columns occupied by `text`.
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Hard-wrap every line of `text` at `width` columns.
///
/// Each `\n` starts a new row and an empty line still yields one row. The
/// input widgets count their rows with this, so the renderer must draw with
/// it too.
pub fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    text.split('\n')
        .flat_map(|line| break_line(line, width))
        .collect()
}

/// Word-wrap every line of `text` at `width` columns. Words longer than a
/// row are broken at char boundaries.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    text.split('\n')
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

/// Row and column of a char cursor inside `wrap_chars(text, width)`.
/// A cursor right after a full row sits at the start of the next one.
pub fn cursor_position(text: &str, cursor: usize, width: usize) -> (u16, u16) {
    let width = width.max(1);
    let (mut row, mut col) = (0usize, 0usize);
    for ch in text.chars().take(cursor) {
        if ch == '\n' {
            row += 1;
            col = 0;
            continue;
        }
        let ch_width = ch.width().unwrap_or(0);
        if ch_width == 0 {
            continue;
        }
        if col + ch_width > width && col > 0 {
            row += 1;
            col = 0;
        }
        col += ch_width;
    }
    if col >= width {
        row += 1;
        col = 0;
    }
    (row as u16, col as u16)
}

fn break_line(line: &str, width: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for ch in line.chars() {
        let ch_width = ch.width().unwrap_or(0);

        // Zero-width chars stay with whatever precedes them
        if ch_width == 0 {
            current.push(ch);
            continue;
        }

        if current_width + ch_width > width && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() || parts.is_empty() {
        parts.push(current);
    }
    parts
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in line.split_whitespace() {
        let word_width = word.width();

        if !current.is_empty() && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }

        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        if word_width > width {
            let mut broken = break_line(word, width);
            if let Some(last) = broken.pop() {
                rows.extend(broken);
                current_width = last.width();
                current = last;
            }
        } else {
            current = word.to_string();
            current_width = word_width;
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}
