//! Display-width aware helpers shared by the renderers.
//!
//! Widths are measured in terminal columns, so CJK characters count as two
//! and ANSI escape sequences count as zero.

use console::{measure_text_width, pad_str, Alignment};
use unicode_width::UnicodeWidthChar;

/// Returns the display width of a string.
///
/// # Example
///
/// ```rust
/// use reportgrid::util::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    measure_text_width(s)
}

/// Pads on the left (right-aligns) to `width`. Longer input is returned as is.
pub fn pad_left(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Right, None).into_owned()
}

/// Pads on the right (left-aligns) to `width`. Longer input is returned as is.
pub fn pad_right(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Left, None).into_owned()
}

/// Builds a run of `count` copies of `c`.
pub fn repeat_char(c: char, count: usize) -> String {
    std::iter::repeat_n(c, count).collect()
}

/// Keeps characters from the start while they fit in `max_width` columns.
pub fn clip_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > max_width {
            break;
        }
        result.push(c);
        current += w;
    }
    result
}

/// Greedy word wrap into lines no wider than `width`.
///
/// Whole words are consumed; whitespace runs collapse to a single space. A
/// word wider than `width` starts on a fresh line and is hard-broken into
/// `width`-column chunks, the last chunk staying open for following words.
/// The result always holds at least one line, empty input yields `[""]`.
///
/// Wrapping the space-joined output again with the same width reproduces it.
///
/// # Example
///
/// ```rust
/// use reportgrid::util::wrap;
///
/// assert_eq!(wrap("hello world foo bar", 11), vec!["hello world", "foo bar"]);
/// assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
/// ```
pub fn wrap(s: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in s.split_whitespace() {
        let word_width = display_width(word);

        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut chunks = hard_break(word, width);
            current = chunks.pop().unwrap_or_default();
            current_width = display_width(&current);
            lines.extend(chunks);
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Stands in for a character wider than the whole column.
const OVERWIDE: char = '?';

/// Splits a single word into chunks of at most `width` columns.
///
/// A character that cannot fit even an empty chunk is replaced by
/// [`OVERWIDE`] so it stays visible after clipping.
fn hard_break(word: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0;

    for c in word.chars() {
        let (c, w) = match c.width().unwrap_or(0) {
            w if w > width => (OVERWIDE, 1),
            w => (c, w),
        };
        if chunk_width + w > width && !chunk.is_empty() {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0;
        }
        chunk.push(c);
        chunk_width += w;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_ascii_and_wide() {
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本語"), 6);
        assert_eq!(display_width("\x1b[31mred\x1b[0m"), 3);
    }

    #[test]
    fn padding() {
        assert_eq!(pad_left("42", 5), "   42");
        assert_eq!(pad_right("42", 5), "42   ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }

    #[test]
    fn repeat_char_counts() {
        assert_eq!(repeat_char('-', 4), "----");
        assert_eq!(repeat_char(' ', 0), "");
    }

    #[test]
    fn clip_keeps_prefix() {
        assert_eq!(clip_to_width("Hello World", 5), "Hello");
        assert_eq!(clip_to_width("Hi", 5), "Hi");
        assert_eq!(clip_to_width("日本語", 3), "日");
    }

    #[test]
    fn wrap_fits_on_one_line() {
        assert_eq!(wrap("short text", 20), vec!["short text"]);
    }

    #[test]
    fn wrap_greedy_words() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn wrap_exact_width_boundary() {
        assert_eq!(wrap("abcd efgh", 4), vec!["abcd", "efgh"]);
        assert_eq!(wrap("ab cd", 5), vec!["ab cd"]);
    }

    #[test]
    fn wrap_hard_breaks_long_word() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("a bcdefgh", 4), vec!["a", "bcde", "fgh"]);
        assert_eq!(wrap("abcdefghij k", 4), vec!["abcd", "efgh", "ij k"]);
    }

    #[test]
    fn wrap_empty_and_blank() {
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("   ", 10), vec![""]);
    }

    #[test]
    fn wrap_collapses_whitespace() {
        assert_eq!(wrap("a   b\n\tc", 10), vec!["a b c"]);
    }

    #[test]
    fn wrap_wide_characters() {
        // Each CJK char is two columns wide.
        assert_eq!(wrap("日本語テキスト", 4), vec!["日本", "語テ", "キス", "ト"]);
    }

    #[test]
    fn wide_character_in_single_column_is_replaced() {
        assert_eq!(wrap("日本", 1), vec!["?", "?"]);
        assert_eq!(wrap("a日b", 1), vec!["a", "?", "b"]);
        for line in wrap("x 日本語", 1) {
            assert_eq!(display_width(&line), 1);
        }
    }
}
