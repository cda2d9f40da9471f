use pairgrid_io::pairs::unstorable_char;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `width` display columns, ending in ".." when cut.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return take_width(s, width).to_string();
    }
    format!("{}..", take_width(s, width - 2))
}

/// Longest prefix of `s` that fits in `budget` display columns.
fn take_width(s: &str, budget: usize) -> &str {
    let mut used = 0;
    for (i, ch) in s.char_indices() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            return &s[..i];
        }
        used += cw;
    }
    s
}

/// Pad or truncate a string to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let sw = display_width(&cut);
    format!("{}{}", cut, " ".repeat(width.saturating_sub(sw)))
}

/// Reject cell text the file format cannot hold.
pub(crate) fn check_storable(what: &str, text: &str) -> Result<(), String> {
    if let Some(ch) = unstorable_char(text) {
        let shown = match ch {
            '\n' => "\\n".to_string(),
            '\r' => "\\r".to_string(),
            other => other.to_string(),
        };
        return Err(format!("{what} text may not contain '{shown}'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_cjk_double() {
        assert_eq!(display_width("pair"), 4);
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("\u{4e16}\u{754c}"), 4); // "世界"
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_display("a,b", 3), "a,b");
        assert_eq!(truncate_display("", 0), "");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate_display("hello,world", 7), "hello..");
        assert_eq!(truncate_display("abc", 2), "ab");
        assert_eq!(truncate_display("abc", 0), "");
    }

    #[test]
    fn truncate_respects_wide_chars() {
        // 8 columns into 5: budget 3 fits one wide char
        let t = truncate_display("\u{4e16}\u{754c}\u{4f60}\u{597d}", 5);
        assert_eq!(t, "\u{4e16}..");
        assert!(display_width(&t) <= 5);
    }

    #[test]
    fn pad_right_fills_or_cuts() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("NULL", 4), "NULL");
        assert_eq!(pad_right("abcdef", 5), "abc..");
    }

    #[test]
    fn storable_text() {
        assert!(check_storable("left", "plain text").is_ok());
        assert!(check_storable("left", "").is_ok());
        assert_eq!(
            check_storable("right", "a/b").unwrap_err(),
            "right text may not contain '/'"
        );
        assert!(check_storable("left", "a,b").is_err());
        assert_eq!(
            check_storable("left", "two\nlines").unwrap_err(),
            "left text may not contain '\\n'"
        );
    }
}
