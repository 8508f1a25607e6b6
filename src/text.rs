//! Small string helpers shared by config, display and transfer reporting.

use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthChar;

pub const NICK_RULE: &str =
    "nick names are 1-10 characters of letters, digits, '-', '_' or '.'";

const ELLIPSIS: char = '…';

static NICK_PATTERN: OnceLock<Regex> = OnceLock::new();

fn nick_pattern() -> &'static Regex {
    NICK_PATTERN.get_or_init(|| {
        Regex::new(r"^[\p{L}\d_.\-]{1,10}$").expect("nick pattern is a valid regex")
    })
}

pub fn is_valid_nick(nick: &str) -> bool {
    nick_pattern().is_match(nick)
}

/// Cut `text` down to `max_width` terminal columns, marking the cut with an ellipsis.
///
/// Wide characters count as two columns, so CJK file names don't overflow a line.
pub fn shorten(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|ch| ch.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

/// Human readable byte count, one decimal above bytes.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_keeps_text_that_fits() {
        assert_eq!(shorten("word", 10), "word");
        assert_eq!(shorten("word", 4), "word");
    }

    #[test]
    fn shorten_marks_cut_with_ellipsis() {
        assert_eq!(shorten("holiday-photos.zip", 8), "holiday…");
    }

    #[test]
    fn shorten_to_zero_width_is_empty() {
        assert_eq!(shorten("anything", 0), "");
    }

    #[test]
    fn shorten_counts_wide_chars_as_two_columns() {
        // each ideograph is two columns wide
        assert_eq!(shorten("日本語のファイル", 5), "日本…");
    }

    #[test]
    fn format_size_picks_unit() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(1023), "1023 bytes");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn nick_rule_matches_letters_digits_and_punctuation() {
        assert!(is_valid_nick("kari"));
        assert!(is_valid_nick("Åse-99"));
        assert!(is_valid_nick("a.b_c"));
        assert!(!is_valid_nick(""));
        assert!(!is_valid_nick("two words"));
        assert!(!is_valid_nick("elevenchars"));
    }
}
