//! Escaping of literal markup for a double-quoted string literal.
//!
//! Rules, applied in order:
//! 1. `\` becomes `\\`, unless it is immediately followed by `(` so that
//!    inline interpolation such as `\(name)` keeps working
//! 2. `"` becomes `\"`
//! 3. carriage return becomes `\r`
//! 4. line feed becomes `\n`
//!
//! No rule rewrites the output of another, so a single left-to-right pass is
//! equivalent to applying them one after the other.

/// Escape literal text for embedding between double quotes.
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'(') => escaped.push('\\'),
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

#[cfg(test)]
pub(crate) fn unescape_literal(escaped: &str) -> String {
    let mut text = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            text.push(ch);
            continue;
        }
        match chars.peek() {
            Some('\\') => text.push('\\'),
            Some('"') => text.push('"'),
            Some('r') => text.push('\r'),
            Some('n') => text.push('\n'),
            // `\(` was left alone by the escaper.
            _ => {
                text.push('\\');
                continue;
            }
        }
        chars.next();
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_and_trailing_backslash() {
        assert_eq!(
            escape_literal(r#"He said "hi"\"#),
            r#"He said \"hi\"\\"#
        );
    }

    #[test]
    fn test_interpolation_backslash_is_kept() {
        assert_eq!(escape_literal(r"Hello \(name)!"), r"Hello \(name)!");
    }

    #[test]
    fn test_double_backslash_before_paren() {
        // Only the backslash directly before `(` is spared.
        assert_eq!(escape_literal(r"\\("), r"\\\(");
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(escape_literal("a\r\nb\n"), r"a\r\nb\n");
    }

    #[test]
    fn test_other_characters_untouched() {
        let text = "<div class='x'>\t{}%$#@!é漢字</div>";
        assert_eq!(escape_literal(text), text);
    }

    #[test]
    fn test_empty() {
        assert_eq!(escape_literal(""), "");
    }

    #[test]
    fn test_placeholder_alphabet_untouched() {
        assert_eq!(escape_literal("__0__ab_C9"), "__0__ab_C9");
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            "",
            "plain",
            r#"He said "hi"\"#,
            "line\r\nnext\n",
            r"\(interp) and \\ and \\(",
            "\\\"\\\r\\\n",
            "trailing\\",
        ];
        for sample in samples {
            assert_eq!(unescape_literal(&escape_literal(sample)), sample, "{sample:?}");
        }
    }

    #[test]
    fn test_round_trip_all_short_strings() {
        const ALPHABET: [char; 6] = ['\\', '(', '"', '\r', '\n', 'a'];
        const MAX_LEN: u32 = 6;

        let mut checked = 0;
        for len in 0..=MAX_LEN {
            for mut n in 0..ALPHABET.len().pow(len) {
                let mut sample = String::new();
                for _ in 0..len {
                    sample.push(ALPHABET[n % ALPHABET.len()]);
                    n /= ALPHABET.len();
                }

                let escaped = escape_literal(&sample);
                assert!(!escaped.contains(['\r', '\n']), "{sample:?}");
                assert_eq!(unescape_literal(&escaped), sample, "{sample:?}");
                checked += 1;
            }
        }
        assert_eq!(checked, 55987);
    }
}
