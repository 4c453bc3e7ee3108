//! Quote-aware separation of a source line into code and `//` comment.

/// One raw line cut at its first live comment marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLine<'a> {
    /// Everything before the marker, or the whole line.
    pub code: &'a str,
    /// Everything after the marker, marker excluded. Empty when there is none.
    pub comment: &'a str,
}

/// Split `line` at the first `//` that sits outside a quoted literal.
///
/// Single and double quotes each toggle their own flag, but only while the
/// other flag is clear, so `"` inside `'...'` is inert and vice versa.
pub fn split_line(line: &str) -> SplitLine<'_> {
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '/' if !in_single && !in_double => {
                if let Some(&(next_idx, '/')) = chars.peek() {
                    let (Some(code), Some(comment)) = (line.get(..idx), line.get(next_idx.saturating_add(1)..))
                    else {
                        break;
                    };
                    return SplitLine { code, comment };
                }
            },
            _ => {},
        }
    }

    return SplitLine { code: line, comment: "" };
}

/// Length of `text` in UTF-16 code units, the column unit of [`crate::types::Position`].
pub fn utf16_len(text: &str) -> u32 {
    return u32::try_from(text.encode_utf16().count()).unwrap_or(u32::MAX);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_without_marker_is_all_code() {
        let split = split_line("dcl-s counter int(10);");
        assert_eq!(split.code, "dcl-s counter int(10);");
        assert_eq!(split.comment, "");
    }

    #[test]
    fn trailing_comment_is_split_off() {
        let split = split_line("  x = 1; // to do: remove");
        assert_eq!(split.code, "  x = 1; ");
        assert_eq!(split.comment, " to do: remove");
    }

    #[test]
    fn marker_inside_single_quotes_is_ignored() {
        let line = "dcl-c URL 'http://x//y';";
        let split = split_line(line);
        assert_eq!(split.code, line);
        assert_eq!(split.comment, "");
    }

    #[test]
    fn marker_inside_double_quotes_is_ignored() {
        let split = split_line(r#"msg = "a//b"; // real"#);
        assert_eq!(split.code, r#"msg = "a//b"; "#);
        assert_eq!(split.comment, " real");
    }

    #[test]
    fn double_quote_inside_single_quotes_is_inert() {
        let split = split_line(r#"x = 'say "hi'; // after"#);
        assert_eq!(split.code, r#"x = 'say "hi'; "#);
        assert_eq!(split.comment, " after");
    }

    #[test]
    fn whole_line_comment_has_empty_code() {
        let split = split_line("// header");
        assert_eq!(split.code, "");
        assert_eq!(split.comment, " header");
    }

    #[test]
    fn single_slash_is_code() {
        let split = split_line("total = a / b;");
        assert_eq!(split.comment, "");
    }

    #[test]
    fn utf16_length_counts_code_units() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("é"), 1);
        assert_eq!(utf16_len("𝄞"), 2);
    }
}
