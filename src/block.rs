//! Body collection for `dcl-ds` / `dcl-enum` blocks.
use crate::matchers;
use crate::splitter::split_line;

/// One non-blank body line, trimmed, with its raw source index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLine<'a> {
    /// Zero-based index into the full source.
    pub line: usize,
    /// Line content with surrounding whitespace removed.
    pub text: &'a str,
}

/// Body of a composite declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Index of the closing marker line. `None` when a top-level declaration
    /// or the end of input came first.
    pub close: Option<usize>,
    /// Non-blank body lines in source order.
    pub lines: Vec<BlockLine<'a>>,
}

/// Collect the lines after `open` up to, not including, the first line
/// accepted by `is_close`. Blank lines are dropped but raw indices are kept,
/// so member ranges stay aligned with the source.
///
/// A top-level declaration (`dcl-proc`, `dcl-s`, another `dcl-ds`, ...)
/// before the closing marker ends the body early and leaves it unterminated,
/// so a missing `end-ds` never swallows the declarations that follow.
pub fn extract_block<'a>(lines: &[&'a str], open: usize, is_close: fn(&str) -> bool) -> Block<'a> {
    let start = open.saturating_add(1);
    let mut body = Vec::new();

    for (line, raw) in lines.iter().enumerate().skip(start) {
        if is_close(raw) {
            return Block { close: Some(line), lines: body };
        }
        if matchers::breaks_block(split_line(raw).code) {
            tracing::debug!(open = open.saturating_add(1), at = line.saturating_add(1), "block interrupted by a declaration");
            return Block { close: None, lines: body };
        }
        let text = raw.trim();
        if !text.is_empty() {
            body.push(BlockLine { line, text });
        }
    }

    return Block { close: None, lines: body };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers;

    #[test]
    fn stops_at_closing_marker() {
        let lines = ["dcl-ds cust;", "  id int(10);", "  name char(30);", "end-ds;", "dcl-s x int(5);"];
        let block = extract_block(&lines, 0, matchers::data_structure_close);
        assert_eq!(block.close, Some(3));
        assert_eq!(
            block.lines,
            vec![
                BlockLine { line: 1, text: "id int(10);" },
                BlockLine { line: 2, text: "name char(30);" },
            ]
        );
    }

    #[test]
    fn blank_lines_are_dropped_but_indices_kept() {
        let lines = ["dcl-enum colors;", "", "  red 'R';", "   ", "  blue 'B';", "end-enum;"];
        let block = extract_block(&lines, 0, matchers::enum_close);
        let indices: Vec<usize> = block.lines.iter().map(|l| l.line).collect();
        assert_eq!(indices, vec![2, 4]);
    }

    #[test]
    fn unterminated_block_runs_to_end_of_input() {
        let lines = ["dcl-ds cust;", "id int(10);", "name char(30);"];
        let block = extract_block(&lines, 0, matchers::data_structure_close);
        assert_eq!(block.close, None);
        assert_eq!(block.lines.len(), 2);
    }

    #[test]
    fn opener_on_last_line_has_empty_body() {
        let lines = ["dcl-s a int(3);", "dcl-ds cust;"];
        let block = extract_block(&lines, 1, matchers::data_structure_close);
        assert!(block.lines.is_empty());
        assert_eq!(block.close, None);
    }

    #[test]
    fn top_level_declaration_ends_an_unclosed_body() {
        let lines = ["dcl-ds a;", "  id int(3);", "dcl-proc p;", "end-proc;", "dcl-ds b;", "  y int(3);", "end-ds;"];
        let block = extract_block(&lines, 0, matchers::data_structure_close);
        assert_eq!(block.close, None);
        assert_eq!(block.lines, vec![BlockLine { line: 1, text: "id int(3);" }]);
    }

    #[test]
    fn subf_keyword_does_not_end_a_body() {
        let lines = ["dcl-ds a;", "  dcl-subf id int(3);", "end-ds;"];
        let block = extract_block(&lines, 0, matchers::data_structure_close);
        assert_eq!(block.close, Some(2));
        assert_eq!(block.lines.len(), 1);
    }
}
