//! One line-anchored recognizer per free-format construct.
//!
//! Every matcher is independent: callers run all of them against the same
//! line and several may fire at once. Keywords are case-insensitive.
use std::sync::LazyLock;

use regex::Regex;

/// Compile a hardcoded pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid (compile-time invariant).
#[allow(clippy::expect_used, reason = "patterns are string literals covered by tests")]
fn compile(pattern: &str) -> Regex {
    return Regex::new(pattern).expect("valid regex");
}

/// `dcl-proc NAME [options]`.
static PROC_OPEN: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"(?i)^\s*dcl-proc\s+([a-z][a-z0-9_]*)\b(.*)$"));
/// `end-proc`.
static PROC_CLOSE: LazyLock<Regex> = LazyLock::new(|| return compile(r"(?i)^\s*end-proc\b"));
/// `begsr NAME`.
static SUBR_OPEN: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"(?i)^\s*begsr\s+([a-z][a-z0-9_]*)\b"));
/// `endsr`.
static SUBR_CLOSE: LazyLock<Regex> = LazyLock::new(|| return compile(r"(?i)^\s*endsr\b"));
/// `dcl-c NAME [VALUE];`.
static CONSTANT: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"(?i)^\s*dcl-c\s+([a-z][a-z0-9_]*)(?:\s+([^;]+))?;"));
/// `dcl-s NAME TYPE;`.
static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"(?i)^\s*dcl-s\s+([a-z][a-z0-9_]*)\s+([^;]+);"));
/// `dcl-ds NAME [OPTIONS];`.
static DS_OPEN: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"(?i)^\s*dcl-ds\s+([a-z][a-z0-9_]*)(?:\s+([^;]+))?;"));
/// `end-ds`.
static DS_CLOSE: LazyLock<Regex> = LazyLock::new(|| return compile(r"(?i)^\s*end-ds\b"));
/// `dcl-enum NAME [OPTIONS];`.
static ENUM_OPEN: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"(?i)^\s*dcl-enum\s+([a-z][a-z0-9_]*)(?:\s+([^;]+))?;"));
/// `end-enum`.
static ENUM_CLOSE: LazyLock<Regex> = LazyLock::new(|| return compile(r"(?i)^\s*end-enum\b"));
/// `dcl-f NAME [OPTIONS];`.
static DECLARED_FILE: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"(?i)^\s*dcl-f\s+([a-z][a-z0-9_]*)(?:\s+([^;]+))?;"));
/// `[dcl-subf] NAME VALUE;` inside a data-structure or enum body.
static MEMBER: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"(?i)^\s*(?:dcl-subf\s+)?([a-z][a-z0-9_]*)\s+([^;]+);"));
/// `dim(N)` anywhere in a keyword string.
static DIMENSION: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"(?i)dim\s*\(\s*([^)]+)\s*\)"));
/// `to do[:] TEXT` at the start of a comment.
static TO_DO: LazyLock<Regex> = LazyLock::new(|| return compile(r"(?i)^\s*to\s*do\s*:?(.*)$"));
/// Leading conditional or loop opcode.
static CONTROL_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    return compile(r"(?i)^\s*(?:if|elseif|else|select|when|other|for|dow|do)\b");
});
/// Keywords that give a data structure its layout from elsewhere, leaving no body.
static LIKE_DS: LazyLock<Regex> = LazyLock::new(|| return compile(r"(?i)\blike(?:ds|rec)\s*\("));
/// `end-ds` written on the opening line itself.
static INLINE_DS_CLOSE: LazyLock<Regex> = LazyLock::new(|| return compile(r"(?i)\bend-ds\b"));
/// Statements that can only appear outside a composite body.
static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    return compile(r"(?i)^\s*(?:dcl-proc|end-proc|dcl-pr|dcl-pi|dcl-ds|dcl-enum|dcl-s|dcl-c|dcl-f)\b");
});

/// Captures of a `dcl-proc` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcedureOpen<'a> {
    /// True when the text after the name mentions `export`.
    pub is_export: bool,
    /// Procedure name.
    pub name: &'a str,
}

/// Name plus the optional trimmed text between it and the `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Declared name.
    pub name: &'a str,
    /// Trimmed keyword or value text, `None` when absent.
    pub rest: Option<&'a str>,
}

/// A `NAME VALUE;` body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member<'a> {
    /// Member name.
    pub name: &'a str,
    /// Trimmed text after the name.
    pub value: &'a str,
}

/// Captures of a `dcl-s` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDecl<'a> {
    /// Trimmed type text as written.
    pub dcl_type: &'a str,
    /// Variable name.
    pub name: &'a str,
}

/// Shared shape of `dcl-c`, `dcl-ds`, `dcl-enum` and `dcl-f`.
fn declaration<'a>(pattern: &Regex, code: &'a str) -> Option<Declaration<'a>> {
    let caps = pattern.captures(code)?;
    let name = caps.get(1)?.as_str();
    let rest = caps.get(2).map(|m| return m.as_str().trim()).filter(|r| return !r.is_empty());
    return Some(Declaration { name, rest });
}

/// Match `dcl-proc NAME [options]`.
pub fn procedure_open(code: &str) -> Option<ProcedureOpen<'_>> {
    let caps = PROC_OPEN.captures(code)?;
    let name = caps.get(1)?.as_str();
    let is_export = caps
        .get(2)
        .is_some_and(|m| return m.as_str().to_lowercase().contains("export"));
    return Some(ProcedureOpen { is_export, name });
}

/// Match `end-proc`.
pub fn procedure_close(code: &str) -> bool {
    return PROC_CLOSE.is_match(code);
}

/// Match `begsr NAME`, returning the subroutine name.
pub fn subroutine_open(code: &str) -> Option<&str> {
    return SUBR_OPEN.captures(code)?.get(1).map(|m| return m.as_str());
}

/// Match `endsr`.
pub fn subroutine_close(code: &str) -> bool {
    return SUBR_CLOSE.is_match(code);
}

/// Match `dcl-c NAME [VALUE];`.
pub fn constant(code: &str) -> Option<Declaration<'_>> {
    return declaration(&CONSTANT, code);
}

/// Match `dcl-s NAME TYPE;`.
pub fn variable(code: &str) -> Option<VariableDecl<'_>> {
    let caps = VARIABLE.captures(code)?;
    let name = caps.get(1)?.as_str();
    let dcl_type = caps.get(2)?.as_str().trim();
    return Some(VariableDecl { dcl_type, name });
}

/// Match `dcl-ds NAME [OPTIONS];`.
pub fn data_structure_open(code: &str) -> Option<Declaration<'_>> {
    return declaration(&DS_OPEN, code);
}

/// Match `end-ds`.
pub fn data_structure_close(line: &str) -> bool {
    return DS_CLOSE.is_match(line);
}

/// Match `dcl-enum NAME [OPTIONS];`.
pub fn enum_open(code: &str) -> Option<Declaration<'_>> {
    return declaration(&ENUM_OPEN, code);
}

/// Match `end-enum`.
pub fn enum_close(line: &str) -> bool {
    return ENUM_CLOSE.is_match(line);
}

/// Match `dcl-f NAME [OPTIONS];`.
pub fn declared_file(code: &str) -> Option<Declaration<'_>> {
    return declaration(&DECLARED_FILE, code);
}

/// Match a data-structure subfield or enum member line.
pub fn member(code: &str) -> Option<Member<'_>> {
    let caps = MEMBER.captures(code)?;
    let name = caps.get(1)?.as_str();
    let value = caps.get(2)?.as_str().trim();
    return Some(Member { name, value });
}

/// Find the `dim(N)` argument anywhere in `text`.
pub fn dimension(text: &str) -> Option<&str> {
    return DIMENSION.captures(text)?.get(1).map(|m| return m.as_str().trim());
}

/// Match a to-do marker at the start of a comment, returning its trimmed text.
pub fn to_do(comment: &str) -> Option<&str> {
    return TO_DO.captures(comment)?.get(1).map(|m| return m.as_str().trim());
}

/// Match a leading conditional or loop opcode.
pub fn control_block(code: &str) -> bool {
    return CONTROL_BLOCK.is_match(code);
}

/// True when data-structure options borrow their layout via `likeds`/`likerec`.
pub fn borrows_layout(options: &str) -> bool {
    return LIKE_DS.is_match(options);
}

/// True when a `dcl-ds` statement closes itself, as in
/// `dcl-ds rec extname('CUSTPF') end-ds;`.
pub fn closes_inline(options: &str) -> bool {
    return INLINE_DS_CLOSE.is_match(options);
}

/// True for a top-level declaration, which ends any composite body before it.
pub fn breaks_block(code: &str) -> bool {
    return BLOCK_BREAK.is_match(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedure_open_captures_name_and_export() {
        let proc = procedure_open("  DCL-PROC getCustomer EXPORT;").unwrap();
        assert_eq!(proc.name, "getCustomer");
        assert!(proc.is_export);

        let local = procedure_open("dcl-proc helper;").unwrap();
        assert!(!local.is_export);
    }

    #[test]
    fn procedure_open_rejects_other_statements() {
        assert!(procedure_open("dcl-pi *n;").is_none());
        assert!(procedure_open("x = dcl-proc;").is_none());
        assert!(procedure_open("dcl-proc 9lives;").is_none());
    }

    #[test]
    fn close_markers_are_anchored() {
        assert!(procedure_close("  end-proc;"));
        assert!(procedure_close("END-PROC getCustomer;"));
        assert!(!procedure_close("x = 1; end-proc;"));
        assert!(!procedure_close("end-process = 1;"));
        assert!(subroutine_close("endsr;"));
        assert!(data_structure_close("  END-DS;"));
        assert!(enum_close("end-enum;"));
        assert!(!enum_close("end-ds;"));
    }

    #[test]
    fn subroutine_open_captures_name() {
        assert_eq!(subroutine_open("   begsr loadScreen;"), Some("loadScreen"));
        assert_eq!(subroutine_open("exsr loadScreen;"), None);
    }

    #[test]
    fn constant_value_is_optional() {
        let with_value = constant("dcl-c MAX_ROWS 500;").unwrap();
        assert_eq!(with_value.name, "MAX_ROWS");
        assert_eq!(with_value.rest, Some("500"));

        let bare = constant("dcl-c FLAG;").unwrap();
        assert_eq!(bare.rest, None);

        assert!(constant("dcl-c MISSING_TERMINATOR 1").is_none());
    }

    #[test]
    fn constant_keeps_quoted_slashes() {
        let url = constant("dcl-c URL 'http://x//y';").unwrap();
        assert_eq!(url.rest, Some("'http://x//y'"));
    }

    #[test]
    fn variable_requires_a_type() {
        let var = variable("dcl-s total packed(7:2) inz(0);").unwrap();
        assert_eq!(var.name, "total");
        assert_eq!(var.dcl_type, "packed(7:2) inz(0)");
        assert!(variable("dcl-s total;").is_none());
    }

    #[test]
    fn data_structure_and_enum_openers() {
        let ds = data_structure_open("dcl-ds customer qualified;").unwrap();
        assert_eq!(ds.name, "customer");
        assert_eq!(ds.rest, Some("qualified"));

        let en = enum_open("DCL-ENUM colors;").unwrap();
        assert_eq!(en.name, "colors");
        assert_eq!(en.rest, None);

        assert!(data_structure_open("dcl-dsx customer;").is_none());
    }

    #[test]
    fn declared_file_options() {
        let file = declared_file("dcl-f CUSTDSPF workstn indds(ind);").unwrap();
        assert_eq!(file.name, "CUSTDSPF");
        assert_eq!(file.rest, Some("workstn indds(ind)"));
        assert!(declared_file("dcl-f CUSTPF;").unwrap().rest.is_none());
    }

    #[test]
    fn member_accepts_optional_subfield_keyword() {
        assert_eq!(
            member("id packed(7:0);"),
            Some(Member { name: "id", value: "packed(7:0)" })
        );
        assert_eq!(
            member("dcl-subf name char(30);"),
            Some(Member { name: "name", value: "char(30)" })
        );
        assert!(member("end-ds;").is_none());
        assert!(member("// note;").is_none());
    }

    #[test]
    fn dimension_is_found_anywhere() {
        assert_eq!(dimension("packed(7:2) dim(10)"), Some("10"));
        assert_eq!(dimension("char(5) DIM( MAX_ROWS )"), Some("MAX_ROWS"));
        assert_eq!(dimension("char(5)"), None);
    }

    #[test]
    fn to_do_variants() {
        assert_eq!(to_do(" TODO: handle errors"), Some("handle errors"));
        assert_eq!(to_do(" to do refactor"), Some("refactor"));
        assert_eq!(to_do(" To Do:"), Some(""));
        assert_eq!(to_do(" see todo below"), None);
    }

    #[test]
    fn control_block_openers() {
        for line in ["if x = 1;", "  ELSEIF y;", "else;", "select;", "when a;", "other;", "for i = 1 to 9;", "dow *in03;", "do 5;"] {
            assert!(control_block(line), "expected control block: {line}");
        }
        for line in ["endif;", "dou done;", "iffy = 1;", "x = if;"] {
            assert!(!control_block(line), "unexpected control block: {line}");
        }
    }

    #[test]
    fn likeds_detection() {
        assert!(borrows_layout("likeds(customer_t)"));
        assert!(borrows_layout("qualified LIKEREC(custrec)"));
        assert!(!borrows_layout("qualified template"));
    }

    #[test]
    fn inline_end_ds_is_seen_in_options() {
        assert!(closes_inline("extname('CUSTPF') end-ds"));
        assert!(closes_inline("qualified END-DS"));
        assert!(!closes_inline("extname('SEND_DS')"));
    }

    #[test]
    fn top_level_declarations_break_blocks() {
        for line in ["dcl-proc p;", "  end-proc;", "dcl-ds b;", "DCL-S x int(3);", "dcl-c K 1;", "dcl-f F;", "dcl-enum e;"] {
            assert!(breaks_block(line), "expected a block break: {line}");
        }
        for line in ["dcl-subf id int(10);", "  id int(10);", "end-ds;", "dcl-support x;"] {
            assert!(!breaks_block(line), "unexpected block break: {line}");
        }
    }
}
