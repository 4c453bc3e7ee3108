//! Outline listing: symbols grouped by kind, composites with their members.
use std::fmt::Write as _;

use serde::Serialize;

use crate::types::{Document, Reach, Symbol, SymbolKind};

/// Group order in listings. Member kinds are shown under their parent instead.
pub const LISTED_KINDS: [SymbolKind; 8] = [
    SymbolKind::Procedure,
    SymbolKind::Subroutine,
    SymbolKind::DeclaredFile,
    SymbolKind::Constant,
    SymbolKind::Variable,
    SymbolKind::DataStructure,
    SymbolKind::Enum,
    SymbolKind::ToDo,
];

/// How entries are ordered within a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Declaration order.
    #[default]
    Line,
    /// Case-insensitive name, declaration order for ties.
    Name,
}

/// All listed symbols of one kind.
#[derive(Debug, Serialize)]
pub struct Group<'a> {
    /// Entries in the requested order.
    pub entries: Vec<Entry<'a>>,
    /// Shared kind of every entry.
    pub kind: SymbolKind,
}

/// One top-level symbol in a listing.
#[derive(Debug, Serialize)]
pub struct Entry<'a> {
    /// One-line summary of the declaration.
    pub detail: String,
    /// Data-structure subfields or enum members, empty for other kinds.
    pub members: Vec<MemberRow<'a>>,
    /// The listed symbol.
    pub symbol: &'a Symbol,
}

/// A member shown under its composite.
#[derive(Debug, Serialize)]
pub struct MemberRow<'a> {
    /// Type (subfields) or value (enum members).
    pub detail: &'a str,
    /// Zero-based source line.
    pub line: u32,
    /// Member name.
    pub name: &'a str,
}

/// One-line summary of a symbol's declaration, shared by listings and reports.
pub fn describe(symbol: &Symbol) -> String {
    let base = match symbol {
        Symbol::Constant(c) => c.value.clone(),
        Symbol::DataStructure(ds) => ds.options.clone().unwrap_or_default(),
        Symbol::DeclaredFile(f) if f.file_options.is_empty() => f.file_type.to_string(),
        Symbol::DeclaredFile(f) => format!("{}: {}", f.file_type, f.file_options),
        Symbol::Enum(e) => e.options.clone().unwrap_or_default(),
        Symbol::ItemDs(item) => item.dcl_type.clone(),
        Symbol::ItemEnum(item) => item.value.clone(),
        Symbol::Procedure(p) if p.is_export => "export".to_string(),
        Symbol::Procedure(_) | Symbol::Subroutine(_) => String::new(),
        Symbol::ToDo(t) => t.text.clone(),
        Symbol::Variable(v) => v.dcl_type.clone(),
    };

    let Reach::Procedure(owner) = symbol.reach() else {
        return base;
    };
    if base.is_empty() {
        return format!("(in {owner})");
    }
    return format!("{base} (in {owner})");
}

/// Rows for the members of a composite symbol.
fn member_rows(symbol: &Symbol) -> Vec<MemberRow<'_>> {
    return match symbol {
        Symbol::DataStructure(ds) => ds
            .values
            .iter()
            .map(|item| return MemberRow { detail: &item.dcl_type, line: item.range.start.line, name: &item.name })
            .collect(),
        Symbol::Enum(e) => e
            .values
            .iter()
            .map(|item| return MemberRow { detail: &item.value, line: item.range.start.line, name: &item.name })
            .collect(),
        Symbol::Constant(_)
        | Symbol::DeclaredFile(_)
        | Symbol::ItemDs(_)
        | Symbol::ItemEnum(_)
        | Symbol::Procedure(_)
        | Symbol::Subroutine(_)
        | Symbol::ToDo(_)
        | Symbol::Variable(_) => Vec::new(),
    };
}

/// Sort key for name ordering. To-dos sort by their text.
fn sort_name(symbol: &Symbol) -> String {
    return match symbol {
        Symbol::ToDo(t) => t.text.to_lowercase(),
        other => other.name().unwrap_or_default().to_lowercase(),
    };
}

/// Group the document's symbols by kind. Empty groups are left out.
pub fn listing(document: &Document, order: SortOrder) -> Vec<Group<'_>> {
    return LISTED_KINDS
        .iter()
        .filter_map(|&kind| {
            let mut symbols: Vec<&Symbol> =
                document.symbols().iter().filter(|s| return s.kind() == kind).collect();
            if symbols.is_empty() {
                return None;
            }
            if order == SortOrder::Name {
                symbols.sort_by_cached_key(|s| return sort_name(s));
            }
            let entries = symbols
                .into_iter()
                .map(|symbol| return Entry { detail: describe(symbol), members: member_rows(symbol), symbol })
                .collect();
            return Some(Group { entries, kind });
        })
        .collect();
}

/// Plain-text outline with one-based line numbers.
pub fn render_text(groups: &[Group<'_>]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "{} ({})", group.kind.heading(), group.entries.len());
        for entry in &group.entries {
            let line = entry.symbol.range().start.line.saturating_add(1);
            let name = entry.symbol.name().unwrap_or("-");
            let _ = writeln!(out, "  {line:>5}  {name}  {}", entry.detail);
            for member in &entry.members {
                let member_line = member.line.saturating_add(1);
                let _ = writeln!(out, "  {member_line:>5}    .{}  {}", member.name, member.detail);
            }
        }
    }
    return out;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::scanner::scan;

    const SOURCE: &str = "\
dcl-s zeta int(10);
dcl-s Alpha char(5);
dcl-ds cust qualified;
  id int(10);
  name char(30);
end-ds;
dcl-proc main export;
  dcl-s local int(3); // todo: drop
end-proc;";

    #[test]
    fn groups_skip_member_kinds_and_empty_kinds() {
        let doc = scan(SOURCE);
        let kinds: Vec<SymbolKind> = listing(&doc, SortOrder::Line).iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![SymbolKind::Procedure, SymbolKind::Variable, SymbolKind::DataStructure, SymbolKind::ToDo]
        );
    }

    #[test]
    fn name_order_is_case_insensitive() {
        let doc = scan(SOURCE);
        let groups = listing(&doc, SortOrder::Name);
        let variables = groups.iter().find(|g| g.kind == SymbolKind::Variable).unwrap();
        let names: Vec<&str> = variables.entries.iter().filter_map(|e| e.symbol.name()).collect();
        assert_eq!(names, vec!["Alpha", "local", "zeta"]);
    }

    #[test]
    fn line_order_keeps_declaration_order() {
        let doc = scan(SOURCE);
        let groups = listing(&doc, SortOrder::Line);
        let variables = groups.iter().find(|g| g.kind == SymbolKind::Variable).unwrap();
        let names: Vec<&str> = variables.entries.iter().filter_map(|e| e.symbol.name()).collect();
        assert_eq!(names, vec!["zeta", "Alpha", "local"]);
    }

    #[test]
    fn composites_list_their_members() {
        let doc = scan(SOURCE);
        let groups = listing(&doc, SortOrder::Line);
        let ds = groups.iter().find(|g| g.kind == SymbolKind::DataStructure).unwrap();
        let entry = ds.entries.first().unwrap();
        let members: Vec<(&str, &str)> = entry.members.iter().map(|m| (m.name, m.detail)).collect();
        assert_eq!(members, vec![("id", "int(10)"), ("name", "char(30)")]);
    }

    #[test]
    fn describe_mentions_owning_procedure() {
        let doc = scan(SOURCE);
        let local = doc.symbols().iter().find(|s| s.name() == Some("local")).unwrap();
        assert_eq!(describe(local), "int(3) (in main)");
    }

    #[test]
    fn text_rendering_uses_one_based_lines() {
        let doc = scan("dcl-ds cust;\n  id int(10);\nend-ds;");
        let text = render_text(&listing(&doc, SortOrder::Line));
        assert_eq!(text, "Data structures (1)\n      1  cust  \n      2    .id  int(10)\n");
    }
}
