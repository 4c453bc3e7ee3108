//! Markdown and JSON reports over scanned documents.
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Error;
use crate::navigator::{self, Entry, SortOrder};
use crate::scanner::ScannedFile;
use crate::types::{Document, SymbolKind};

/// Escape text for a markdown table cell.
fn cell(text: &str) -> String {
    return text.replace('|', "\\|");
}

// ── Single document ───────────────────────────────────────────────────

/// Full markdown report: metrics, then one table per symbol kind.
pub fn render_markdown(path: &Path, document: &Document) -> String {
    let metrics = document.metrics();
    let mut out = format!(
        "\
# RPG analysis: {}

## Metrics

| Metric | Count |
|--------|-------|
| Symbols | {} |
| Control blocks | {} |
| To-dos | {} |
",
        path.display(),
        document.symbols().len(),
        metrics.control_blocks,
        metrics.to_dos,
    );

    for group in navigator::listing(document, SortOrder::Line) {
        let _ = write!(
            out,
            "\n## {} ({})\n\n| Line | Name | Details |\n|------|------|---------|\n",
            group.kind.heading(),
            group.entries.len()
        );
        for entry in &group.entries {
            push_entry_rows(&mut out, group.kind, entry);
        }
    }

    return out;
}

/// Table rows for one entry and, for composites, its members as `parent.member`.
fn push_entry_rows(out: &mut String, kind: SymbolKind, entry: &Entry<'_>) {
    let line = entry.symbol.range().start.line.saturating_add(1);
    let name = if kind == SymbolKind::ToDo { "-" } else { entry.symbol.name().unwrap_or("-") };
    let _ = writeln!(out, "| {line} | {} | {} |", cell(name), cell(&entry.detail));

    for member in &entry.members {
        let member_line = member.line.saturating_add(1);
        let _ = writeln!(out, "| {member_line} | {}.{} | {} |", cell(name), cell(member.name), cell(member.detail));
    }
}

/// The whole document as pretty JSON, losslessly.
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
pub fn render_json(document: &Document) -> Result<String, Error> {
    return Ok(serde_json::to_string_pretty(document)?);
}

// ── Project summary ───────────────────────────────────────────────────

/// Per-file counts for the project summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    /// Control-block openers in the file.
    pub control_blocks: u32,
    /// Path relative to the project root.
    pub path: PathBuf,
    /// Symbols emitted for the file, members included.
    pub symbols: usize,
    /// To-do markers in the file.
    pub to_dos: u32,
}

impl SummaryRow {
    /// Counts for one scanned file.
    pub fn new(path: &Path, document: &Document) -> Self {
        let metrics = document.metrics();
        return Self {
            control_blocks: metrics.control_blocks,
            path: path.to_path_buf(),
            symbols: document.symbols().len(),
            to_dos: metrics.to_dos,
        };
    }
}

/// Summary rows for every scanned file, in walk order.
pub fn summary_rows(files: &[ScannedFile]) -> Vec<SummaryRow> {
    return files.iter().map(|f| return SummaryRow::new(&f.path, &f.document)).collect();
}

/// Markdown table of per-file counts with a totals row.
pub fn render_summary(rows: &[SummaryRow]) -> String {
    if rows.is_empty() {
        return "No RPG sources found.\n".to_string();
    }

    let mut out = String::from("| File | Symbols | Control blocks | To-dos |\n|------|---------|----------------|--------|\n");
    let (mut symbols, mut blocks, mut to_dos) = (0_usize, 0_u32, 0_u32);
    for row in rows {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            cell(&row.path.display().to_string()),
            row.symbols,
            row.control_blocks,
            row.to_dos
        );
        symbols = symbols.saturating_add(row.symbols);
        blocks = blocks.saturating_add(row.control_blocks);
        to_dos = to_dos.saturating_add(row.to_dos);
    }
    let _ = writeln!(out, "| **{} files** | {symbols} | {blocks} | {to_dos} |", rows.len());
    return out;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::scanner::scan;

    const SOURCE: &str = "\
dcl-f CUSTDSPF workstn;
dcl-ds cust;
  id int(10);
end-ds;
dcl-proc main export;
  if x = 1; // todo: a|b
  endif;
end-proc;";

    #[test]
    fn markdown_has_metrics_and_sections() {
        let doc = scan(SOURCE);
        let md = render_markdown(Path::new("order.rpgle"), &doc);
        assert!(md.starts_with("# RPG analysis: order.rpgle\n"));
        assert!(md.contains("| Control blocks | 1 |"));
        assert!(md.contains("| To-dos | 1 |"));
        assert!(md.contains("## Procedures (1)"));
        assert!(md.contains("| 5 | main | export |"));
        assert!(md.contains("| 3 | cust.id | int(10) |"));
        assert!(md.contains("| 1 | CUSTDSPF | Display file (DSPF): workstn |"));
        assert!(md.contains("| 6 | - | a\\|b (in main) |"));
    }

    #[test]
    fn json_is_tagged_by_kind() {
        let doc = scan(SOURCE);
        let value: serde_json::Value = serde_json::from_str(&render_json(&doc).unwrap()).unwrap();
        assert_eq!(value["metrics"]["controlBlocks"], 1);
        assert_eq!(value["metrics"]["toDos"], 1);
        assert_eq!(value["symbols"][0]["kind"], "declaredFile");
        assert_eq!(value["symbols"][1]["kind"], "dataStructure");
        assert_eq!(value["symbols"][1]["isTab"], false);
        assert_eq!(value["symbols"][2]["kind"], "itemDS");
        assert_eq!(value["symbols"][2]["reach"]["scopeKind"], "dataStructure");
        assert_eq!(value["symbols"][2]["reach"]["ownerName"], "cust");
        assert_eq!(value["symbols"][3]["reach"], serde_json::json!({ "scopeKind": "global" }));
    }

    #[test]
    fn summary_totals_every_file() {
        let rows = vec![
            SummaryRow::new(Path::new("a.rpgle"), &scan("dcl-s a int(3);\nif a;")),
            SummaryRow::new(Path::new("b.rpgle"), &scan("// todo: b")),
        ];
        assert_eq!(
            render_summary(&rows),
            "\
| File | Symbols | Control blocks | To-dos |
|------|---------|----------------|--------|
| a.rpgle | 1 | 1 | 0 |
| b.rpgle | 1 | 0 | 1 |
| **2 files** | 2 | 1 | 1 |
"
        );
    }

    #[test]
    fn empty_summary_says_so() {
        assert_eq!(render_summary(&[]), "No RPG sources found.\n");
    }
}
