//! CLI commands for rpgscan: symbols, report, lookup, summary.

use std::path::Path;
use std::process::ExitCode;

use crate::config;
use crate::error;
use crate::lookup;
use crate::navigator::{self, SortOrder};
use crate::report;
use crate::scanner;
use crate::types::{Document, Position};

/// Scan one file using the size limit from the project config.
///
/// # Errors
///
/// Returns errors from config loading or reading the file.
fn scan_path(path: &Path) -> Result<Document, error::Error> {
    let config = config::Config::load(Path::new("."))?;
    return scanner::scan_file(path, config.max_file_size);
}

/// Print the grouped outline of a file, or its full symbol list as JSON.
///
/// # Errors
///
/// Returns errors from scanning or JSON serialization.
pub fn symbols(path: &Path, order: SortOrder, json: bool) -> Result<ExitCode, error::Error> {
    let document = scan_path(path)?;
    let groups = navigator::listing(&document, order);

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else if groups.is_empty() {
        println!("No symbols in {}", path.display());
    } else {
        print!("{}", navigator::render_text(&groups));
    }
    return Ok(ExitCode::SUCCESS);
}

/// Print the markdown report for a file, or the raw document as JSON.
///
/// # Errors
///
/// Returns errors from scanning or JSON serialization.
pub fn report(path: &Path, json: bool) -> Result<ExitCode, error::Error> {
    let document = scan_path(path)?;
    if json {
        println!("{}", report::render_json(&document)?);
    } else {
        print!("{}", report::render_markdown(path, &document));
    }
    return Ok(ExitCode::SUCCESS);
}

/// Print the declaration `name` refers to when written on one-based `line`.
/// Lines and columns in the output are one-based; the end column is exclusive.
///
/// # Errors
///
/// Returns `Error::SymbolNotFound` when nothing carries the name,
/// or errors from scanning.
pub fn lookup(path: &Path, name: &str, line: u32) -> Result<ExitCode, error::Error> {
    let document = scan_path(path)?;
    let position = Position { character: 0, line: line.saturating_sub(1) };
    let symbol = lookup::resolve(path, &document, name, position)?;

    let declared = symbol.range().start.line.saturating_add(1);
    let shown = symbol.name().unwrap_or(name);
    println!("{}:{declared}  {} {shown}", path.display(), symbol.kind());
    let detail = navigator::describe(symbol);
    if !detail.is_empty() {
        println!("  {detail}");
    }
    let range = symbol.range();
    println!(
        "  range: {}:{}-{}:{}",
        range.start.line.saturating_add(1),
        range.start.character.saturating_add(1),
        range.end.line.saturating_add(1),
        range.end.character.saturating_add(1),
    );
    println!("  reach: {}", symbol.reach());
    return Ok(ExitCode::SUCCESS);
}

/// Scan every RPG source under the current directory and print per-file counts.
///
/// # Errors
///
/// Returns errors from config loading, reading a source, or JSON serialization.
pub fn summary(json: bool) -> Result<ExitCode, error::Error> {
    let root = Path::new(".");
    let config = config::Config::load(root)?;
    let files = scanner::scan_tree(root, &config)?;
    let rows = report::summary_rows(&files);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", report::render_summary(&rows));
    }
    return Ok(ExitCode::SUCCESS);
}
