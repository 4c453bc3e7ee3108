//! Single-pass scanner: source text in, scope-annotated [`Document`] out.
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::block::{self, Block};
use crate::builder::{self, line_range};
use crate::config::Config;
use crate::error::Error;
use crate::matchers;
use crate::scope::Scope;
use crate::splitter::{SplitLine, split_line};
use crate::types::{Document, Symbol};

/// State threaded through the line fold. Owned and replaced on every step,
/// never shared between scans.
#[derive(Debug, Default)]
struct ScanState {
    /// Closing-marker index of the block whose body lines are being skipped.
    body_until: Option<usize>,
    /// Lines that opened a conditional or loop.
    control_blocks: u32,
    /// Name of the `begsr` still waiting for its `endsr`.
    open_subroutine: Option<String>,
    /// Current procedure scope.
    scope: Scope,
    /// Symbols emitted so far.
    symbols: Vec<Symbol>,
}

impl ScanState {
    /// Remember a terminated block so its body is not scanned twice.
    /// An unterminated body stops at the next top-level declaration and does
    /// not hide later lines.
    fn claim_body(mut self, body: &Block<'_>, keyword: &str, name: &str) -> Self {
        match body.close {
            Some(close) => self.body_until = Some(close),
            None => tracing::debug!(%keyword, %name, "block has no closing marker before the next declaration"),
        }
        return self;
    }

    /// Run every declaration matcher against the code portion of line `index`.
    fn declarations(mut self, lines: &[&str], index: usize, code: &str) -> Self {
        let range = line_range(index, code);

        if let Some(open) = matchers::procedure_open(code) {
            self.symbols.push(builder::procedure(open, range));
            self.scope = self.scope.open_procedure(open.name, index);
        }
        if matchers::procedure_close(code) {
            self.scope = self.scope.close_procedure(index);
        }

        if let Some(name) = matchers::subroutine_open(code) {
            if let Some(open) = &self.open_subroutine {
                tracing::warn!(line = index.saturating_add(1), open = %open, next = %name, "begsr before endsr");
            }
            self.symbols.push(builder::subroutine(name, range, self.scope.reach()));
            self.open_subroutine = Some(name.to_string());
        }
        if matchers::subroutine_close(code) {
            self.open_subroutine = None;
        }

        if let Some(decl) = matchers::constant(code) {
            self.symbols.push(builder::constant(decl, range, self.scope.reach()));
        }
        if let Some(decl) = matchers::variable(code) {
            self.symbols.push(builder::variable(decl, range, self.scope.reach()));
        }

        if let Some(decl) = matchers::data_structure_open(code) {
            let self_contained = decl.rest.is_some_and(|rest| {
                return matchers::borrows_layout(rest) || matchers::closes_inline(rest);
            });
            let body = if self_contained {
                Block { close: None, lines: Vec::new() }
            } else {
                let body = block::extract_block(lines, index, matchers::data_structure_close);
                self = self.claim_body(&body, "dcl-ds", decl.name);
                body
            };
            let reach = self.scope.reach();
            self.symbols.extend(builder::data_structure(decl, &body, range, reach));
        }

        if let Some(decl) = matchers::enum_open(code) {
            let body = block::extract_block(lines, index, matchers::enum_close);
            self = self.claim_body(&body, "dcl-enum", decl.name);
            let reach = self.scope.reach();
            self.symbols.extend(builder::enumeration(decl, &body, range, reach));
        }

        if let Some(decl) = matchers::declared_file(code) {
            self.symbols.push(builder::declared_file(decl, range, self.scope.reach()));
        }

        if matchers::control_block(code) {
            self.control_blocks = self.control_blocks.saturating_add(1);
        }
        return self;
    }

    /// Process line `index`. Body lines of a terminated block only have their
    /// comment inspected; every other line goes through all matchers.
    fn step(mut self, lines: &[&str], index: usize) -> Self {
        let Some(raw) = lines.get(index) else {
            return self;
        };
        let SplitLine { code, comment } = split_line(raw);

        let in_body = self.body_until.is_some_and(|close| return index < close);
        if !in_body {
            self = self.declarations(lines, index, code);
        }

        if let Some(text) = matchers::to_do(comment) {
            let symbol = builder::to_do(text, line_range(index, comment), self.scope.reach());
            self.symbols.push(symbol);
        }
        return self;
    }
}

/// Split on `\n`, dropping one trailing `\r` per line.
fn source_lines(text: &str) -> Vec<&str> {
    return text
        .split('\n')
        .map(|line| return line.strip_suffix('\r').unwrap_or(line))
        .collect();
}

/// Scan free-format RPG source into a symbol table.
///
/// Never fails: lines no matcher recognizes contribute nothing. Identical
/// input always yields an identical document.
pub fn scan(text: &str) -> Document {
    let lines = source_lines(text);
    let state = (0..lines.len()).fold(ScanState::default(), |state, index| {
        return state.step(&lines, index);
    });

    tracing::debug!(
        lines = lines.len(),
        symbols = state.symbols.len(),
        control_blocks = state.control_blocks,
        "scanned source"
    );
    return Document::new(state.symbols, state.control_blocks);
}

/// A scanned file from a project walk.
#[derive(Debug)]
pub struct ScannedFile {
    /// Symbol table of the file.
    pub document: Document,
    /// Path relative to the walk root.
    pub path: PathBuf,
}

/// Read a source file, refusing files over `max_bytes`. Invalid UTF-8 is
/// replaced, not rejected.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if the file does not exist,
/// `Error::FileTooLarge` if it exceeds `max_bytes`,
/// or `Error::Io` for other read failures.
pub fn read_source(path: &Path, max_bytes: u64) -> Result<String, Error> {
    let bytes = match std::fs::read(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound { path: path.to_path_buf() });
        },
        Err(e) => return Err(Error::Io(e)),
        Ok(b) => b,
    };

    let size_bytes: u64 = bytes.len().try_into().unwrap_or(u64::MAX);
    if size_bytes > max_bytes {
        return Err(Error::FileTooLarge {
            file: path.to_path_buf(),
            max_bytes,
            size_bytes,
        });
    }

    return Ok(String::from_utf8_lossy(&bytes).into_owned());
}

/// Read and scan one source file.
///
/// # Errors
///
/// Returns the errors of [`read_source`].
pub fn scan_file(path: &Path, max_bytes: u64) -> Result<Document, Error> {
    return Ok(scan(&read_source(path, max_bytes)?));
}

/// Scan every RPG source under `root` accepted by `config`, in path order.
///
/// # Errors
///
/// Returns the first error from reading a matched file.
pub fn scan_tree(root: &Path, config: &Config) -> Result<Vec<ScannedFile>, Error> {
    let mut scanned = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| return e.file_type().is_file())
    {
        let full_path = entry.path();
        let relative = full_path.strip_prefix(root).unwrap_or(full_path).to_path_buf();
        if !config.is_source(&relative) {
            continue;
        }

        tracing::debug!(path = %relative.display(), "scanning");
        let document = scan_file(full_path, config.max_file_size)?;
        scanned.push(ScannedFile { document, path: relative });
    }

    return Ok(scanned);
}
