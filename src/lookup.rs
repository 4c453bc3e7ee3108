//! Name lookup from a source position, preferring the innermost visible declaration.
use std::path::Path;

use crate::error::Error;
use crate::types::{Document, Position, Reach, Symbol};

/// Most suggestions attached to a not-found error.
const MAX_SUGGESTIONS: usize = 5;

/// Largest edit distance at which a name still counts as a near miss.
const MAX_EDIT_DISTANCE: usize = 2;

/// Procedure whose body contains `line`: the last one declared at or before it.
/// Free-format RPG places every global declaration ahead of the first
/// procedure, so nothing after a `dcl-proc` is global again.
pub fn enclosing_procedure(document: &Document, line: u32) -> Option<&str> {
    return document
        .symbols()
        .iter()
        .rev()
        .find_map(|s| match s {
            Symbol::Procedure(p) if p.range.start.line <= line => Some(p.name.as_str()),
            _ => None,
        });
}

/// Find the declaration `name` refers to when written at `position`.
///
/// Names compare case-insensitively, as RPG does. Among matches, a symbol
/// owned by the enclosing procedure wins, then a global one, then the first.
pub fn find<'a>(document: &'a Document, name: &str, position: Position) -> Option<&'a Symbol> {
    let candidates: Vec<&Symbol> = document
        .symbols()
        .iter()
        .filter(|s| return s.name().is_some_and(|n| return n.eq_ignore_ascii_case(name)))
        .collect();

    let local = enclosing_procedure(document, position.line).and_then(|proc| {
        return candidates.iter().copied().find(|s| {
            return matches!(s.reach(), Reach::Procedure(owner) if owner.eq_ignore_ascii_case(proc));
        });
    });

    return local
        .or_else(|| return candidates.iter().copied().find(|s| return *s.reach() == Reach::Global))
        .or_else(|| return candidates.first().copied());
}

/// Resolve `name` at `position`, or explain what was available instead.
///
/// # Errors
///
/// Returns `Error::SymbolNotFound` with near-miss suggestions when no
/// declaration carries the name.
pub fn resolve<'a>(
    file: &Path,
    document: &'a Document,
    name: &str,
    position: Position,
) -> Result<&'a Symbol, Error> {
    return find(document, name, position).ok_or_else(|| {
        return Error::SymbolNotFound {
            file: file.to_path_buf(),
            line: position.line,
            suggestions: suggestions(document, name),
            symbol: name.to_string(),
        };
    });
}

/// Declared names close to `name`, nearest first.
pub fn suggestions(document: &Document, name: &str) -> Vec<String> {
    let wanted = name.to_lowercase();
    let mut scored: Vec<(usize, &str)> = document
        .symbols()
        .iter()
        .filter_map(Symbol::name)
        .filter_map(|candidate| {
            let lowered = candidate.to_lowercase();
            let distance = strsim::levenshtein(&wanted, &lowered);
            let related = lowered.contains(&wanted) || wanted.contains(&lowered);
            return (related || distance <= MAX_EDIT_DISTANCE).then_some((distance, candidate));
        })
        .collect();

    scored.sort_unstable();
    scored.dedup_by(|a, b| return a.1.eq_ignore_ascii_case(b.1));
    return scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| return candidate.to_string())
        .collect();
}
