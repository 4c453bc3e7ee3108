use std::fmt::Write as _;
use std::path::Path;

use crate::config::CONFIG_FILE;
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where the user can
/// act on it, how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::FileNotFound { path } => render_file_not_found(path),
        Error::FileTooLarge { file, size_bytes, max_bytes } => render_file_too_large(file, *size_bytes, *max_bytes),
        Error::SymbolNotFound { file, line, suggestions, symbol } => {
            render_symbol_not_found(file, *line, symbol, suggestions)
        },
        Error::TomlDe(inner) => render_invalid_config(inner),
        Error::Watch { reason } => render_watch_failed(reason),
        _ => render_generic(e),
    }
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::Json(e) => format!("\
# Error: JSON Serialization

{e}
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_file_not_found(path: &Path) -> String {
    format!("\
# Error: File Not Found

`{}` does not exist.

## Fix

Paths are relative to the directory rpgscan runs in.
", path.display())
}

fn render_file_too_large(file: &Path, size_bytes: u64, max_bytes: u64) -> String {
    format!("\
# Error: File Too Large

`{}` is {size_bytes} bytes (max {max_bytes}).

## Fix

Raise the limit in `{CONFIG_FILE}`:

    max_file_size = {size_bytes}
", file.display())
}

fn render_symbol_not_found(file: &Path, line: u32, symbol: &str, suggestions: &[String]) -> String {
    let mut out = format!("\
# Error: Symbol Not Found

No declaration of `{symbol}` is visible from line {} of `{}`.
", line.saturating_add(1), file.display());

    let best = find_closest_suggestion(symbol, suggestions);

    if let Some(suggestion) = &best {
        let _ = write!(out, "\n## Did you mean `{suggestion}`?\n\n");
        let _ = writeln!(out, "    rpgscan lookup {} {suggestion} --line {}", file.display(), line.saturating_add(1));
    } else if !suggestions.is_empty() {
        out.push_str("\n## Similar names\n\n");
        for s in suggestions {
            let _ = writeln!(out, "- `{s}`");
        }
    }

    out
}

/// The suggestion to offer as a direct replacement: one that differs from
/// `symbol` only in case, otherwise the nearest one when it is the only match.
pub(crate) fn find_closest_suggestion(symbol: &str, suggestions: &[String]) -> Option<String> {
    if let Some(same) = suggestions.iter().find(|s| s.eq_ignore_ascii_case(symbol)) {
        return Some(same.clone());
    }
    match suggestions {
        [only] => Some(only.clone()),
        _ => None,
    }
}

fn render_invalid_config(inner: &toml::de::Error) -> String {
    format!("\
# Error: Invalid Config

`{CONFIG_FILE}` could not be parsed:

{inner}

## Fix

Recognized keys are `include`, `exclude`, `extensions`, and `max_file_size`.
")
}

fn render_watch_failed(reason: &str) -> String {
    format!("\
# Error: Watch Failed

{reason}
")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn not_found(suggestions: &[&str]) -> Error {
        Error::SymbolNotFound {
            file: PathBuf::from("order.rpgle"),
            line: 9,
            suggestions: suggestions.iter().map(|s| (*s).to_string()).collect(),
            symbol: "totl".to_string(),
        }
    }

    #[test]
    fn single_suggestion_is_offered_as_fix() {
        let md = render_error(&not_found(&["total"]));
        assert!(md.starts_with("# Error: Symbol Not Found\n"));
        assert!(md.contains("visible from line 10 of `order.rpgle`"));
        assert!(md.contains("## Did you mean `total`?"));
        assert!(md.contains("rpgscan lookup order.rpgle total --line 10"));
    }

    #[test]
    fn several_suggestions_are_listed() {
        let md = render_error(&not_found(&["total", "totals"]));
        assert!(!md.contains("Did you mean"));
        assert!(md.contains("## Similar names\n\n- `total`\n- `totals`\n"));
    }

    #[test]
    fn case_only_difference_wins() {
        let suggestions = vec!["TOTL".to_string(), "total".to_string()];
        assert_eq!(find_closest_suggestion("totl", &suggestions), Some("TOTL".to_string()));
        assert_eq!(find_closest_suggestion("x", &[]), None);
    }

    #[test]
    fn too_large_points_at_config() {
        let md = render_error(&Error::FileTooLarge {
            file: PathBuf::from("big.rpgle"),
            max_bytes: 10,
            size_bytes: 20,
        });
        assert!(md.contains("`big.rpgle` is 20 bytes (max 10)."));
        assert!(md.contains("max_file_size = 20"));
    }

    #[test]
    fn invalid_config_names_the_file() {
        let Err(inner) = toml::from_str::<toml::Table>("include = [") else {
            panic!("expected a parse error");
        };
        let md = render_error(&Error::TomlDe(inner));
        assert!(md.starts_with("# Error: Invalid Config\n"));
        assert!(md.contains("`.rpgscan.toml` could not be parsed"));
    }

    #[test]
    fn missing_file_heading() {
        let md = render_error(&Error::FileNotFound { path: PathBuf::from("gone.rpgle") });
        assert!(md.starts_with("# Error: File Not Found\n\n`gone.rpgle` does not exist.\n"));
    }
}
