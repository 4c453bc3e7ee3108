//! File watcher: scans a source on startup, then rescans when it changes.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::cache::{Lookup, ResultCache};
use crate::config;
use crate::diagnostics;
use crate::error;
use crate::scanner;
use crate::types::Document;

/// Debounce delay between filesystem events and rescan.
const DEBOUNCE_MS: u64 = 100;

/// Create a filesystem watcher that sends events touching `target` on the given channel.
///
/// # Errors
///
/// Returns `Error::Watch` if the watcher cannot be created.
fn create_watcher(
    target: PathBuf,
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, error::Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
            && event.paths.iter().any(|p| return p.file_name() == target.file_name())
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return error::Error::Watch {
            reason: format!("watcher setup failed: {e}"),
        };
    });
}

/// One-line status printed after each scan.
pub fn status_line(path: &Path, document: &Document) -> String {
    let metrics = document.metrics();
    return format!(
        "{}: {} symbols, {} control blocks, {} to-dos",
        path.display(),
        document.symbols().len(),
        metrics.control_blocks,
        metrics.to_dos,
    );
}

/// Entry point for the watch command.
///
/// Scans once, then watches the file's directory and rescans on changes.
/// Unchanged content is served from the cache and prints nothing.
///
/// # Errors
///
/// Returns errors from config loading or watcher setup.
pub fn run(path: &Path) -> Result<ExitCode, error::Error> {
    let config = config::Config::load(Path::new("."))?;
    let mut cache = ResultCache::default();

    eprintln!("watch: initial scan");
    let mut last_code = rescan(&mut cache, path, config.max_file_size);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(path.to_path_buf(), tx)?;
    watcher.watch(&dir, RecursiveMode::NonRecursive).map_err(|e| {
        return error::Error::Watch {
            reason: format!("cannot watch {}: {e}", dir.display()),
        };
    })?;

    eprintln!("watch: monitoring {}, press Ctrl+C to stop", path.display());

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        last_code = rescan(&mut cache, path, config.max_file_size);
    }

    return Ok(last_code);
}

/// Read and scan `path` through the cache, printing the status on a fresh scan.
fn rescan(cache: &mut ResultCache, path: &Path, max_bytes: u64) -> ExitCode {
    let text = match scanner::read_source(path, max_bytes) {
        Ok(text) => text,
        Err(e) => {
            cache.invalidate(path);
            diagnostics::print_error(&e);
            return ExitCode::FAILURE;
        },
    };

    let (document, lookup) = cache.get_or_scan(path, &text);
    match lookup {
        Lookup::Hit => tracing::debug!(path = %path.display(), "content unchanged"),
        Lookup::Miss => println!("{}", status_line(path, &document)),
    }
    return ExitCode::SUCCESS;
}
