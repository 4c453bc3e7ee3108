//! Crate-level error types for rpgscan diagnostics.
use std::path::PathBuf;

/// Errors from everything around the scanner. The scanner itself never fails;
/// these come from reading files, loading config, looking symbols up, and
/// rendering output. Each variant names the file, symbol, or reason.
#[allow(clippy::error_impl_error, reason = "crate-level error type")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A source file passed on the command line does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Source file exceeds the configured size limit.
    #[error("file too large ({size_bytes} bytes, max {max_bytes}): {}", file.display())]
    FileTooLarge {
        /// File that exceeded the size limit.
        file: PathBuf,
        /// Maximum allowed file size in bytes.
        max_bytes: u64,
        /// Actual file size in bytes.
        size_bytes: u64,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of a document or listing failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped serde_json error.
        #[from]
        serde_json::Error,
    ),

    /// No symbol with the requested name exists in the file.
    #[error("symbol not found: `{symbol}` in {}", file.display())]
    SymbolNotFound {
        /// File that was searched.
        file: PathBuf,
        /// Zero-based line the lookup was made from.
        line: u32,
        /// Known names close to the requested one.
        suggestions: Vec<String>,
        /// Name that was looked up.
        symbol: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// The filesystem watcher could not be created or attached.
    #[error("watch failed: {reason}")]
    Watch {
        /// Description of the watcher failure.
        reason: String,
    },
}
