//! Project configuration loaded from `.rpgscan.toml`.
use std::path::Path;

use crate::error::Error;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE: &str = ".rpgscan.toml";

/// Largest source file the scanner will read (16 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Extensions treated as free-format RPG source when none are configured.
const DEFAULT_EXTENSIONS: [&str; 3] = ["rpgle", "sqlrpgle", "rpginc"];

/// Which files a project walk scans, and how large they may be.
/// Include/exclude patterns are path prefixes relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path prefixes skipped even when included.
    exclude: Vec<String>,
    /// Lowercase extensions, without the dot, that mark RPG sources.
    extensions: Vec<String>,
    /// Path prefixes to scan; empty means everything.
    include: Vec<String>,
    /// Size limit passed to the scanner for each file.
    pub max_file_size: u64,
}

/// Raw TOML structure for `.rpgscan.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RpgscanTomlConfig {
    /// See [`Config::exclude`].
    #[serde(default)]
    exclude: Vec<String>,
    /// See [`Config::extensions`].
    #[serde(default)]
    extensions: Vec<String>,
    /// See [`Config::include`].
    #[serde(default)]
    include: Vec<String>,
    /// See [`Config::max_file_size`].
    max_file_size: Option<u64>,
}

impl Default for Config {
    /// Scan every RPG source, exclude nothing.
    fn default() -> Self {
        return Self {
            exclude: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| return (*e).to_string()).collect(),
            include: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        };
    }
}

impl Config {
    /// Load config from `.rpgscan.toml` in the given root directory.
    /// Returns the default if the file doesn't exist. A file that exists but
    /// is malformed is an error, never a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Self::parse(&content);
    }

    /// Parse TOML config text.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: RpgscanTomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let extensions = if raw.extensions.is_empty() {
            defaults.extensions
        } else {
            raw.extensions
                .iter()
                .map(|e| return e.trim_start_matches('.').to_lowercase())
                .collect()
        };

        return Ok(Self {
            exclude: raw.exclude,
            extensions,
            include: raw.include,
            max_file_size: raw.max_file_size.unwrap_or(defaults.max_file_size),
        });
    }

    /// True when `relative_path` has an RPG extension and passes the filters.
    pub fn is_source(&self, relative_path: &Path) -> bool {
        let has_extension = relative_path
            .extension()
            .and_then(|e| return e.to_str())
            .is_some_and(|ext| return self.extensions.iter().any(|known| return known.eq_ignore_ascii_case(ext)));

        return has_extension && self.should_scan(&relative_path.to_string_lossy());
    }

    /// Check whether a path passes the include/exclude filters.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}
