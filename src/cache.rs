//! Memoized scan results keyed by source identity and content version.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::hasher::{ContentVersion, content_version};
use crate::scanner;
use crate::types::Document;

/// Latest document for one source identity.
#[derive(Debug)]
struct CacheEntry {
    /// The scan result for `version`.
    document: Arc<Document>,
    /// Content hash the document was built from.
    version: ContentVersion,
}

/// Whether [`ResultCache::get_or_scan`] had to rescan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The stored document matched the version.
    Hit,
    /// The source was scanned and the entry replaced.
    Miss,
}

/// Holds the most recent [`Document`] per source path. An entry is only
/// served while its content version matches; any change forces a rescan.
#[derive(Debug, Default)]
pub struct ResultCache {
    /// Entries by source identity.
    entries: HashMap<PathBuf, CacheEntry>,
}

impl ResultCache {
    /// Cached document for `identity` at exactly `version`, if any.
    pub fn get(&self, identity: &Path, version: &ContentVersion) -> Option<Arc<Document>> {
        return self
            .entries
            .get(identity)
            .filter(|entry| return entry.version == *version)
            .map(|entry| return Arc::clone(&entry.document));
    }

    /// Return the document for `text`, scanning only when the stored entry
    /// for `identity` is missing or was built from different content.
    pub fn get_or_scan(&mut self, identity: &Path, text: &str) -> (Arc<Document>, Lookup) {
        let version = content_version(text);
        if let Some(document) = self.get(identity, &version) {
            tracing::debug!(path = %identity.display(), "scan cache hit");
            return (document, Lookup::Hit);
        }

        tracing::debug!(path = %identity.display(), version = %version.0, "scan cache miss");
        let document = Arc::new(scanner::scan(text));
        self.entries.insert(
            identity.to_path_buf(),
            CacheEntry { document: Arc::clone(&document), version },
        );
        return (document, Lookup::Miss);
    }

    /// Drop the entry for `identity`. Returns whether one existed.
    pub fn invalidate(&mut self, identity: &Path) -> bool {
        return self.entries.remove(identity).is_some();
    }

    /// Number of cached sources.
    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}
