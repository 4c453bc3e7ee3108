//! Content versions for the result cache.
use sha2::{Digest as _, Sha256};

/// SHA-256 of a source text as 64 lowercase hex chars.
/// Newtype prevents mixing with arbitrary strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentVersion(
    /// The hex-encoded SHA-256 digest string.
    pub String,
);

/// Hash the exact bytes of `text`. Any edit, whitespace included, is a new version.
pub fn content_version(text: &str) -> ContentVersion {
    let hash = Sha256::digest(text.as_bytes());
    return ContentVersion(format!("{hash:x}"));
}
