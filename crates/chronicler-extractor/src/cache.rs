//! Fingerprint-keyed cache of extraction results

use chronicler_domain::TopicRecord;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;

/// Deterministic digest of a document's content prefix, used as cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the fingerprint of a document: SHA-256 over the first
/// `prefix_chars` characters of the normalized text, hex-encoded.
///
/// Hashing only a prefix trades a small risk of distinct documents with an
/// identical opening colliding for speed on large articles. This is an
/// accepted policy, not a correctness guarantee: two different articles
/// sharing their first `prefix_chars` characters map to one cache entry.
pub fn fingerprint(text: &str, prefix_chars: usize) -> Fingerprint {
    let end = text
        .char_indices()
        .nth(prefix_chars)
        .map(|(index, _)| index)
        .unwrap_or(text.len());

    let digest = Sha256::digest(text[..end].as_bytes());
    let hex = digest.iter().fold(String::with_capacity(64), |mut acc, b| {
        use fmt::Write;
        let _ = write!(acc, "{:02x}", b);
        acc
    });
    Fingerprint(hex)
}

/// In-process cache mapping content fingerprints to extracted records.
///
/// Owned exclusively by the extractor instance. Entries live for the process
/// lifetime: no eviction and no persistence across restarts. Unbounded
/// growth is accepted at this design's scale.
#[derive(Debug, Default)]
pub struct ExtractionCache {
    entries: HashMap<Fingerprint, TopicRecord>,
}

impl ExtractionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously extracted record.
    pub fn lookup(&self, fingerprint: &Fingerprint) -> Option<&TopicRecord> {
        self.entries.get(fingerprint)
    }

    /// Store an extracted record under its content fingerprint.
    pub fn store(&mut self, fingerprint: Fingerprint, record: TopicRecord) {
        self.entries.insert(fingerprint, record);
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
