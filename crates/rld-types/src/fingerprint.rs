//! Content fingerprints: opaque deterministic identifiers for blob bytes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A deterministic content-derived identifier for one structure blob.
///
/// The digest layer produces these from blob bytes; two blobs with equal
/// bytes always carry equal fingerprints, which is what the store's
/// deduplication and mismatch detection are built on. The string itself is
/// opaque; the only guarantees are determinism and stability across runs.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap an already-trusted fingerprint string.
    ///
    /// Intended for the digest layer, whose hex output is valid by
    /// construction. Text from an external source goes through [`parse`]
    /// instead.
    ///
    /// [`parse`]: Fingerprint::parse
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse and validate a fingerprint read from persisted text.
    ///
    /// Fingerprints appear in key-index lines and file names, so whitespace
    /// and path separators are rejected.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        if value.is_empty() {
            return Err(TypeError::InvalidFingerprint {
                value: value.to_string(),
                reason: "must not be empty".into(),
            });
        }
        if value.contains(|c: char| c.is_whitespace() || c == '/' || c == '\\') {
            return Err(TypeError::InvalidFingerprint {
                value: value.to_string(),
                reason: "contains whitespace or a path separator".into(),
            });
        }
        Ok(Self(value.to_string()))
    }

    /// The fingerprint as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for log output.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(8);
        &self.0[..end]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}
