//! Content fingerprinting for the Runtime Layout Database.
//!
//! Every structure blob ingested by the store is fingerprinted here. The
//! fingerprint is a domain-separated BLAKE3 hash in lowercase hex: equal
//! bytes always produce equal fingerprints, across processes and platforms,
//! which is the foundation of the store's deduplication and its "one key,
//! one layout" guarantee.
//!
//! One content-dependent transform happens before hashing: structure text
//! written by legacy hosts arrives in an 8-bit EBCDIC encoding, detected by
//! a two-byte marker at the start of the blob (the `S|` header sentinel in
//! that encoding). See [`fingerprint`] and [`normalize`] for how the marker
//! interacts with hashing and physical storage.

mod encoding;
mod fingerprint;

pub use encoding::{transcode_legacy, BlobFormat, LEGACY_MARKER};
pub use fingerprint::{fingerprint, normalize};

use thiserror::Error;

/// Errors from fingerprinting and legacy-text transcoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DigestError {
    /// A byte in a legacy-encoded text blob has no mapping in the legacy
    /// text encoding. Structure text is plain text; anything else under a
    /// text marker is corruption, and it is never silently skipped.
    #[error("legacy text transcoding failed: byte 0x{value:02X} at offset {offset} has no mapping")]
    Unmappable { offset: usize, value: u8 },
}

/// Result alias for digest operations.
pub type DigestResult<T> = Result<T, DigestError>;
