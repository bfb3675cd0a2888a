use rld_types::{Fingerprint, StructureKey};
use thiserror::Error;

use crate::traits::ParseError;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The same key was re-added with different content. The same
    /// `(platform, build id)` must never denote two different layouts;
    /// this is a build-process defect for the caller to act on, and the
    /// stored content is left untouched.
    #[error("structure mismatch for {key}: stored content is {existing}, incoming is {incoming}")]
    StructureMismatch {
        key: StructureKey,
        existing: Fingerprint,
        incoming: Fingerprint,
    },

    /// The key index names a blob the content store does not hold. The
    /// store is recoverable by re-adding the build.
    #[error("key {key} names missing blob {fingerprint}")]
    MissingBlob {
        key: StructureKey,
        fingerprint: Fingerprint,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Digest(#[from] rld_digest::DigestError),

    #[error(transparent)]
    Keymap(#[from] rld_keymap::KeymapError),

    #[error(transparent)]
    Blob(#[from] rld_blob::BlobError),

    #[error(transparent)]
    Superset(#[from] rld_superset::SupersetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
