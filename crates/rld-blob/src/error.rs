use std::path::PathBuf;

use thiserror::Error;

/// Errors from content-store and container operations.
#[derive(Debug, Error)]
pub enum BlobError {
    /// A second write was attempted at an occupied address. Unreachable
    /// under the facade's insertion protocol; reaching it means the store
    /// directory is inconsistent.
    #[error("container already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// The container does not start with the expected magic bytes.
    #[error("invalid container magic: expected \"RLDC\", got {actual:?}")]
    InvalidMagic { actual: String },

    /// The container was written by an unknown format version.
    #[error("unsupported container version: {0}")]
    UnsupportedVersion(u32),

    /// The whole-file BLAKE3 trailer does not match.
    #[error("container checksum mismatch")]
    ChecksumMismatch,

    /// The CRC32 over the compressed payload does not match.
    #[error("container payload CRC32 mismatch")]
    CrcMismatch,

    /// Structurally invalid container data.
    #[error("corrupt container: {reason}")]
    Corrupt { reason: String },

    /// The container's entry name does not match its address.
    #[error("container entry name mismatch: expected {expected}, got {actual}")]
    EntryMismatch { expected: String, actual: String },

    #[error("compression failed: {0}")]
    Compression(String),

    #[error("decompression failed: {0}")]
    Decompression(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for blob operations.
pub type BlobResult<T> = Result<T, BlobError>;
