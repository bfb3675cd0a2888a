use thiserror::Error;

/// Errors from key-index operations.
#[derive(Debug, Error)]
pub enum KeymapError {
    /// A persisted index line could not be parsed. Malformed lines are
    /// errors, not skips: a damaged index must not silently lose entries.
    #[error("malformed keymap line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for key-index operations.
pub type KeymapResult<T> = Result<T, KeymapError>;
