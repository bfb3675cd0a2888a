use thiserror::Error;

/// Errors from superset document operations.
#[derive(Debug, Error)]
pub enum SupersetError {
    /// The persisted document is structurally invalid.
    #[error("corrupt superset document at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for superset operations.
pub type SupersetResult<T> = Result<T, SupersetError>;
