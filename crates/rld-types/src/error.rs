use thiserror::Error;

/// Errors produced by type construction and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A structure key component failed validation.
    #[error("invalid {component} {value:?} in structure key: {reason}")]
    InvalidKey {
        component: &'static str,
        value: String,
        reason: String,
    },

    /// A canonical key string could not be split into platform and build id.
    #[error("malformed structure key {0:?}: expected <platform>.<buildId>")]
    MalformedKey(String),

    /// A fingerprint string failed validation.
    #[error("invalid fingerprint {value:?}: {reason}")]
    InvalidFingerprint { value: String, reason: String },
}
