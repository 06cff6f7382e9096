//! Error types for pwseal

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pwseal
#[derive(Error, Debug)]
pub enum Error {
    // Argument errors
    #[error("Invalid {field} length: expected {expected}, got {got}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    // Bundle errors
    #[error("Malformed bundle: {0}")]
    Format(String),

    #[error("Authentication failed: wrong password or corrupted bundle")]
    Authentication,

    // Primitive errors
    #[error("Random source error: {0}")]
    Random(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong length, non-positive count, empty password, bad range
    Value,
    /// Bundle too short, ciphertext not block aligned, invalid padding
    Format,
    /// Tag verification failed
    Authentication,
    /// Configuration could not be read or is invalid
    Config,
    /// The random source or a cipher primitive failed
    Internal,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidLength { .. } | Error::InvalidValue(_) => ErrorKind::Value,
            Error::Format(_) => ErrorKind::Format,
            Error::Authentication => ErrorKind::Authentication,
            Error::Config(_) | Error::InvalidConfig(_) => ErrorKind::Config,
            Error::Random(_) | Error::Encryption(_) => ErrorKind::Internal,
        }
    }

    /// True if the tag did not verify
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication)
    }

    /// True if a bundle was refused, for either a framing/padding problem or
    /// a failed tag. Callers that must not reveal which check failed should
    /// branch on this instead of on the individual variants.
    pub fn is_rejected_bundle(&self) -> bool {
        matches!(self.kind(), ErrorKind::Format | ErrorKind::Authentication)
    }

    pub(crate) fn length(field: &'static str, expected: usize, got: usize) -> Self {
        Error::InvalidLength {
            field,
            expected,
            got,
        }
    }
}
