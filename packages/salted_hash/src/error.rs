//! Error handling for salted hash operations

use thiserror::Error;

/// Salted-hash specific errors
#[derive(Debug, Error)]
pub enum SaltedHashError {
    /// The requested hash algorithm is not registered
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A registration would rename an existing algorithm whose lookup key
    /// collides, e.g. `SHA-3256` over `SHA3-256`
    #[error("Algorithm {requested} conflicts with registered {existing}")]
    AlgorithmConflict {
        /// Canonical name already registered
        existing: String,
        /// Name passed to the rejected registration
        requested: String,
    },

    /// A scheme tag is missing its braces or its leading `S`
    #[error("Malformed scheme tag: {0}")]
    MalformedScheme(String),

    /// A token has no `{SCHEME}` region, no payload, or an undecodable payload
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// A `HEX{...}` salt contains invalid hex
    #[error("Malformed salt: {0}")]
    MalformedSalt(String),

    /// The decoded payload is shorter than the expected salt
    #[error("Truncated token: expected at least {expected} salt bytes, got {actual}")]
    TruncatedToken {
        /// Salt length the caller expected
        expected: usize,
        /// Length of the decoded payload
        actual: usize,
    },

    /// Reading clear text from a stream failed
    #[error("I/O error while reading input: {0}")]
    Io(#[from] std::io::Error),
}

impl SaltedHashError {
    /// Create an `UnsupportedAlgorithm` error
    #[must_use]
    pub fn unsupported_algorithm(name: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(name.into())
    }

    /// Create a `MalformedScheme` error
    #[must_use]
    pub fn malformed_scheme(msg: impl Into<String>) -> Self {
        Self::MalformedScheme(msg.into())
    }

    /// Create a `MalformedToken` error
    #[must_use]
    pub fn malformed_token(msg: impl Into<String>) -> Self {
        Self::MalformedToken(msg.into())
    }

    /// Create a `MalformedSalt` error
    #[must_use]
    pub fn malformed_salt(msg: impl Into<String>) -> Self {
        Self::MalformedSalt(msg.into())
    }
}

/// Result type for salted hash operations
pub type Result<T> = std::result::Result<T, SaltedHashError>;
