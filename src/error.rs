//! Error handling for lexicon loading
//!
//! Only load-time conditions are errors. Query-time misses (unknown lemma,
//! unknown synset id, unreachable pair) are modelled as empty results and
//! never surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias for fallible lexicon operations
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Main error type for lexicon loading and packing
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(#[from] EnvelopeError),

    #[error("Invalid lexicon document: {message}")]
    InvalidDocument { message: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Pack verification failed: {message}")]
    Verification { message: String },
}

impl LexiconError {
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    pub fn verification(message: impl Into<String>) -> Self {
        Self::Verification {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for LexiconError {
    fn from(error: serde_json::Error) -> Self {
        Self::invalid_document(error.to_string())
    }
}

impl From<std::str::Utf8Error> for LexiconError {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::invalid_document(format!("payload is not valid UTF-8: {}", error))
    }
}

/// Framing errors from the `BNWN1` envelope header
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("Truncated header: need at least {required} bytes, found {found}")]
    Truncated { required: usize, found: usize },

    #[error("Declared payload length {declared} exceeds the {available} bytes available")]
    LengthOutOfRange { declared: usize, available: usize },

    #[error("Missing envelope magic: expected {expected:?}, found {found:?}")]
    MissingMagic { expected: String, found: String },

    #[error("Declared payload length {declared} does not match the {actual} trailing bytes")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("Payload of {size} bytes does not fit a 32-bit length prefix")]
    PayloadTooLarge { size: usize },
}
