//! Custom error types for finvault
//!
//! This module defines the error hierarchy for the storage component using
//! thiserror for ergonomic error definitions.
//!
//! Authentication failures get their own variant, separate from generic
//! decryption failures: a rejected AEAD tag means the data was tampered
//! with, corrupted, or encrypted under a different master key, and callers
//! must be able to tell that apart from a malformed envelope or a missing
//! file. Retrying with the same inputs will deterministically fail again.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for finvault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Master secret missing or empty at initialization
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Encryption-path failure (non-serializable input, cipher setup)
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Generic decryption-path failure (malformed envelope, wrong field lengths)
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// AEAD tag verification failed: tampered data, corruption, or wrong key
    #[error("Authentication failed: data may have been tampered with or the master key is wrong")]
    Authentication,

    /// I/O-layer wrapper; the underlying cause is preserved as the source
    #[error("Storage error at {}: {}", .path.display(), .source)]
    Storage {
        path: PathBuf,
        #[source]
        source: Box<VaultError>,
    },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl VaultError {
    /// Wrap an error with the path of the file operation that failed
    pub fn storage(path: impl Into<PathBuf>, source: VaultError) -> Self {
        Self::Storage {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Check whether this error is an authentication failure, looking
    /// through the storage wrapper
    pub fn is_authentication(&self) -> bool {
        match self {
            Self::Authentication => true,
            Self::Storage { source, .. } => source.is_authentication(),
            _ => false,
        }
    }

    /// Check if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for finvault operations
pub type VaultResult<T> = Result<T, VaultError>;
