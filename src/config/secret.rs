//! Master secret handling
//!
//! The master secret is a UTF-8 string supplied once at process start
//! through a named environment variable. It is never persisted, never
//! logged, and never written to disk; per-operation encryption keys are
//! derived from it on demand.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{VaultError, VaultResult};

/// Default environment variable holding the master secret
pub const DEFAULT_KEY_VAR: &str = "FINVAULT_MASTER_KEY";

/// The long-lived secret that encryption keys are derived from
///
/// Zeroes its contents on drop. Debug and Display output is redacted so
/// the secret cannot leak through logs or error messages.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterSecret {
    inner: String,
}

impl MasterSecret {
    /// Create a master secret from an already-obtained string
    ///
    /// Fails with [`VaultError::Configuration`] if the value is empty.
    pub fn new(secret: impl Into<String>) -> VaultResult<Self> {
        let inner = secret.into();
        if inner.is_empty() {
            return Err(VaultError::Configuration(
                "master secret must not be empty".into(),
            ));
        }
        Ok(Self { inner })
    }

    /// Read the master secret from a named environment variable
    ///
    /// Fails with [`VaultError::Configuration`] if the variable is unset
    /// or empty. No disk or network access is performed.
    pub fn from_env(var: &str) -> VaultResult<Self> {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => Ok(Self { inner: value }),
            _ => Err(VaultError::Configuration(format!(
                "encryption key not found in environment variable: {}",
                var
            ))),
        }
    }

    /// Read the master secret from the default environment variable
    pub fn from_default_env() -> VaultResult<Self> {
        Self::from_env(DEFAULT_KEY_VAR)
    }

    /// Get the secret bytes for key derivation
    pub(crate) fn expose(&self) -> &[u8] {
        self.inner.as_bytes()
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterSecret")
            .field("len", &self.inner.len())
            .finish()
    }
}

// Don't print the contents in Display output
impl fmt::Display for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}
