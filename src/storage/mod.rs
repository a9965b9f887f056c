//! Storage layer for finvault
//!
//! [`SecureStore`] is the main handle: it owns the master secret and turns
//! payloads into encrypted envelopes and back, in memory or as files on
//! disk. Each call is stateless given the held secret, so a store can be
//! shared freely across threads.

pub mod file_io;

use std::path::Path;

use tracing::{debug, warn};

use crate::config::{MasterSecret, DEFAULT_KEY_VAR};
use crate::crypto::{self, Envelope};
use crate::error::{VaultError, VaultResult};
use crate::payload::Payload;

/// Encrypted storage handle holding the master secret
pub struct SecureStore {
    secret: MasterSecret,
}

impl SecureStore {
    /// Create a store from an explicitly constructed secret
    pub fn new(secret: MasterSecret) -> Self {
        Self { secret }
    }

    /// Create a store with the secret read from a named environment variable
    ///
    /// Fails with [`VaultError::Configuration`] before any cryptographic
    /// work if the variable is unset or empty.
    pub fn from_env(var: &str) -> VaultResult<Self> {
        Ok(Self::new(MasterSecret::from_env(var)?))
    }

    /// Create a store with the secret read from [`DEFAULT_KEY_VAR`]
    pub fn from_default_env() -> VaultResult<Self> {
        Self::from_env(DEFAULT_KEY_VAR)
    }

    /// Encrypt a payload into an authenticated envelope
    pub fn encrypt(&self, payload: &Payload) -> VaultResult<Envelope> {
        let plaintext = payload.to_plaintext()?;
        crypto::encrypt(&plaintext, &self.secret)
    }

    /// Decrypt an envelope back into a payload
    ///
    /// A rejected authentication tag fails with
    /// [`VaultError::Authentication`]; that outcome is terminal for the
    /// given envelope and key, never worth retrying.
    pub fn decrypt(&self, envelope: &Envelope) -> VaultResult<Payload> {
        let plaintext = crypto::decrypt(envelope, &self.secret).map_err(|e| {
            if e.is_authentication() {
                warn!("envelope rejected: authentication tag did not verify");
            }
            e
        })?;
        Ok(Payload::from_plaintext(plaintext))
    }

    /// Encrypt a payload and persist the envelope at `path`
    ///
    /// The write is atomic (temp file then rename); an existing file at
    /// `path` is overwritten. Failures are reported as
    /// [`VaultError::Storage`] with the underlying cause preserved.
    pub fn store<P: AsRef<Path>>(&self, payload: &Payload, path: P) -> VaultResult<()> {
        let path = path.as_ref();
        let envelope = self
            .encrypt(payload)
            .map_err(|e| VaultError::storage(path, e))?;
        file_io::write_json_atomic(path, &envelope).map_err(|e| VaultError::storage(path, e))?;
        debug!(path = %path.display(), "stored encrypted record");
        Ok(())
    }

    /// Load the envelope at `path` and decrypt it
    ///
    /// Failures are reported as [`VaultError::Storage`]; use
    /// [`VaultError::is_authentication`] to distinguish tampered or
    /// wrong-key files from missing or malformed ones.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> VaultResult<Payload> {
        let path = path.as_ref();
        let envelope: Envelope =
            file_io::read_json(path).map_err(|e| VaultError::storage(path, e))?;
        let payload = self
            .decrypt(&envelope)
            .map_err(|e| VaultError::storage(path, e))?;
        debug!(path = %path.display(), "loaded encrypted record");
        Ok(payload)
    }
}
