//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives per-operation encryption keys from the master secret and a
//! random salt. The parameters are fixed: changing any of them would make
//! existing stored envelopes undecryptable, since the envelope format
//! carries no algorithm identifier.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::MasterSecret;

/// Size of the derived key in bytes (256 bits for AES-256)
pub const KEY_LENGTH: usize = 32;

/// Size of the key-derivation salt in bytes
pub const SALT_LENGTH: usize = 16;

/// PBKDF2 iteration count
pub const ITERATIONS: u32 = 100_000;

/// A derived encryption key
///
/// Ephemeral: recomputed for every encrypt/decrypt call and zeroed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

/// Derive an encryption key from the master secret and a salt
///
/// Deterministic: the same (secret, salt) pair always yields the same key,
/// which is what makes stored envelopes decryptable later.
pub fn derive_key(secret: &MasterSecret, salt: &[u8; SALT_LENGTH]) -> DerivedKey {
    let mut key = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(secret.expose(), salt, ITERATIONS, &mut key);
    DerivedKey { key }
}
