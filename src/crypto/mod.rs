//! Cryptographic functions for finvault
//!
//! Provides AES-256-GCM encryption with PBKDF2-HMAC-SHA256 key derivation
//! for at-rest encryption of financial data.

pub mod encryption;
pub mod key_derivation;

pub use encryption::{decrypt, encrypt, Envelope, NONCE_LENGTH, TAG_LENGTH};
pub use key_derivation::{derive_key, DerivedKey, ITERATIONS, KEY_LENGTH, SALT_LENGTH};
