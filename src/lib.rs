//! finvault - Encrypted local storage for sensitive financial data
//!
//! This library turns application data into authenticated, tamper-evident
//! ciphertext envelopes and back, using keys derived from a single master
//! secret. It is the persistence layer for financial-assistant data that
//! must never touch disk in the clear.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Master secret sourcing and path management
//! - `error`: Custom error types
//! - `crypto`: PBKDF2 key derivation and AES-256-GCM envelopes
//! - `payload`: The tagged payload type crossing the encryption boundary
//! - `storage`: The [`SecureStore`] handle and atomic file I/O
//! - `cli`: Command handlers for the `finvault` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use finvault::{MasterSecret, Payload, SecureStore};
//!
//! # fn main() -> finvault::VaultResult<()> {
//! let store = SecureStore::new(MasterSecret::new("correct-horse-battery-staple")?);
//!
//! let envelope = store.encrypt(&Payload::from("account: 12-3456"))?;
//! let payload = store.decrypt(&envelope)?;
//! assert_eq!(payload.as_text(), Some("account: 12-3456"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod payload;
pub mod storage;

pub use config::{MasterSecret, StoragePaths, DEFAULT_KEY_VAR};
pub use crypto::Envelope;
pub use error::{VaultError, VaultResult};
pub use payload::Payload;
pub use storage::SecureStore;
