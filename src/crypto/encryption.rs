//! AES-256-GCM envelope encryption/decryption
//!
//! Each encryption call draws a fresh random salt and nonce, derives a
//! one-shot key from the master secret, and produces an authenticated
//! envelope. A (key, nonce) pair is therefore never reused across calls.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::config::MasterSecret;
use crate::error::{VaultError, VaultResult};

use super::key_derivation::{derive_key, SALT_LENGTH};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_LENGTH: usize = 12;

/// Size of the AES-GCM authentication tag appended to the ciphertext
pub const TAG_LENGTH: usize = 16;

/// An encrypted payload bundled with the non-secret parameters needed to
/// decrypt it
///
/// This is the persisted/wire format: three standard-base64 fields and
/// nothing else. The algorithm is implied (AES-256-GCM over a
/// PBKDF2-HMAC-SHA256 key), so files written by earlier deployments stay
/// readable and files written here stay readable by them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// AES-GCM output with the authentication tag appended (base64 encoded)
    pub ciphertext: String,
    /// Key-derivation salt, 16 raw bytes (base64 encoded)
    pub salt: String,
    /// AES-GCM nonce, 12 raw bytes (base64 encoded)
    pub nonce: String,
}

impl Envelope {
    /// Bundle raw encryption output into base64 fields
    fn from_raw_parts(ciphertext: &[u8], salt: &[u8], nonce: &[u8]) -> Self {
        Self {
            ciphertext: STANDARD.encode(ciphertext),
            salt: STANDARD.encode(salt),
            nonce: STANDARD.encode(nonce),
        }
    }

    /// Decode the ciphertext from base64
    ///
    /// A ciphertext shorter than the authentication tag cannot have been
    /// produced by encryption and is rejected as malformed.
    pub fn decode_ciphertext(&self) -> VaultResult<Vec<u8>> {
        let bytes = STANDARD
            .decode(&self.ciphertext)
            .map_err(|e| VaultError::Decryption(format!("Invalid ciphertext encoding: {}", e)))?;
        if bytes.len() < TAG_LENGTH {
            return Err(VaultError::Decryption(format!(
                "Ciphertext too short: expected at least {} bytes, got {}",
                TAG_LENGTH,
                bytes.len()
            )));
        }
        Ok(bytes)
    }

    /// Decode the salt from base64, enforcing its fixed length
    pub fn decode_salt(&self) -> VaultResult<[u8; SALT_LENGTH]> {
        let bytes = STANDARD
            .decode(&self.salt)
            .map_err(|e| VaultError::Decryption(format!("Invalid salt encoding: {}", e)))?;
        bytes.as_slice().try_into().map_err(|_| {
            VaultError::Decryption(format!(
                "Invalid salt size: expected {}, got {}",
                SALT_LENGTH,
                bytes.len()
            ))
        })
    }

    /// Decode the nonce from base64, enforcing its fixed length
    pub fn decode_nonce(&self) -> VaultResult<[u8; NONCE_LENGTH]> {
        let bytes = STANDARD
            .decode(&self.nonce)
            .map_err(|e| VaultError::Decryption(format!("Invalid nonce encoding: {}", e)))?;
        bytes.as_slice().try_into().map_err(|_| {
            VaultError::Decryption(format!(
                "Invalid nonce size: expected {}, got {}",
                NONCE_LENGTH,
                bytes.len()
            ))
        })
    }
}

/// Encrypt plaintext bytes under the master secret
///
/// Generates a random salt and nonce for each call, so encrypting the same
/// plaintext twice yields unrelated envelopes.
pub fn encrypt(plaintext: &[u8], secret: &MasterSecret) -> VaultResult<Envelope> {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(secret, &salt);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| VaultError::Encryption(format!("Encryption failed: {}", e)))?;

    Ok(Envelope::from_raw_parts(&ciphertext, &salt, &nonce_bytes))
}

/// Decrypt an envelope back to plaintext bytes
///
/// Malformed fields fail with [`VaultError::Decryption`]; a rejected
/// authentication tag fails with [`VaultError::Authentication`].
pub fn decrypt(envelope: &Envelope, secret: &MasterSecret) -> VaultResult<Vec<u8>> {
    let salt = envelope.decode_salt()?;
    let nonce_bytes = envelope.decode_nonce()?;
    let ciphertext = envelope.decode_ciphertext()?;

    let key = derive_key(secret, &salt);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Decryption(format!("Failed to create cipher: {}", e)))?;

    // aes-gcm reports all decryption failures opaquely; with field lengths
    // already validated, the only remaining failure is the tag check.
    cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
        .map_err(|_| VaultError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> MasterSecret {
        MasterSecret::new(s).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt() {
        let key = secret("test_secret");
        let plaintext = b"Hello, World!";

        let envelope = encrypt(plaintext, &key).unwrap();
        let decrypted = decrypt(&envelope, &key).unwrap();

        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_call() {
        let key = secret("test_secret");
        let plaintext = b"Hello, World!";

        let envelope1 = encrypt(plaintext, &key).unwrap();
        let envelope2 = encrypt(plaintext, &key).unwrap();

        assert_ne!(envelope1.salt, envelope2.salt);
        assert_ne!(envelope1.nonce, envelope2.nonce);
        assert_ne!(envelope1.ciphertext, envelope2.ciphertext);
    }

    #[test]
    fn test_envelope_field_lengths() {
        let envelope = encrypt(b"data", &secret("test_secret")).unwrap();
        assert_eq!(envelope.decode_salt().unwrap().len(), SALT_LENGTH);
        assert_eq!(envelope.decode_nonce().unwrap().len(), NONCE_LENGTH);
    }

    #[test]
    fn test_wrong_secret_fails_authentication() {
        let envelope = encrypt(b"Hello, World!", &secret("secret_a")).unwrap();
        let result = decrypt(&envelope, &secret("secret_b"));
        assert!(matches!(result, Err(VaultError::Authentication)));
    }

    #[test]
    fn test_tampered_ciphertext_fails_authentication() {
        let key = secret("test_secret");
        let mut envelope = encrypt(b"Hello, World!", &key).unwrap();

        let mut ciphertext = STANDARD.decode(&envelope.ciphertext).unwrap();
        ciphertext[0] ^= 0x01;
        envelope.ciphertext = STANDARD.encode(&ciphertext);

        let result = decrypt(&envelope, &key);
        assert!(matches!(result, Err(VaultError::Authentication)));
    }

    #[test]
    fn test_substituted_nonce_fails_authentication() {
        let key = secret("test_secret");
        let mut envelope = encrypt(b"Hello, World!", &key).unwrap();
        envelope.nonce = STANDARD.encode([0u8; NONCE_LENGTH]);

        let result = decrypt(&envelope, &key);
        assert!(matches!(result, Err(VaultError::Authentication)));
    }

    #[test]
    fn test_substituted_salt_fails_authentication() {
        let key = secret("test_secret");
        let mut envelope = encrypt(b"Hello, World!", &key).unwrap();
        envelope.salt = STANDARD.encode([0u8; SALT_LENGTH]);

        let result = decrypt(&envelope, &key);
        assert!(matches!(result, Err(VaultError::Authentication)));
    }

    #[test]
    fn test_malformed_fields_are_decryption_errors() {
        let key = secret("test_secret");
        let good = encrypt(b"data", &key).unwrap();

        let bad_base64 = Envelope {
            salt: "not base64!!!".into(),
            ..good.clone()
        };
        assert!(matches!(
            decrypt(&bad_base64, &key),
            Err(VaultError::Decryption(_))
        ));

        let short_salt = Envelope {
            salt: STANDARD.encode([0u8; 4]),
            ..good.clone()
        };
        assert!(matches!(
            decrypt(&short_salt, &key),
            Err(VaultError::Decryption(_))
        ));

        let short_nonce = Envelope {
            nonce: STANDARD.encode([0u8; 4]),
            ..good.clone()
        };
        assert!(matches!(
            decrypt(&short_nonce, &key),
            Err(VaultError::Decryption(_))
        ));

        let truncated = Envelope {
            ciphertext: STANDARD.encode([0u8; 4]),
            ..good
        };
        assert!(matches!(
            decrypt(&truncated, &key),
            Err(VaultError::Decryption(_))
        ));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = secret("test_secret");
        let envelope = encrypt(b"", &key).unwrap();
        let decrypted = decrypt(&envelope, &key).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_large_plaintext() {
        let key = secret("test_secret");
        let plaintext: Vec<u8> = (0..10000).map(|i| (i % 256) as u8).collect();

        let envelope = encrypt(&plaintext, &key).unwrap();
        let decrypted = decrypt(&envelope, &key).unwrap();

        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn test_envelope_serde_format() {
        let envelope = encrypt(b"data", &secret("test_secret")).unwrap();
        let json = serde_json::to_string(&envelope).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("ciphertext"));
        assert!(object.contains_key("salt"));
        assert!(object.contains_key("nonce"));
    }
}
