//! CLI command handlers
//!
//! Thin wrappers over [`SecureStore`]: resolve the master secret, move
//! bytes between stdin/stdout/files, and print results. All user-facing
//! messaging for failed operations lives here, not in the library.

use std::io::{Read, Write};
use std::path::Path;

use crate::config::{MasterSecret, StoragePaths};
use crate::crypto::Envelope;
use crate::error::{VaultError, VaultResult};
use crate::payload::Payload;
use crate::storage::SecureStore;

/// Resolve the master secret for a CLI invocation
///
/// Reads the named environment variable, or prompts interactively when
/// `prompt` is set (the variable is ignored in that case).
pub fn resolve_secret(key_var: &str, prompt: bool) -> VaultResult<MasterSecret> {
    if prompt {
        let passphrase = rpassword::prompt_password("Master key: ")
            .map_err(|e| VaultError::Configuration(format!("Failed to read master key: {}", e)))?;
        MasterSecret::new(passphrase)
    } else {
        MasterSecret::from_env(key_var)
    }
}

/// Encrypt plaintext from a file or stdin into an envelope
pub fn handle_encrypt(
    store: &SecureStore,
    input: Option<&Path>,
    output: Option<&Path>,
) -> VaultResult<()> {
    let plaintext = read_input(input)?;
    let payload = Payload::from_plaintext(plaintext);
    let envelope = store.encrypt(&payload)?;

    let json = serde_json::to_string_pretty(&envelope)?;
    match output {
        Some(path) => {
            std::fs::write(path, json).map_err(|e| VaultError::storage(path, e.into()))?;
            println!("Wrote envelope to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Decrypt an envelope from a file or stdin back to plaintext
pub fn handle_decrypt(
    store: &SecureStore,
    input: Option<&Path>,
    output: Option<&Path>,
) -> VaultResult<()> {
    let raw = read_input(input)?;
    let envelope: Envelope = serde_json::from_slice(&raw)
        .map_err(|e| VaultError::Decryption(format!("Malformed envelope: {}", e)))?;

    let payload = store.decrypt(&envelope)?;
    write_payload(&payload, output)
}

/// Encrypt and persist a named record in the data directory
pub fn handle_store(
    store: &SecureStore,
    paths: &StoragePaths,
    name: &str,
    input: Option<&Path>,
) -> VaultResult<()> {
    paths.ensure_directories()?;
    let plaintext = read_input(input)?;
    let payload = Payload::from_plaintext(plaintext);

    let path = paths.record_file(name);
    store.store(&payload, &path)?;
    println!("Stored record '{}' at {}", name, path.display());
    Ok(())
}

/// Load and decrypt a named record from the data directory
pub fn handle_load(
    store: &SecureStore,
    paths: &StoragePaths,
    name: &str,
    output: Option<&Path>,
) -> VaultResult<()> {
    let payload = store.load(paths.record_file(name))?;
    write_payload(&payload, output)
}

/// Show resolved configuration paths
pub fn handle_paths(paths: &StoragePaths, key_var: &str) -> VaultResult<()> {
    println!("Master key variable: {}", key_var);
    println!("Base directory:      {}", paths.base_dir().display());
    println!("Records directory:   {}", paths.records_dir().display());
    Ok(())
}

/// Read all bytes from a file, or from stdin when no path is given
fn read_input(input: Option<&Path>) -> VaultResult<Vec<u8>> {
    match input {
        Some(path) => {
            std::fs::read(path).map_err(|e| VaultError::storage(path, e.into()))
        }
        None => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Write a decrypted payload to a file or stdout
///
/// Structured values are pretty-printed JSON, text is written as-is, and
/// raw bytes are written unmodified.
fn write_payload(payload: &Payload, output: Option<&Path>) -> VaultResult<()> {
    let bytes = match payload {
        Payload::Structured(value) => {
            let mut json = serde_json::to_vec_pretty(value)?;
            json.push(b'\n');
            json
        }
        Payload::Text(text) => {
            let mut bytes = text.clone().into_bytes();
            bytes.push(b'\n');
            bytes
        }
        Payload::Bytes(bytes) => bytes.clone(),
    };

    match output {
        Some(path) => {
            std::fs::write(path, bytes).map_err(|e| VaultError::storage(path, e.into()))?
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
