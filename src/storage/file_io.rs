//! File I/O utilities with atomic writes
//!
//! Envelope files are written via a temp-file-then-rename sequence so a
//! crash mid-write leaves either the old file or the new one, never a
//! truncated mix.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{VaultError, VaultResult};

/// Write a value as pretty-printed JSON, atomically
///
/// Parent directories are created as needed. The temp file lives in the
/// same directory as the target so the final rename stays on one
/// filesystem.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> VaultResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        VaultError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Read a JSON value from a file, failing if the file doesn't exist
pub fn read_json<T, P>(path: P) -> VaultResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(Into::into)
}
