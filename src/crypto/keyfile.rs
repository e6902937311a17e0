//! Per-installation key file.
//!
//! The key that protects the stored API key is 32 random bytes written
//! next to (but separate from) the sealed record the first time a key is
//! stored.  The file is owner-only and is never overwritten: if another
//! process created it first, its key is loaded instead.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use zeroize::Zeroizing;

use super::keys::{KeyMaterial, KEY_LEN};
use crate::errors::{VaultError, VaultResult};

/// Load the key file at `path`.
///
/// Returns `Ok(None)` when no key file exists yet.  An empty file holds no
/// key and is treated the same way.
pub fn load_key_file(path: &Path) -> VaultResult<Option<KeyMaterial>> {
    let data = match fs::read(path) {
        Ok(data) => Zeroizing::new(data),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(VaultError::KeyUnavailable(format!(
                "failed to read key file {}: {e}",
                path.display()
            )))
        }
    };

    if data.is_empty() {
        tracing::warn!(path = %path.display(), "ignoring empty key file");
        return Ok(None);
    }

    if data.len() != KEY_LEN {
        return Err(VaultError::KeyUnavailable(format!(
            "key file {} must be exactly {KEY_LEN} bytes, got {}",
            path.display(),
            data.len()
        )));
    }

    KeyMaterial::from_slice(&data).map(Some)
}

/// Load the key file at `path`, generating a new key if none exists.
///
/// The parent directory must already exist.
pub fn load_or_create_key_file(path: &Path) -> VaultResult<KeyMaterial> {
    if let Some(key) = load_key_file(path)? {
        return Ok(key);
    }

    remove_empty_key_file(path)?;

    let key = KeyMaterial::generate()?;
    match write_new_key_file(path, &key) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "generated new vault key");
            Ok(key)
        }
        // Lost a creation race: the other writer's key is authoritative.
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            load_key_file(path)?.ok_or_else(|| {
                VaultError::KeyUnavailable(format!("key file {} vanished", path.display()))
            })
        }
        Err(e) => Err(VaultError::KeyUnavailable(format!(
            "failed to write key file {}: {e}",
            path.display()
        ))),
    }
}

/// Clear an empty leftover so the new key can be linked into its place.
fn remove_empty_key_file(path: &Path) -> VaultResult<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => fs::remove_file(path).or_else(|e| {
            if e.kind() == ErrorKind::NotFound {
                Ok(())
            } else {
                Err(VaultError::KeyUnavailable(format!(
                    "failed to remove empty key file {}: {e}",
                    path.display()
                )))
            }
        }),
        _ => Ok(()),
    }
}

/// Write the key to a temp file beside `path`, fsync it, then link it into
/// place without replacing an existing file.  `path` either holds a whole
/// key or does not exist.
fn write_new_key_file(path: &Path, key: &KeyMaterial) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    temp_file.write_all(key.as_bytes())?;
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;

    temp_file.persist_noclobber(path).map_err(|e| e.error)?;
    Ok(())
}
