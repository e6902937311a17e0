//! The credential vault: one encrypted API key at a fixed path.
//!
//! `Vault` wraps the crypto layer and the record encoding so callers
//! only see `store(secret)` and `load()`.  Writes go through a temp file
//! in the same directory followed by a rename, so a reader always sees a
//! complete record, old or new.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::crypto::{decrypt, encrypt, KeyMaterial, KeySource};
use crate::errors::{VaultError, VaultResult};

use super::record;

/// Everything a `Vault` needs, resolved up front by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Path of the sealed record (e.g. `~/.config/cloudcent/api_key.txt`).
    pub record_path: PathBuf,

    /// Where the installation key is kept.
    pub key_source: KeySource,
}

/// Handle on the stored API key.  The key material is fixed for the
/// lifetime of the handle and zeroized when it is dropped.
pub struct Vault {
    record_path: PathBuf,
    key: KeyMaterial,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Build a vault around key material the caller already holds.
    pub fn new(record_path: impl Into<PathBuf>, key: KeyMaterial) -> Self {
        Self {
            record_path: record_path.into(),
            key,
        }
    }

    /// Open the vault for reading.
    ///
    /// If no installation key has been provisioned, no record can be valid,
    /// so this fails with `NotFound` without creating anything on disk.
    pub fn open(config: &VaultConfig) -> VaultResult<Self> {
        let key = config.key_source.load()?.ok_or_else(|| {
            tracing::debug!("no vault key provisioned yet");
            VaultError::NotFound
        })?;
        Ok(Self::new(&config.record_path, key))
    }

    /// Open the vault for writing, provisioning the installation key on
    /// first use.
    ///
    /// The record's directory is created first because the default key
    /// file lives in it too.
    pub fn open_for_store(config: &VaultConfig) -> VaultResult<Self> {
        ensure_parent_dir(&config.record_path)?;
        let key = config.key_source.load_or_create()?;
        Ok(Self::new(&config.record_path, key))
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Encrypt `secret` and replace whatever record was stored before.
    ///
    /// A failed store leaves the previous record in an undefined state;
    /// callers must treat the secret as not durably stored.
    pub fn store(&self, secret: &[u8]) -> VaultResult<()> {
        if secret.is_empty() {
            return Err(VaultError::EmptySecret);
        }

        let parent = ensure_parent_dir(&self.record_path)?;

        let record_key = self.key.derive_record_key()?;
        let sealed = encrypt(&record_key, secret)?;
        let text = record::encode(&sealed);

        write_atomic(parent, &self.record_path, text.as_bytes()).map_err(|source| {
            VaultError::WriteFailed {
                path: self.record_path.clone(),
                source,
            }
        })?;

        tracing::debug!(path = %self.record_path.display(), "stored sealed API key");
        Ok(())
    }

    /// Read, verify and decrypt the stored secret.
    pub fn load(&self) -> VaultResult<Zeroizing<Vec<u8>>> {
        let raw = fs::read(&self.record_path).map_err(|e| {
            tracing::debug!(
                path = %self.record_path.display(),
                error = %e,
                "cannot read sealed API key"
            );
            VaultError::NotFound
        })?;

        let sealed = record::decode(&raw)?;
        let record_key = self.key.derive_record_key()?;
        decrypt(&record_key, &sealed)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path of the sealed record.
    pub fn record_path(&self) -> &Path {
        &self.record_path
    }
}

/// Create the record's parent directory (and intermediates) owner-only if
/// it does not exist yet, returning it.
fn ensure_parent_dir(record_path: &Path) -> VaultResult<&Path> {
    let parent = match record_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(Path::new(".")),
    };

    if parent.is_dir() {
        return Ok(parent);
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder
        .create(parent)
        .map_err(|source| VaultError::DirectoryUnavailable {
            path: parent.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %parent.display(), "created config directory");
    Ok(parent)
}

/// Write `contents` to `path` via temp file + fsync + rename, owner-only.
fn write_atomic(dir: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    temp_file.write_all(contents)?;
    // Flush and fsync so the rename, if it succeeds, points at a whole file.
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
