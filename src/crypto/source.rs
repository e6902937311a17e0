//! Where the installation key lives.

use std::path::PathBuf;

use super::keyfile;
use super::keys::KeyMaterial;
use crate::errors::VaultResult;

/// Location of the installation key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// A 32-byte owner-only key file, kept apart from the sealed record.
    File(PathBuf),

    /// An entry in the operating system's credential store.
    #[cfg(feature = "keyring-store")]
    Keyring { service: String, account: String },
}

impl KeySource {
    /// Load the key if it has been provisioned already.
    pub fn load(&self) -> VaultResult<Option<KeyMaterial>> {
        match self {
            KeySource::File(path) => keyfile::load_key_file(path),
            #[cfg(feature = "keyring-store")]
            KeySource::Keyring { service, account } => crate::keyring::get_key(service, account),
        }
    }

    /// Load the key, provisioning a fresh one on first use.
    pub fn load_or_create(&self) -> VaultResult<KeyMaterial> {
        match self {
            KeySource::File(path) => keyfile::load_or_create_key_file(path),
            #[cfg(feature = "keyring-store")]
            KeySource::Keyring { service, account } => {
                if let Some(key) = crate::keyring::get_key(service, account)? {
                    return Ok(key);
                }
                let key = KeyMaterial::generate()?;
                crate::keyring::store_key(service, account, &key)?;
                tracing::info!(%service, %account, "generated new vault key in OS keyring");
                Ok(key)
            }
        }
    }
}
