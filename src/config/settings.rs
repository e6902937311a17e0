use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::KeySource;
use crate::errors::{CloudCentsError, Result};
use crate::vault::VaultConfig;

/// Where the vault key is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStoreKind {
    /// Owner-only key file in the config directory.
    #[default]
    File,
    /// OS keychain (requires the `keyring-store` feature).
    Keyring,
}

/// User-level configuration, loaded from `<config_dir>/config.toml`.
///
/// Every field has a sensible default so cloudcents works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Where the vault key lives: "file" (default) or "keyring".
    #[serde(default)]
    pub key_store: KeyStoreKind,

    /// File name of the sealed API key record.
    #[serde(default = "default_record_file")]
    pub record_file: String,

    /// File name of the vault key when `key_store = "file"`.
    #[serde(default = "default_key_file")]
    pub key_file: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_record_file() -> String {
    "api_key.txt".to_string()
}

fn default_key_file() -> String {
    "vault.key".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_store: KeyStoreKind::default(),
            record_file: default_record_file(),
            key_file: default_key_file(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the config directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<config_dir>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CloudCentsError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        validate_file_name("record_file", &settings.record_file)?;
        validate_file_name("key_file", &settings.key_file)?;

        tracing::debug!(path = %config_path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Full path of the sealed record.
    ///
    /// Example: `~/.config/cloudcent/api_key.txt`
    pub fn record_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.record_file)
    }

    /// Build the explicit vault configuration for `config_dir`.
    pub fn vault_config(&self, config_dir: &Path) -> Result<VaultConfig> {
        Ok(VaultConfig {
            record_path: self.record_path(config_dir),
            key_source: self.key_source(config_dir)?,
        })
    }

    fn key_source(&self, config_dir: &Path) -> Result<KeySource> {
        match self.key_store {
            KeyStoreKind::File => Ok(KeySource::File(config_dir.join(&self.key_file))),

            #[cfg(feature = "keyring-store")]
            KeyStoreKind::Keyring => Ok(KeySource::Keyring {
                service: crate::keyring::SERVICE_NAME.to_string(),
                account: crate::keyring::ACCOUNT_NAME.to_string(),
            }),

            #[cfg(not(feature = "keyring-store"))]
            KeyStoreKind::Keyring => Err(CloudCentsError::Config(
                "keyring support not compiled; rebuild with `cargo build --features keyring-store`"
                    .into(),
            )),
        }
    }
}

/// File names must stay inside the config directory.
fn validate_file_name(field: &str, name: &str) -> Result<()> {
    let is_bare = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\']);

    if is_bare {
        Ok(())
    } else {
        Err(CloudCentsError::Config(format!(
            "{field} '{name}' must be a plain file name"
        )))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
