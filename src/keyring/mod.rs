//! OS keyring storage for the vault key.
//!
//! Keeps the installation key in the operating system's secure
//! credential store instead of a key file:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! The key is stored base64-encoded since keyring entries are strings.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroizing;

use crate::crypto::KeyMaterial;
use crate::errors::{VaultError, VaultResult};

/// Default service name used in the OS keyring.
pub const SERVICE_NAME: &str = "cloudcents";

/// Default account name for the vault key entry.
pub const ACCOUNT_NAME: &str = "vault-key";

fn entry(service: &str, account: &str) -> VaultResult<keyring::Entry> {
    keyring::Entry::new(service, account)
        .map_err(|e| VaultError::KeyUnavailable(format!("failed to create keyring entry: {e}")))
}

/// Store the vault key in the OS keyring.
pub fn store_key(service: &str, account: &str, key: &KeyMaterial) -> VaultResult<()> {
    let encoded = Zeroizing::new(BASE64.encode(key.as_bytes()));

    entry(service, account)?
        .set_password(&encoded)
        .map_err(|e| VaultError::KeyUnavailable(format!("failed to store key in keyring: {e}")))
}

/// Retrieve the vault key from the OS keyring.
///
/// Returns `None` if no key is stored (rather than an error).
pub fn get_key(service: &str, account: &str) -> VaultResult<Option<KeyMaterial>> {
    let encoded = match entry(service, account)?.get_password() {
        Ok(encoded) => Zeroizing::new(encoded),
        Err(keyring::Error::NoEntry) => return Ok(None),
        Err(e) => {
            return Err(VaultError::KeyUnavailable(format!(
                "failed to read from keyring: {e}"
            )))
        }
    };

    let bytes = Zeroizing::new(
        BASE64
            .decode(encoded.as_bytes())
            .map_err(|_| VaultError::KeyUnavailable("corrupted key in keyring".into()))?,
    );

    KeyMaterial::from_slice(&bytes).map(Some)
}
