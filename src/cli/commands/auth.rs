//! `cloudcents auth [API_KEY]`: store an API key securely, then log in.
//!
//! The key is sealed into the vault and immediately read back, so a
//! successful `auth` guarantees the next `login` will work.

use crate::cli::commands::login::verify_stored_key;
use crate::cli::output;
use crate::errors::{CloudCentsError, Result, VaultError};
use crate::vault::Vault;

/// Execute the `auth` command.
pub fn execute(api_key: Option<&str>) -> Result<()> {
    let api_key = crate::cli::read_api_key(api_key)?;
    // Reject before provisioning a vault key that would never be used.
    if api_key.is_empty() {
        return Err(VaultError::EmptySecret.into());
    }

    let config = crate::cli::vault_config()?;
    let vault = Vault::open_for_store(&config)?;
    vault.store(api_key.as_bytes())?;

    output::info(&format!(
        "API key stored securely in '{}'",
        vault.record_path().display()
    ));
    output::api_key_hint();

    verify_stored_key(&vault).map_err(CloudCentsError::LoginFailed)?;

    output::success("Successfully logged in with stored API key.");
    Ok(())
}
