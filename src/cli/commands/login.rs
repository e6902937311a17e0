//! `cloudcents login`: check that a usable API key is stored.
//!
//! The key never leaves the process: login only proves that the sealed
//! record decrypts and verifies under this installation's key.

use crate::cli::output;
use crate::errors::{CloudCentsError, Result, VaultError, VaultResult};
use crate::vault::Vault;

/// Execute the `login` command.
pub fn execute() -> Result<()> {
    let config = crate::cli::vault_config()?;
    let vault = Vault::open(&config).map_err(CloudCentsError::LoginFailed)?;

    verify_stored_key(&vault).map_err(CloudCentsError::LoginFailed)?;

    output::success("Login successful! You are now authenticated.");
    Ok(())
}

/// Load the stored key and confirm it is present.
pub fn verify_stored_key(vault: &Vault) -> VaultResult<()> {
    let api_key = vault.load()?;
    if api_key.is_empty() {
        return Err(VaultError::NotFound);
    }
    tracing::debug!(path = %vault.record_path().display(), "stored API key verified");
    Ok(())
}
