//! Vault module: encrypted storage of the API key.
//!
//! This module provides:
//! - Text encoding of the sealed record (`record`)
//! - The `Vault` handle with `store` and `load` (`store`)

pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use store::{Vault, VaultConfig};
