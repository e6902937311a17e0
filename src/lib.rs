pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod logging;
pub mod vault;

#[cfg(feature = "keyring-store")]
pub mod keyring;
