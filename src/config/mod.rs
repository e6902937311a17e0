//! Configuration: where state lives and how the vault is set up.

pub mod paths;
pub mod settings;

pub use paths::config_dir;
pub use settings::{KeyStoreKind, Settings};
