//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{config_dir, Settings};
use crate::errors::{CloudCentsError, Result};
use crate::vault::VaultConfig;

/// cloudcents CLI: cloud pricing from the terminal.
#[derive(Parser)]
#[command(
    name = "cloudcents",
    about = "Cloud cost command-line tool with secure API key storage",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Store an API key securely and log in
    Auth {
        /// API key (omit for a hidden interactive prompt)
        api_key: Option<String>,
    },

    /// Login using the stored API key
    Login,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the config directory, read `config.toml`, and build the
/// vault configuration from them.
pub fn vault_config() -> Result<VaultConfig> {
    let dir = config_dir()?;
    let settings = Settings::load(&dir)?;
    settings.vault_config(&dir)
}

/// Get the API key from the argument or, if absent, a hidden prompt.
///
/// Returns `Zeroizing<String>` so the key is wiped from memory on drop.
pub fn read_api_key(arg: Option<&str>) -> Result<Zeroizing<String>> {
    let key = match arg {
        Some(k) => Zeroizing::new(k.trim().to_string()),
        None => {
            let k = dialoguer::Password::new()
                .with_prompt("Enter your API key")
                .interact()
                .map_err(|e| CloudCentsError::CommandFailed(format!("API key prompt: {e}")))?;
            Zeroizing::new(k.trim().to_string())
        }
    };

    Ok(key)
}
