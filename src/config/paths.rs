//! Per-OS configuration directory.
//!
//! - Unix-like: `$HOME/.config/cloudcent`
//! - Windows: `%APPDATA%\cloudcent`
//!
//! When the variable is unset the `dirs` crate is asked instead.

use std::path::PathBuf;

use crate::errors::{CloudCentsError, Result};

/// Name of the directory that holds all cloudcents state.
pub const APP_DIR_NAME: &str = "cloudcent";

/// Resolve the configuration directory for the current platform.
pub fn config_dir() -> Result<PathBuf> {
    if cfg!(windows) {
        let base = non_empty_env("APPDATA")
            .or_else(dirs::config_dir)
            .ok_or_else(|| {
                CloudCentsError::Config("cannot resolve config directory: APPDATA is not set".into())
            })?;
        Ok(windows_config_dir(base))
    } else {
        let home = non_empty_env("HOME")
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                CloudCentsError::Config("cannot resolve config directory: HOME is not set".into())
            })?;
        Ok(unix_config_dir(home))
    }
}

/// `<home>/.config/cloudcent`
pub fn unix_config_dir(home: impl Into<PathBuf>) -> PathBuf {
    home.into().join(".config").join(APP_DIR_NAME)
}

/// `<appdata>\cloudcent`
pub fn windows_config_dir(appdata: impl Into<PathBuf>) -> PathBuf {
    appdata.into().join(APP_DIR_NAME)
}

fn non_empty_env(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
