use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the credential vault.
///
/// `NotFound`, `Corrupt` and `AuthenticationFailed` render the same message
/// so output never reveals which check rejected a record.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("cannot create config directory {path}: {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to store API key at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no valid API key is stored")]
    NotFound,

    #[error("no valid API key is stored")]
    Corrupt,

    #[error("no valid API key is stored")]
    AuthenticationFailed,

    #[error("encryption failed")]
    EncryptionFailed,

    #[error("API key cannot be empty")]
    EmptySecret,

    #[error("vault key unavailable: {0}")]
    KeyUnavailable(String),
}

/// All errors that can occur in cloudcents.
#[derive(Debug, Error)]
pub enum CloudCentsError {
    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error logging in: {0}")]
    LoginFailed(#[source] VaultError),

    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience alias for vault results.
pub type VaultResult<T> = std::result::Result<T, VaultError>;

/// Convenience type alias for cloudcents results.
pub type Result<T> = std::result::Result<T, CloudCentsError>;
