//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `decrypt` splits the nonce back out
//! before decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use crate::errors::{VaultError, VaultResult};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Shortest `ciphertext + tag` a non-empty plaintext can produce.
pub const MIN_CIPHERTEXT_LEN: usize = TAG_LEN + 1;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(key: &[u8; 32], plaintext: &[u8]) -> VaultResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.into());

    // A fresh nonce from the OS CSPRNG on every call; nothing is tracked.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| VaultError::EncryptionFailed)?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Input too short to hold a nonce and a minimal ciphertext is `Corrupt`;
/// a tag that does not verify is `AuthenticationFailed`.  No plaintext is
/// returned unless the tag checks out.
pub fn decrypt(key: &[u8; 32], ciphertext_with_nonce: &[u8]) -> VaultResult<Zeroizing<Vec<u8>>> {
    if ciphertext_with_nonce.len() < NONCE_LEN + MIN_CIPHERTEXT_LEN {
        tracing::debug!(
            len = ciphertext_with_nonce.len(),
            "sealed record shorter than nonce plus minimal ciphertext"
        );
        return Err(VaultError::Corrupt);
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new(key.into());

    let plaintext = cipher.decrypt(nonce, ciphertext).map_err(|_| {
        tracing::debug!("sealed record failed tag verification");
        VaultError::AuthenticationFailed
    })?;

    Ok(Zeroizing::new(plaintext))
}
