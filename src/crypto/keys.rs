//! Installation key material and record-key derivation.
//!
//! The installation key is never used for encryption directly.  HKDF-SHA256
//! (RFC 5869) expands it into the AES key that seals the API key record,
//! bound to a fixed context string.

use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{VaultError, VaultResult};

/// Length of the installation key and derived sub-keys (256 bits).
pub const KEY_LEN: usize = 32;

/// HKDF context for the key that seals the API key record.
const RECORD_KEY_INFO: &[u8] = b"cloudcents-api-key-v1";

/// A 32-byte installation key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct KeyMaterial {
    bytes: [u8; KEY_LEN],
}

impl KeyMaterial {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Build key material from a slice, rejecting anything not 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> VaultResult<Self> {
        let bytes: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            VaultError::KeyUnavailable(format!(
                "key must be exactly {KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    /// Generate a fresh random key from the operating system's CSPRNG.
    pub fn generate() -> VaultResult<Self> {
        let mut bytes = [0u8; KEY_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| VaultError::KeyUnavailable(format!("random source failed: {e}")))?;
        let key = Self::new(bytes);
        bytes.zeroize();
        Ok(key)
    }

    /// Access the raw key bytes (e.g. to persist them).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Derive the AES-256 key used to seal the API key record.
    pub fn derive_record_key(&self) -> VaultResult<Zeroizing<[u8; KEY_LEN]>> {
        // `salt` is None; the installation key is already uniformly random.
        let hk = Hkdf::<Sha256>::new(None, &self.bytes);

        let mut okm = Zeroizing::new([0u8; KEY_LEN]);
        hk.expand(RECORD_KEY_INFO, &mut okm[..])
            .map_err(|e| VaultError::KeyUnavailable(format!("HKDF expand failed: {e}")))?;

        Ok(okm)
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial(..)")
    }
}
