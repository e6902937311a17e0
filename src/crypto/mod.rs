//! Cryptographic primitives for cloudcents.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Installation key material and HKDF record-key derivation (`keys`)
//! - The owner-only installation key file (`keyfile`)
//! - Key source selection, file or OS keyring (`source`)

pub mod encryption;
pub mod keyfile;
pub mod keys;
pub mod source;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, KeyMaterial, KeySource};
pub use encryption::{decrypt, encrypt, NONCE_LEN, TAG_LEN};
pub use keyfile::{load_key_file, load_or_create_key_file};
pub use keys::{KeyMaterial, KEY_LEN};
pub use source::KeySource;
