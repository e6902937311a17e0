//! Text encoding of a sealed record.
//!
//! On disk a record is standard base64 of `nonce || ciphertext || tag`,
//! with no prefix and no trailing newline.  Whitespace around the text is
//! tolerated on read so a hand-edited file still loads.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{VaultError, VaultResult};

/// Encode sealed bytes for storage in a plain text file.
pub fn encode(sealed: &[u8]) -> String {
    BASE64.encode(sealed)
}

/// Decode the text read from disk back into sealed bytes.
///
/// Anything that is not valid UTF-8 base64 is `Corrupt`.
pub fn decode(raw: &[u8]) -> VaultResult<Vec<u8>> {
    let text = std::str::from_utf8(raw).map_err(|_| {
        tracing::debug!("sealed record is not valid UTF-8");
        VaultError::Corrupt
    })?;

    BASE64.decode(text.trim()).map_err(|e| {
        tracing::debug!(error = %e, "sealed record is not valid base64");
        VaultError::Corrupt
    })
}
