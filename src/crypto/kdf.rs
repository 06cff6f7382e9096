//! PBKDF2-HMAC-SHA256 key derivation
//!
//! A password and salt are stretched into 64 bytes: the first 32 key
//! AES-256, the last 32 key HMAC-SHA256. The split is part of the bundle
//! format and must not change.

use crate::crypto::{SecretBytes, DERIVED_KEY_SIZE, KEY_SIZE, SALT_SIZE};
use crate::error::{Error, Result};
use ring::pbkdf2::{self, PBKDF2_HMAC_SHA256};
use std::fmt;
use std::num::NonZeroU32;
use tracing::trace;

/// 64 bytes of derived key material, wiped on drop
pub struct DerivedKey {
    key: SecretBytes,
}

impl DerivedKey {
    /// Wrap fixed key material, for known-answer tests
    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: &[u8; DERIVED_KEY_SIZE]) -> Self {
        DerivedKey {
            key: SecretBytes::from(&bytes[..]),
        }
    }

    /// All 64 bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.key.as_bytes()
    }

    /// The AES-256 subkey (bytes 0..32)
    pub fn aes_key(&self) -> &[u8] {
        &self.key[..KEY_SIZE]
    }

    /// The HMAC-SHA256 subkey (bytes 32..64)
    pub fn hmac_key(&self) -> &[u8] {
        &self.key[KEY_SIZE..DERIVED_KEY_SIZE]
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the 64-byte key from a password, a 32-byte salt and an iteration count
///
/// Deterministic: identical inputs always produce the identical key.
pub fn derive_key(password: &[u8], salt: &[u8], iterations: u32) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(Error::InvalidValue("password must not be empty".to_string()));
    }
    if salt.len() != SALT_SIZE {
        return Err(Error::length("salt", SALT_SIZE, salt.len()));
    }
    let iterations = NonZeroU32::new(iterations).ok_or_else(|| {
        Error::InvalidValue("iterations must be a positive integer".to_string())
    })?;

    trace!("Deriving key with {} PBKDF2 iterations", iterations);

    let mut key = SecretBytes::zeroed(DERIVED_KEY_SIZE);
    pbkdf2::derive(
        PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        password,
        key.as_bytes_mut(),
    );

    Ok(DerivedKey { key })
}
