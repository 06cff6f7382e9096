//! Cryptographically secure random bytes from the OS

use crate::crypto::{SecretBytes, IV_SIZE, SALT_SIZE};
use crate::error::{Error, Result};
use rand::rngs::OsRng;
use rand::RngCore;

/// Fill `buf` from the OS random source
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| Error::Random(format!("OS random source failed: {}", e)))
}

/// Generate `n` random bytes
///
/// The result is returned as a secret since callers also use it for key
/// material.
pub fn random_bytes(n: usize) -> Result<SecretBytes> {
    let mut bytes = SecretBytes::zeroed(n);
    fill_random(bytes.as_bytes_mut())?;
    Ok(bytes)
}

/// Generate a fresh 32-byte salt for key derivation
pub fn random_salt() -> Result<[u8; SALT_SIZE]> {
    let mut salt = [0u8; SALT_SIZE];
    fill_random(&mut salt)?;
    Ok(salt)
}

/// Generate a fresh 16-byte CBC initialization vector
pub fn random_iv() -> Result<[u8; IV_SIZE]> {
    let mut iv = [0u8; IV_SIZE];
    fill_random(&mut iv)?;
    Ok(iv)
}
