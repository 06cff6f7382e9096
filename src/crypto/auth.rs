//! HMAC-SHA256 authentication of `IV ‖ ciphertext`
//!
//! Tags are always compared in constant time.

use crate::crypto::{DerivedKey, IV_SIZE, TAG_SIZE};
use crate::error::{Error, Result};
use ring::hmac;
use subtle::ConstantTimeEq;

/// Compute the tag over `iv ‖ ciphertext` with the HMAC half of `key`
///
/// The keyed SHA-256 states inside `ring::hmac::Key` are not zeroized by
/// ring and fall outside the wipe guarantee of this crate.
pub fn create_tag(key: &DerivedKey, iv: &[u8], ciphertext: &[u8]) -> Result<[u8; TAG_SIZE]> {
    if iv.len() != IV_SIZE {
        return Err(Error::length("IV", IV_SIZE, iv.len()));
    }

    let hmac_key = hmac::Key::new(hmac::HMAC_SHA256, key.hmac_key());
    let mut ctx = hmac::Context::with_key(&hmac_key);
    ctx.update(iv);
    ctx.update(ciphertext);
    let signature = ctx.sign();

    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(signature.as_ref());
    Ok(tag)
}

/// Constant-time comparison of two 32-byte tags
pub fn tags_match(given: &[u8], expected: &[u8]) -> Result<bool> {
    if given.len() != TAG_SIZE {
        return Err(Error::length("tag", TAG_SIZE, given.len()));
    }
    if expected.len() != TAG_SIZE {
        return Err(Error::length("expected tag", TAG_SIZE, expected.len()));
    }
    Ok(given.ct_eq(expected).into())
}

/// Recompute the tag and compare it against `expected` in constant time
pub fn verify_tag(
    expected: &[u8],
    key: &DerivedKey,
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<bool> {
    if expected.len() != TAG_SIZE {
        return Err(Error::length("expected tag", TAG_SIZE, expected.len()));
    }
    let mut computed = create_tag(key, iv, ciphertext)?;
    let result = tags_match(&computed, expected);
    zeroize::Zeroize::zeroize(&mut computed);
    result
}
