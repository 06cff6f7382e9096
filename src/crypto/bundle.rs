//! Bundle framing
//!
//! ```text
//! offset  len  field
//!      0   16  IV
//!     16   32  salt
//!     48   32  HMAC-SHA256 tag
//!     80    n  AES-256-CBC ciphertext (n >= 16, multiple of 16)
//! ```
//!
//! There is no version or length prefix; the offsets are fixed.

use crate::crypto::{HEADER_SIZE, IV_SIZE, SALT_SIZE, TAG_SIZE};
use crate::error::{Error, Result};

const SALT_OFFSET: usize = IV_SIZE;
const TAG_OFFSET: usize = SALT_OFFSET + SALT_SIZE;

/// Borrowed view of the fields of a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleParts<'a> {
    pub iv: &'a [u8],
    pub salt: &'a [u8],
    pub tag: &'a [u8],
    pub ciphertext: &'a [u8],
}

/// Concatenate `iv ‖ salt ‖ tag ‖ ciphertext`
pub fn frame(iv: &[u8], salt: &[u8], tag: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if iv.len() != IV_SIZE {
        return Err(Error::length("IV", IV_SIZE, iv.len()));
    }
    if salt.len() != SALT_SIZE {
        return Err(Error::length("salt", SALT_SIZE, salt.len()));
    }
    if tag.len() != TAG_SIZE {
        return Err(Error::length("tag", TAG_SIZE, tag.len()));
    }

    let mut bundle = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    bundle.extend_from_slice(iv);
    bundle.extend_from_slice(salt);
    bundle.extend_from_slice(tag);
    bundle.extend_from_slice(ciphertext);
    Ok(bundle)
}

/// Split a bundle into its fields
pub fn unframe(bundle: &[u8]) -> Result<BundleParts<'_>> {
    if bundle.len() < HEADER_SIZE {
        return Err(Error::Format(format!(
            "bundle is {} bytes, need at least {}",
            bundle.len(),
            HEADER_SIZE
        )));
    }

    Ok(BundleParts {
        iv: &bundle[..SALT_OFFSET],
        salt: &bundle[SALT_OFFSET..TAG_OFFSET],
        tag: &bundle[TAG_OFFSET..HEADER_SIZE],
        ciphertext: &bundle[HEADER_SIZE..],
    })
}
