//! Secure erasure of sensitive buffers
//!
//! Every buffer that holds a password, a PIN, clear data or key material is
//! overwritten with fresh random bytes, zeroized and truncated before its
//! memory is released. [`SecretBytes`] does this in its destructor, so a
//! buffer is erased on every exit path, `?` returns included.
//!
//! This is best effort against memory disclosure. It does not protect
//! against copies made by the OS (swap, core dumps).

use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use std::ops::Deref;
use zeroize::Zeroize;

/// Overwrite `buffer` with random bytes, zeroize it and truncate it to
/// length zero. Calling it again on an already wiped buffer is a no-op.
pub fn secure_wipe(buffer: &mut Vec<u8>) {
    if buffer.is_empty() {
        // still release zeroed spare capacity
        buffer.zeroize();
        return;
    }

    #[cfg(test)]
    wipe_log::record(buffer);

    // A failing OS RNG must not prevent the zeroize below.
    let _ = OsRng.try_fill_bytes(buffer.as_mut_slice());
    buffer.zeroize();
}

/// An owned byte buffer that is wiped when dropped
///
/// Use this for passwords, PINs, clear data and key material. Converting a
/// `Vec<u8>` into `SecretBytes` takes ownership without copying.
#[derive(Default)]
pub struct SecretBytes {
    inner: Vec<u8>,
}

impl SecretBytes {
    /// Wrap bytes as a secret
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: bytes.into(),
        }
    }

    /// A zero-filled secret of `len` bytes
    pub fn zeroed(len: usize) -> Self {
        Self {
            inner: vec![0u8; len],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Erase the contents now instead of at drop
    pub fn wipe(&mut self) {
        secure_wipe(&mut self.inner);
    }

    /// Shorten the buffer, zeroizing the discarded tail
    pub(crate) fn truncate(&mut self, len: usize) {
        if len < self.inner.len() {
            self.inner[len..].zeroize();
            self.inner.truncate(len);
        }
    }
}

impl Drop for SecretBytes {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl Clone for SecretBytes {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl Deref for SecretBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl AsRef<[u8]> for SecretBytes {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl From<Vec<u8>> for SecretBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for SecretBytes {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<String> for SecretBytes {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<&str> for SecretBytes {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

// Never print the contents
impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBytes")
            .field("len", &self.inner.len())
            .finish()
    }
}
