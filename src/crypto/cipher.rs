//! AES-256-CBC with PKCS#7 padding
//!
//! Only the AES half of the [`DerivedKey`] is used here. Both directions
//! work in place inside a [`SecretBytes`], so the padded plaintext is wiped
//! even when padding removal fails. The AES round keys and the CBC chaining
//! block are zeroized when the cipher instance is dropped.

use crate::crypto::{DerivedKey, SecretBytes, BLOCK_SIZE, IV_SIZE};
use crate::error::{Error, Result};
use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Ciphertext length for `cleardata_len` bytes of input. Padding always adds
/// between 1 and 16 bytes.
pub fn padded_len(cleardata_len: usize) -> usize {
    (cleardata_len / BLOCK_SIZE + 1) * BLOCK_SIZE
}

fn check_iv(iv: &[u8]) -> Result<()> {
    if iv.len() != IV_SIZE {
        return Err(Error::length("IV", IV_SIZE, iv.len()));
    }
    Ok(())
}

/// Pad and encrypt `cleardata`
pub fn encrypt_cbc(cleardata: &[u8], key: &DerivedKey, iv: &[u8]) -> Result<SecretBytes> {
    check_iv(iv)?;

    let cipher = Aes256CbcEnc::new_from_slices(key.aes_key(), iv)
        .map_err(|e| Error::Encryption(format!("Failed to create cipher: {}", e)))?;

    let mut buf = SecretBytes::zeroed(padded_len(cleardata.len()));
    buf.as_bytes_mut()[..cleardata.len()].copy_from_slice(cleardata);

    let len = cipher
        .encrypt_padded_mut::<Pkcs7>(buf.as_bytes_mut(), cleardata.len())
        .map_err(|_| Error::Encryption("Padding failed".to_string()))?
        .len();
    buf.truncate(len);

    Ok(buf)
}

/// Decrypt `ciphertext` and strip its padding
///
/// Only call this on ciphertext whose tag has already been verified.
pub fn decrypt_cbc(ciphertext: &[u8], key: &DerivedKey, iv: &[u8]) -> Result<SecretBytes> {
    check_iv(iv)?;

    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::Format(format!(
            "ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    let cipher = Aes256CbcDec::new_from_slices(key.aes_key(), iv)
        .map_err(|e| Error::Encryption(format!("Failed to create cipher: {}", e)))?;

    let mut buf = SecretBytes::from(ciphertext);
    let len = cipher
        .decrypt_padded_mut::<Pkcs7>(buf.as_bytes_mut())
        .map_err(|_| Error::Format("invalid padding".to_string()))?
        .len();
    buf.truncate(len);

    Ok(buf)
}
