//! Password-based encrypt-then-MAC
//!
//! Encryption draws a fresh salt and IV, derives the key, encrypts with
//! AES-256-CBC, tags `IV ‖ ciphertext` with HMAC-SHA256 and frames the
//! result. Decryption verifies the tag before touching the padding, so a
//! forged or corrupted bundle never reaches the block cipher and padding
//! validity is never revealed for it.
//!
//! Two flavours exist for each direction:
//! - [`encrypt`] / [`decrypt`] take ownership of the password and the input
//!   data and wipe them before returning, on success and on failure.
//! - [`seal`] / [`open`] borrow them; the caller stays responsible for
//!   erasing its own copies.
//!
//! Every intermediate buffer (derived key, salt, IV, tag, working
//! ciphertext) is wiped either way.

use crate::crypto::{auth, bundle, cipher, kdf, random, SecretBytes};
use crate::error::{Error, Result};
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Encrypt `cleardata` under `password`, wiping both inputs
///
/// `iterations` must be given again, unchanged, to [`decrypt`].
pub fn encrypt(
    cleardata: impl Into<SecretBytes>,
    password: impl Into<SecretBytes>,
    iterations: u32,
) -> Result<Vec<u8>> {
    let cleardata = cleardata.into();
    let password = password.into();
    seal(&cleardata, &password, iterations)
}

/// Decrypt and verify `bundle` under `password`, wiping both inputs
///
/// Fails with [`Error::Authentication`] for a wrong password, a wrong
/// iteration count, or a modified bundle.
pub fn decrypt(
    bundle: impl Into<SecretBytes>,
    password: impl Into<SecretBytes>,
    iterations: u32,
) -> Result<SecretBytes> {
    let bundle = bundle.into();
    let password = password.into();
    open(&bundle, &password, iterations)
}

/// Encrypt borrowed `cleardata` under a borrowed `password`
pub fn seal(cleardata: &[u8], password: &[u8], iterations: u32) -> Result<Vec<u8>> {
    if password.is_empty() {
        return Err(Error::InvalidValue("password must not be empty".to_string()));
    }

    let salt = Zeroizing::new(random::random_salt()?);
    let iv = Zeroizing::new(random::random_iv()?);

    let key = kdf::derive_key(password, &salt[..], iterations)?;
    let ciphertext = cipher::encrypt_cbc(cleardata, &key, &iv[..])?;
    let tag = Zeroizing::new(auth::create_tag(&key, &iv[..], &ciphertext)?);

    let sealed = bundle::frame(&iv[..], &salt[..], &tag[..], &ciphertext)?;

    debug!(
        "Sealed {} bytes into {}-byte bundle ({} iterations)",
        cleardata.len(),
        sealed.len(),
        iterations
    );
    Ok(sealed)
}

/// Decrypt and verify a borrowed `bundle` under a borrowed `password`
pub fn open(bundle: &[u8], password: &[u8], iterations: u32) -> Result<SecretBytes> {
    if password.is_empty() {
        return Err(Error::InvalidValue("password must not be empty".to_string()));
    }

    let parts = bundle::unframe(bundle)?;
    let key = kdf::derive_key(password, parts.salt, iterations)?;

    if !auth::verify_tag(parts.tag, &key, parts.iv, parts.ciphertext)? {
        warn!("Bundle authentication failed");
        return Err(Error::Authentication);
    }

    let cleardata = cipher::decrypt_cbc(parts.ciphertext, &key, parts.iv)?;

    debug!(
        "Opened {}-byte bundle into {} bytes ({} iterations)",
        bundle.len(),
        cleardata.len(),
        iterations
    );
    Ok(cleardata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::secure::wipe_log;
    use crate::crypto::{BLOCK_SIZE, HEADER_SIZE};
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    // Low count keeps the tests fast; the protocol does not depend on it.
    const ITERATIONS: u32 = 1_000;

    #[test]
    fn test_hello_world_scenario() {
        let bundle = encrypt(b"Hello, World!".to_vec(), b"password".to_vec(), 100_000).unwrap();

        let cleardata = decrypt(bundle.clone(), b"password".to_vec(), 100_000).unwrap();
        assert_eq!(cleardata.as_bytes(), b"Hello, World!");

        let err = decrypt(bundle, b"wrong".to_vec(), 100_000).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_bundle_layout() {
        let bundle = seal(b"Hello, World!", b"password", ITERATIONS).unwrap();
        assert_eq!(bundle.len(), HEADER_SIZE + BLOCK_SIZE);

        let long = seal(&[0u8; 16], b"password", ITERATIONS).unwrap();
        assert_eq!(long.len(), HEADER_SIZE + 2 * BLOCK_SIZE);
    }

    #[test]
    fn test_round_trip_sizes() {
        for len in [0usize, 1, 15, 16, 17, 1000] {
            let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let bundle = seal(&data, b"pw", ITERATIONS).unwrap();
            let opened = open(&bundle, b"pw", ITERATIONS).unwrap();
            assert_eq!(opened.as_bytes(), &data[..]);
        }
    }

    #[test]
    fn test_fresh_salt_and_iv_each_time() {
        let a = seal(b"same", b"password", ITERATIONS).unwrap();
        let b = seal(b"same", b"password", ITERATIONS).unwrap();
        assert_ne!(a[..16], b[..16]);
        assert_ne!(a[16..48], b[16..48]);
        assert_ne!(a[80..], b[80..]);
    }

    #[test]
    fn test_wrong_password() {
        let bundle = seal(b"secret", b"password", ITERATIONS).unwrap();
        let err = open(&bundle, b"passwore", ITERATIONS).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_wrong_iterations() {
        let bundle = seal(b"secret", b"password", ITERATIONS).unwrap();
        let err = open(&bundle, b"password", ITERATIONS + 1).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_empty_password_rejected() {
        let err = seal(b"data", b"", ITERATIONS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);

        let bundle = seal(b"data", b"pw", ITERATIONS).unwrap();
        let err = open(&bundle, b"", ITERATIONS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = seal(b"data", b"pw", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn test_truncated_bundle_is_format_error() {
        let bundle = seal(b"data", b"pw", ITERATIONS).unwrap();
        let err = open(&bundle[..79], b"pw", ITERATIONS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.is_rejected_bundle());
    }

    #[test]
    fn test_header_only_bundle_fails_authentication() {
        // Verification happens before the empty ciphertext is looked at.
        let bundle = seal(b"data", b"pw", ITERATIONS).unwrap();
        let err = open(&bundle[..HEADER_SIZE], b"pw", ITERATIONS).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_dropping_a_block_fails_authentication() {
        let bundle = seal(&[7u8; 40], b"pw", ITERATIONS).unwrap();
        let err = open(&bundle[..bundle.len() - BLOCK_SIZE], b"pw", ITERATIONS).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_encrypt_wipes_inputs() {
        wipe_log::take();
        encrypt(b"top secret data".to_vec(), b"sw0rdfish".to_vec(), ITERATIONS).unwrap();
        assert!(wipe_log::contains(b"top secret data"));
        assert!(wipe_log::contains(b"sw0rdfish"));
    }

    #[test]
    fn test_encrypt_wipes_key_material() {
        wipe_log::take();
        let bundle = encrypt(b"abc".to_vec(), b"pw".to_vec(), ITERATIONS).unwrap();

        let wiped = wipe_log::take();
        // the 64-byte derived key and the working ciphertext
        assert!(wiped.iter().any(|b| b.len() == 64));
        assert!(wiped.iter().any(|b| b[..] == bundle[HEADER_SIZE..]));
    }

    #[test]
    fn test_decrypt_wipes_on_failure() {
        let bundle = seal(b"payload", b"right", ITERATIONS).unwrap();

        wipe_log::take();
        let err = decrypt(bundle.clone(), b"wrong-pass".to_vec(), ITERATIONS).unwrap_err();
        assert!(err.is_authentication());

        let wiped = wipe_log::take();
        assert!(wiped.iter().any(|b| b[..] == bundle[..]));
        assert!(wiped.iter().any(|b| b == b"wrong-pass"));
        assert!(wiped.iter().any(|b| b.len() == 64));
        // nothing was decrypted
        assert!(!wiped.iter().any(|b| b == b"payload"));
    }

    #[test]
    fn test_decrypt_wipes_on_success() {
        let bundle = seal(b"opened fine", b"pw", ITERATIONS).unwrap();

        wipe_log::take();
        let cleardata = decrypt(bundle.clone(), b"pw".to_vec(), ITERATIONS).unwrap();
        assert_eq!(cleardata.as_bytes(), b"opened fine");

        let wiped = wipe_log::take();
        assert!(wiped.iter().any(|b| b[..] == bundle[..]));
        assert!(wiped.iter().any(|b| b == b"pw"));
        assert!(wiped.iter().any(|b| b.len() == 64));
    }

    #[test]
    fn test_decrypt_wipes_on_format_error() {
        wipe_log::take();
        let err = decrypt(vec![1u8; 20], b"pw-short".to_vec(), ITERATIONS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(wipe_log::contains(&[1u8; 20]));
        assert!(wipe_log::contains(b"pw-short"));
    }

    #[test]
    fn test_seal_and_open_leave_caller_buffers() {
        let cleardata = b"keep me".to_vec();
        let password = b"keep pw".to_vec();
        let bundle = seal(&cleardata, &password, ITERATIONS).unwrap();
        let opened = open(&bundle, &password, ITERATIONS).unwrap();

        assert_eq!(cleardata, b"keep me");
        assert_eq!(password, b"keep pw");
        assert_eq!(opened.as_bytes(), &cleardata[..]);
    }

    #[test]
    fn test_decrypt_result_wiped_on_drop() {
        let bundle = seal(b"short-lived", b"pw", ITERATIONS).unwrap();
        wipe_log::take();
        {
            let cleardata = open(&bundle, b"pw", ITERATIONS).unwrap();
            assert_eq!(cleardata.as_bytes(), b"short-lived");
        }
        assert!(wipe_log::contains(b"short-lived"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_any_bit_flip_is_rejected(
            data in proptest::collection::vec(any::<u8>(), 0..64),
            position in any::<proptest::sample::Index>(),
            bit in 0u8..8,
        ) {
            let mut bundle = seal(&data, b"pw", 1).unwrap();
            let i = position.index(bundle.len());
            bundle[i] ^= 1 << bit;

            let err = open(&bundle, b"pw", 1).unwrap_err();
            prop_assert!(err.is_authentication());
        }
    }
}
