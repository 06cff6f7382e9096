//! pwseal - Password-based authenticated encryption bundles
//!
//! This library turns a password and a buffer of clear data into a
//! self-contained bundle that can only be opened, and verified, with the same
//! password and PBKDF2 iteration count:
//!
//! ```text
//! IV(16) ‖ Salt(32) ‖ HMAC-SHA256(32) ‖ AES-256-CBC ciphertext(n)
//! ```
//!
//! The iteration count is not stored in the bundle. Draw it with
//! [`random_iterations`] and keep it alongside the password, or derive it
//! from a PIN with [`pin_iterations`].
//!
//! # Example
//!
//! ```rust
//! use pwseal::{decrypt, encrypt, pin_iterations, IterationRange};
//!
//! let range = IterationRange::new(1_000, 2_000)?;
//! let iterations = pin_iterations(b"1234".to_vec(), &range)?;
//!
//! let bundle = encrypt(b"Hello, World!".to_vec(), b"password".to_vec(), iterations)?;
//! let cleardata = decrypt(bundle, b"password".to_vec(), iterations)?;
//! assert_eq!(cleardata.as_bytes(), b"Hello, World!");
//! # Ok::<(), pwseal::Error>(())
//! ```

pub mod config;
pub mod crypto;
pub mod error;

pub use config::Config;
pub use crypto::{
    decrypt, derive_key, encrypt, open, pin_iterations, pin_iterations_from, random_bytes,
    random_iterations, seal, secure_wipe, BundleParts, DerivedKey, IterationRange, SecretBytes,
};
pub use error::{Error, ErrorKind, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crypto::{decrypt, encrypt, IterationRange, SecretBytes};
    pub use crate::error::{Error, Result};
}
