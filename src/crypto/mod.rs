//! Cryptography module for pwseal
//!
//! Provides AES-256-CBC + HMAC-SHA256 encrypt-then-MAC with PBKDF2-HMAC-SHA256
//! key derivation. Every buffer holding secrets is wiped before release.

pub mod auth;
pub mod bundle;
pub mod cipher;
mod encryption;
pub mod iterations;
mod kdf;
pub mod random;
mod secure;

pub use bundle::{frame, unframe, BundleParts};
pub use encryption::{decrypt, encrypt, open, seal};
pub use iterations::{pin_iterations, pin_iterations_from, random_iterations, IterationRange};
pub use kdf::{derive_key, DerivedKey};
pub use random::random_bytes;
pub use secure::{secure_wipe, SecretBytes};

/// Size of AES-256 key and of HMAC-SHA256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of the PBKDF2 output: AES key followed by HMAC key
pub const DERIVED_KEY_SIZE: usize = 2 * KEY_SIZE;

/// Size of salt for key derivation
pub const SALT_SIZE: usize = 32;

/// Size of CBC initialization vector in bytes
pub const IV_SIZE: usize = 16;

/// Size of HMAC-SHA256 tag in bytes
pub const TAG_SIZE: usize = 32;

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Size of the fixed bundle header (IV, salt, tag)
pub const HEADER_SIZE: usize = IV_SIZE + SALT_SIZE + TAG_SIZE;
