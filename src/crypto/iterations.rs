//! PBKDF2 iteration count policy
//!
//! The iteration count is a second, non-stored secret: it must match between
//! encryption and decryption, so an attacker who does not know it has to
//! search the whole range for every password guess. It is either drawn at
//! random (and kept by the caller) or derived from a memorable PIN.

use crate::crypto::SecretBytes;
use crate::error::{Error, Result};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use ring::digest::{Context, SHA256};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default lower bound (inclusive) for the iteration count
pub const DEFAULT_MIN_ITERATIONS: u32 = 2_000_000;

/// Default upper bound (exclusive) for the iteration count
pub const DEFAULT_MAX_ITERATIONS: u32 = 5_000_000;

/// Domain separation prefix for PIN hashing
const PIN_DOMAIN: &[u8] = b"pwseal/pin-iterations/v1\0";

/// Half-open range `[min, max)` of PBKDF2 iteration counts
///
/// The defaults cost roughly one to two seconds of derivation on a desktop
/// machine. Measure with [`crate::derive_key`] before lowering them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationRange {
    min: u32,
    max: u32,
}

impl Default for IterationRange {
    fn default() -> Self {
        IterationRange {
            min: DEFAULT_MIN_ITERATIONS,
            max: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl IterationRange {
    /// Create a range, rejecting zero bounds and `min >= max`
    pub fn new(min: u32, max: u32) -> Result<Self> {
        let range = IterationRange { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of distinct counts in the range
    pub fn span(&self) -> u32 {
        self.max.saturating_sub(self.min)
    }

    /// Check the bounds. Needed because a deserialized range skips [`Self::new`].
    pub fn validate(&self) -> Result<()> {
        if self.min == 0 {
            return Err(Error::InvalidValue(
                "minimum iterations must be a positive integer".to_string(),
            ));
        }
        if self.max == 0 {
            return Err(Error::InvalidValue(
                "maximum iterations must be a positive integer".to_string(),
            ));
        }
        if self.min >= self.max {
            return Err(Error::InvalidValue(format!(
                "minimum iterations ({}) must be less than maximum ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn contains(&self, iterations: u32) -> bool {
        (self.min..self.max).contains(&iterations)
    }
}

/// Draw a uniformly random iteration count from `range`
pub fn random_iterations(range: &IterationRange) -> Result<u32> {
    range.validate()?;

    let mut rng = StdRng::from_rng(OsRng)
        .map_err(|e| Error::Random(format!("Failed to seed generator: {}", e)))?;
    let iterations = rng.gen_range(range.min..range.max);

    trace!("Drew random iteration count in [{}, {})", range.min, range.max);
    Ok(iterations)
}

/// Derive the iteration count from a PIN, consuming and wiping the PIN
///
/// The same PIN and range always give the same count.
pub fn pin_iterations(pin: impl Into<SecretBytes>, range: &IterationRange) -> Result<u32> {
    let pin = pin.into();
    pin_iterations_from(pin.as_bytes(), range)
}

/// Derive the iteration count from a borrowed PIN
///
/// The caller keeps ownership of the PIN and is responsible for erasing it.
pub fn pin_iterations_from(pin: &[u8], range: &IterationRange) -> Result<u32> {
    range.validate()?;
    if pin.is_empty() {
        return Err(Error::InvalidValue("PIN must not be empty".to_string()));
    }

    let mut ctx = Context::new(&SHA256);
    ctx.update(PIN_DOMAIN);
    ctx.update(pin);
    let digest = ctx.finish();

    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_ref()[..8]);
    let value = u64::from_be_bytes(head);

    // span < 2^32, so the remainder fits in u32 and min + offset < max
    let offset = (value % u64::from(range.span())) as u32;

    trace!("Derived iteration count from PIN in [{}, {})", range.min, range.max);
    Ok(range.min + offset)
}
