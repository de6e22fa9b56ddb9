//! Deterministic Random Bit Generators (NIST SP 800-90A).
//!
//! Provides three DRBG variants behind the common [`Drbg`] lifecycle:
//! - Hash-DRBG (Section 10.1.1), using SHA-256
//! - HMAC-DRBG (Section 10.1.2), using HMAC-SHA-256
//! - CTR-DRBG (Section 10.2), using AES-128/192/256, with or without the
//!   block cipher derivation function
//!
//! Every operation validates its inputs against the instance's
//! [`DrbgLimits`] before the working state is touched.

#[cfg(feature = "ctr-drbg")]
pub mod ctr_drbg;
#[cfg(feature = "ctr-drbg")]
pub use ctr_drbg::CtrDrbg;

#[cfg(feature = "hash-drbg")]
pub mod hash_drbg;
#[cfg(feature = "hash-drbg")]
pub use hash_drbg::HashDrbg;

#[cfg(feature = "hmac-drbg")]
pub mod hmac_drbg;
#[cfg(feature = "hmac-drbg")]
pub use hmac_drbg::HmacDrbg;

use nistdrbg_types::{DrbgError, DrbgMechanism, InputKind, SecurityStrength};

/// Upper bound on entropy input for every mechanism: 1000 bits.
pub const MAX_ENTROPY_LEN: usize = 125;

/// Lifecycle state reported by [`Drbg::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrbgStatus {
    /// Constructed but `instantiate` has not succeeded yet.
    Uninstantiated,
    /// Ready to generate.
    Instantiated,
    /// The reseed interval is exhausted; `generate` fails until `reseed`.
    ReseedRequired,
}

/// Per-instance bounds, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrbgLimits {
    /// Minimum entropy input length in bytes.
    pub min_entropy_len: usize,
    /// Maximum entropy input length in bytes.
    pub max_entropy_len: usize,
    /// Maximum personalization string length in bytes.
    pub max_personalization_len: usize,
    /// Maximum additional input length in bytes.
    pub max_additional_input_len: usize,
    /// Maximum output of a single `generate` call, in bits.
    pub max_request_bits: u64,
    /// Number of `generate` calls allowed between reseeds.
    pub reseed_interval: u64,
}

impl DrbgLimits {
    pub(crate) fn check_entropy(&self, len: usize) -> Result<(), DrbgError> {
        check_len(InputKind::Entropy, len, self.min_entropy_len, self.max_entropy_len)
    }

    pub(crate) fn check_personalization(&self, len: usize) -> Result<(), DrbgError> {
        check_len(InputKind::Personalization, len, 0, self.max_personalization_len)
    }

    pub(crate) fn check_additional_input(&self, len: usize) -> Result<(), DrbgError> {
        check_len(InputKind::AdditionalInput, len, 0, self.max_additional_input_len)
    }

    pub(crate) fn check_request(&self, num_bytes: usize) -> Result<(), DrbgError> {
        let requested_bits = (num_bytes as u64).saturating_mul(8);
        if requested_bits > self.max_request_bits {
            return Err(DrbgError::RequestTooLarge {
                requested_bits,
                max_bits: self.max_request_bits,
            });
        }
        Ok(())
    }

    /// Refuse to generate once `reseed_counter` has passed the interval.
    pub(crate) fn check_counter(
        &self,
        mechanism: DrbgMechanism,
        reseed_counter: u64,
    ) -> Result<(), DrbgError> {
        if reseed_counter > self.reseed_interval {
            log::warn!(
                "{mechanism}: reseed interval of {} requests exhausted",
                self.reseed_interval
            );
            return Err(DrbgError::ReseedRequired);
        }
        Ok(())
    }

    pub(crate) fn status(&self, reseed_counter: Option<u64>) -> DrbgStatus {
        match reseed_counter {
            None => DrbgStatus::Uninstantiated,
            Some(n) if n > self.reseed_interval => DrbgStatus::ReseedRequired,
            Some(_) => DrbgStatus::Instantiated,
        }
    }
}

fn check_len(kind: InputKind, len: usize, min: usize, max: usize) -> Result<(), DrbgError> {
    if len < min || len > max {
        return Err(DrbgError::InputLength { kind, len, min, max });
    }
    Ok(())
}

/// Validate a requested reseed interval against a mechanism maximum.
pub(crate) fn check_reseed_interval(requested: u64, max: u64) -> Result<u64, DrbgError> {
    if requested == 0 || requested > max {
        return Err(DrbgError::InvalidReseedInterval { requested, max });
    }
    Ok(requested)
}

/// The uniform DRBG lifecycle: instantiate, then generate, reseeding
/// whenever [`Drbg::status`] says so.
pub trait Drbg: Send {
    /// Which construction this instance runs.
    fn mechanism(&self) -> DrbgMechanism;

    /// The security strength fixed at construction.
    fn security_strength(&self) -> SecurityStrength;

    /// Input and output bounds for this instance.
    fn limits(&self) -> DrbgLimits;

    /// Generate requests since the last (re)seed plus one, or `None`
    /// before instantiation.
    fn reseed_counter(&self) -> Option<u64>;

    /// Seed the working state. Any previous state is replaced.
    ///
    /// The nonce, when one is used, is appended to `entropy` by the caller.
    fn instantiate(&mut self, entropy: &[u8], personalization: &[u8]) -> Result<(), DrbgError>;

    /// Mix fresh entropy into the working state and reset the counter.
    fn reseed(&mut self, entropy: &[u8], additional_input: &[u8]) -> Result<(), DrbgError>;

    /// Fill `out` with pseudorandom bytes.
    fn generate_into(&mut self, out: &mut [u8], additional_input: &[u8]) -> Result<(), DrbgError>;

    /// Return `num_bytes` pseudorandom bytes.
    fn generate(&mut self, num_bytes: usize, additional_input: &[u8]) -> Result<Vec<u8>, DrbgError> {
        let mut out = vec![0u8; num_bytes];
        self.generate_into(&mut out, additional_input)?;
        Ok(out)
    }

    fn status(&self) -> DrbgStatus {
        self.limits().status(self.reseed_counter())
    }
}
