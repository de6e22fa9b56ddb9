//! Hash-DRBG (Hash-based Deterministic Random Bit Generator).
//!
//! SHA-256 based generator in the style of NIST SP 800-90A Section 10.1.1.
//! The working state is a pair of 32-byte values `V` and `C`, refreshed by
//! a three-hash update:
//!
//! ```text
//! temp = H(V || 0x01 || data)
//! V    = H(V || 0x02 || data || temp)
//! C    = H(V || 0x03 || data || temp)
//! ```
//!
//! Output blocks are produced by iterating `V = H(V)`.

use nistdrbg_types::{DrbgError, DrbgMechanism, SecurityStrength};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{check_reseed_interval, Drbg, DrbgLimits, MAX_ENTROPY_LEN};
use crate::entropy;
use crate::sha2::{sha256, SHA256_OUTPUT_SIZE};

/// Maximum number of generate requests before reseed is required.
pub const MAX_RESEED_INTERVAL: u64 = 10_000;

/// Maximum output of one generate request, in bits.
pub const MAX_REQUEST_BITS: u64 = 7500;

/// Maximum personalization string / additional input length (256 bits).
pub const MAX_INPUT_LEN: usize = 32;

const OUT_LEN: usize = SHA256_OUTPUT_SIZE;

#[derive(Zeroize, ZeroizeOnDrop)]
struct HashState {
    /// State value V.
    v: [u8; OUT_LEN],
    /// Constant C.
    c: [u8; OUT_LEN],
    /// Number of generate requests since last (re)seed, plus one.
    reseed_counter: u64,
}

impl HashState {
    fn instantiate(seed_material: &[&[u8]]) -> Self {
        let mut parts = seed_material.to_vec();
        parts.push(&[0x00u8]);
        let v = sha256(&parts);
        let c = sha256(&[&v, &[0x01]]);
        HashState {
            v,
            c,
            reseed_counter: 1,
        }
    }

    fn update(&mut self, data: &[u8]) {
        let temp = Zeroizing::new(sha256(&[&self.v, &[0x01], data]));
        self.v = sha256(&[&self.v, &[0x02], data, &temp[..]]);
        self.c = sha256(&[&self.v, &[0x03], data, &temp[..]]);
    }
}

/// Hash-DRBG context over SHA-256.
pub struct HashDrbg {
    strength: SecurityStrength,
    reseed_interval: u64,
    state: Option<HashState>,
}

impl HashDrbg {
    /// Create an uninstantiated Hash-DRBG at the given strength.
    pub fn new(strength: SecurityStrength) -> Self {
        HashDrbg {
            strength,
            reseed_interval: MAX_RESEED_INTERVAL,
            state: None,
        }
    }

    /// Create an uninstantiated Hash-DRBG, rounding `requested` bits up to
    /// the next supported strength.
    pub fn with_strength_bits(requested: u32) -> Result<Self, DrbgError> {
        Ok(Self::new(SecurityStrength::from_requested(requested)?))
    }

    /// Lower the reseed interval (1..=10000 generate requests).
    pub fn with_reseed_interval(mut self, interval: u64) -> Result<Self, DrbgError> {
        self.reseed_interval = check_reseed_interval(interval, MAX_RESEED_INTERVAL)?;
        Ok(self)
    }

    /// Create and instantiate from the system entropy source.
    ///
    /// Draws `1.5 * strength` bits: entropy input followed by the nonce.
    pub fn from_system_entropy(
        strength: SecurityStrength,
        personalization: &[u8],
    ) -> Result<Self, DrbgError> {
        let mut drbg = Self::new(strength);
        let seed = entropy::system_entropy(entropy::entropy_with_nonce_len(strength))?;
        drbg.instantiate(&seed, personalization)?;
        Ok(drbg)
    }
}

impl Drbg for HashDrbg {
    fn mechanism(&self) -> DrbgMechanism {
        DrbgMechanism::Hash
    }

    fn security_strength(&self) -> SecurityStrength {
        self.strength
    }

    fn limits(&self) -> DrbgLimits {
        DrbgLimits {
            min_entropy_len: self.strength.bytes(),
            max_entropy_len: MAX_ENTROPY_LEN,
            max_personalization_len: MAX_INPUT_LEN,
            max_additional_input_len: MAX_INPUT_LEN,
            max_request_bits: MAX_REQUEST_BITS,
            reseed_interval: self.reseed_interval,
        }
    }

    fn reseed_counter(&self) -> Option<u64> {
        self.state.as_ref().map(|s| s.reseed_counter)
    }

    fn instantiate(&mut self, entropy: &[u8], personalization: &[u8]) -> Result<(), DrbgError> {
        let limits = self.limits();
        limits.check_entropy(entropy.len())?;
        limits.check_personalization(personalization.len())?;

        self.state = Some(HashState::instantiate(&[entropy, personalization]));
        log::debug!(
            "{}: instantiated at {} ({} bytes entropy)",
            DrbgMechanism::Hash,
            self.strength,
            entropy.len()
        );
        Ok(())
    }

    fn reseed(&mut self, entropy: &[u8], additional_input: &[u8]) -> Result<(), DrbgError> {
        let limits = self.limits();
        let state = self.state.as_mut().ok_or(DrbgError::NotInstantiated)?;
        limits.check_entropy(entropy.len())?;
        limits.check_additional_input(additional_input.len())?;

        let mut seed_material = Zeroizing::new(Vec::with_capacity(entropy.len() + additional_input.len()));
        seed_material.extend_from_slice(entropy);
        seed_material.extend_from_slice(additional_input);
        state.update(&seed_material);
        state.reseed_counter = 1;

        log::debug!("{}: reseeded", DrbgMechanism::Hash);
        Ok(())
    }

    fn generate_into(&mut self, out: &mut [u8], additional_input: &[u8]) -> Result<(), DrbgError> {
        let limits = self.limits();
        let zero_block_len = self.strength.bytes();
        let state = self.state.as_mut().ok_or(DrbgError::NotInstantiated)?;
        limits.check_request(out.len())?;
        limits.check_additional_input(additional_input.len())?;
        limits.check_counter(DrbgMechanism::Hash, state.reseed_counter)?;

        if !additional_input.is_empty() {
            state.update(additional_input);
        }

        for chunk in out.chunks_mut(OUT_LEN) {
            state.v = sha256(&[&state.v]);
            chunk.copy_from_slice(&state.v[..chunk.len()]);
        }

        if additional_input.is_empty() {
            state.update(&[0u8; OUT_LEN][..zero_block_len]);
        } else {
            state.update(additional_input);
        }
        state.reseed_counter += 1;

        log::trace!(
            "{}: generated {} bytes, reseed counter {}",
            DrbgMechanism::Hash,
            out.len(),
            state.reseed_counter
        );
        Ok(())
    }
}
