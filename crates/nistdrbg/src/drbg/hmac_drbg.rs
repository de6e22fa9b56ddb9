//! HMAC-DRBG (Deterministic Random Bit Generator) implementation.
//!
//! Provides cryptographic random number generation based on NIST SP 800-90A
//! Section 10.1.2 using HMAC-SHA-256 as the underlying primitive.

use nistdrbg_types::{DrbgError, DrbgMechanism, SecurityStrength};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{check_reseed_interval, Drbg, DrbgLimits, MAX_ENTROPY_LEN};
use crate::entropy;
use crate::hmac::{hmac_sha256, HMAC_SHA256_SIZE};

/// Maximum number of generate requests before reseed is required.
pub const MAX_RESEED_INTERVAL: u64 = 10_000;

/// Maximum output of one generate request, in bits.
pub const MAX_REQUEST_BITS: u64 = 7500;

/// Maximum personalization string / additional input length (256 bits).
pub const MAX_INPUT_LEN: usize = 32;

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct HmacState {
    /// HMAC key K (32 bytes).
    k: [u8; HMAC_SHA256_SIZE],
    /// HMAC value V (32 bytes).
    v: [u8; HMAC_SHA256_SIZE],
    /// Number of generate requests since last (re)seed, plus one.
    reseed_counter: u64,
}

impl HmacState {
    /// HMAC-DRBG Update function (SP 800-90A Section 10.1.2.2).
    fn update(&mut self, provided_data: &[u8]) -> Result<(), DrbgError> {
        // K = HMAC(K, V || 0x00 || provided_data)
        self.k = hmac_sha256(&self.k, &[&self.v, &[0x00], provided_data])?;
        // V = HMAC(K, V)
        self.v = hmac_sha256(&self.k, &[&self.v])?;

        if !provided_data.is_empty() {
            // K = HMAC(K, V || 0x01 || provided_data)
            self.k = hmac_sha256(&self.k, &[&self.v, &[0x01], provided_data])?;
            // V = HMAC(K, V)
            self.v = hmac_sha256(&self.k, &[&self.v])?;
        }
        Ok(())
    }
}

/// HMAC-DRBG context using SHA-256.
pub struct HmacDrbg {
    strength: SecurityStrength,
    reseed_interval: u64,
    state: Option<HmacState>,
}

impl HmacDrbg {
    /// Create an uninstantiated HMAC-DRBG at the given strength.
    pub fn new(strength: SecurityStrength) -> Self {
        HmacDrbg {
            strength,
            reseed_interval: MAX_RESEED_INTERVAL,
            state: None,
        }
    }

    /// Create an uninstantiated HMAC-DRBG, rounding `requested` bits up to
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

    /// Generate `num_bytes` with an explicit security strength request.
    ///
    /// Fails with [`DrbgError::StrengthNotSupported`] if `requested_strength`
    /// (in bits) is above the instantiated strength.
    pub fn generate_with_strength(
        &mut self,
        num_bytes: usize,
        requested_strength: u32,
        additional_input: &[u8],
    ) -> Result<Vec<u8>, DrbgError> {
        let mut out = vec![0u8; num_bytes];
        self.generate_checked(&mut out, requested_strength, additional_input)?;
        Ok(out)
    }

    /// Generate pseudorandom bytes (SP 800-90A Section 10.1.2.5).
    fn generate_checked(
        &mut self,
        output: &mut [u8],
        requested_strength: u32,
        additional_input: &[u8],
    ) -> Result<(), DrbgError> {
        let limits = self.limits();
        let instantiated = self.strength.bits();
        let state = self.state.as_mut().ok_or(DrbgError::NotInstantiated)?;
        if requested_strength > instantiated {
            return Err(DrbgError::StrengthNotSupported {
                requested: requested_strength,
                instantiated,
            });
        }
        limits.check_request(output.len())?;
        limits.check_additional_input(additional_input.len())?;
        limits.check_counter(DrbgMechanism::Hmac, state.reseed_counter)?;

        let mut next = state.clone();
        if !additional_input.is_empty() {
            next.update(additional_input)?;
        }

        for chunk in output.chunks_mut(HMAC_SHA256_SIZE) {
            next.v = hmac_sha256(&next.k, &[&next.v])?;
            chunk.copy_from_slice(&next.v[..chunk.len()]);
        }

        next.update(additional_input)?;
        next.reseed_counter += 1;
        *state = next;

        log::trace!(
            "{}: generated {} bytes, reseed counter {}",
            DrbgMechanism::Hmac,
            output.len(),
            state.reseed_counter
        );
        Ok(())
    }
}

impl Drbg for HmacDrbg {
    fn mechanism(&self) -> DrbgMechanism {
        DrbgMechanism::Hmac
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

    /// Instantiate (SP 800-90A Section 10.1.2.3). `entropy` carries the
    /// nonce, if any.
    fn instantiate(&mut self, entropy: &[u8], personalization: &[u8]) -> Result<(), DrbgError> {
        let limits = self.limits();
        limits.check_entropy(entropy.len())?;
        limits.check_personalization(personalization.len())?;

        let mut seed_material = Zeroizing::new(Vec::with_capacity(entropy.len() + personalization.len()));
        seed_material.extend_from_slice(entropy);
        seed_material.extend_from_slice(personalization);

        let mut state = HmacState {
            k: [0x00; HMAC_SHA256_SIZE],
            v: [0x01; HMAC_SHA256_SIZE],
            reseed_counter: 1,
        };
        state.update(&seed_material)?;
        self.state = Some(state);

        log::debug!(
            "{}: instantiated at {} ({} bytes entropy)",
            DrbgMechanism::Hmac,
            self.strength,
            entropy.len()
        );
        Ok(())
    }

    /// Reseed (SP 800-90A Section 10.1.2.4).
    fn reseed(&mut self, entropy: &[u8], additional_input: &[u8]) -> Result<(), DrbgError> {
        let limits = self.limits();
        let state = self.state.as_mut().ok_or(DrbgError::NotInstantiated)?;
        limits.check_entropy(entropy.len())?;
        limits.check_additional_input(additional_input.len())?;

        let mut seed_material = Zeroizing::new(Vec::with_capacity(entropy.len() + additional_input.len()));
        seed_material.extend_from_slice(entropy);
        seed_material.extend_from_slice(additional_input);

        let mut next = state.clone();
        next.update(&seed_material)?;
        next.reseed_counter = 1;
        *state = next;

        log::debug!("{}: reseeded", DrbgMechanism::Hmac);
        Ok(())
    }

    fn generate_into(&mut self, out: &mut [u8], additional_input: &[u8]) -> Result<(), DrbgError> {
        let strength = self.strength.bits();
        self.generate_checked(out, strength, additional_input)
    }
}
