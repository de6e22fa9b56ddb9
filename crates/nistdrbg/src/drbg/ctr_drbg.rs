//! CTR-DRBG (Counter-mode Deterministic Random Bit Generator).
//!
//! Implements NIST SP 800-90A Section 10.2 over AES-128, AES-192 or AES-256.
//! Supports both direct instantiation (without derivation function), where
//! entropy input is exactly `seedlen` bytes, and instantiation with
//! Block_Cipher_df for variable-length inputs.

use std::str::FromStr;

use nistdrbg_types::{CryptoError, CtrCipher, DrbgError, DrbgMechanism, SecurityStrength};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{check_reseed_interval, Drbg, DrbgLimits, MAX_ENTROPY_LEN};
use crate::aes::{AesKey, CtrKeystream, AES_BLOCK_SIZE};
use crate::bytes::{bytes_to_uint_be, pad_right, uint_to_bytes_be, xor, xor_in_place};
use crate::entropy;
use crate::provider::BlockCipher;

/// Maximum number of generate requests before reseed is required.
pub const MAX_RESEED_INTERVAL: u64 = 100_000;

/// Maximum output of one generate request, in bits.
pub const MAX_REQUEST_BITS: u64 = 1 << 12;

/// Maximum output of Block_Cipher_df, in bits.
pub const MAX_DF_BITS: usize = 512;

const BLOCK_LEN: usize = AES_BLOCK_SIZE;

/// BCC (SP 800-90A §10.3.3): CBC-MAC with a zero IV.
///
/// `data` must be a whole number of blocks.
pub(crate) fn bcc<C: BlockCipher + ?Sized>(cipher: &C, data: &[u8]) -> Result<[u8; BLOCK_LEN], DrbgError> {
    if data.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::NotBlockAligned {
            len: data.len(),
            block: BLOCK_LEN,
        }
        .into());
    }
    let mut chaining = [0u8; BLOCK_LEN];
    for block in data.chunks_exact(BLOCK_LEN) {
        xor_in_place(&mut chaining, block);
        cipher.encrypt_block(&mut chaining)?;
    }
    Ok(chaining)
}

/// Block_Cipher_df (SP 800-90A §10.3.2).
///
/// Derives `num_bits / 8` bytes from `input` under `cipher`. Requests above
/// 512 bits return [`DrbgError::DerivationTooLong`]; a bit count that is not
/// a whole number of bytes returns [`DrbgError::DerivationNotByteAligned`].
pub fn block_cipher_df(cipher: CtrCipher, input: &[u8], num_bits: usize) -> Result<Vec<u8>, DrbgError> {
    if num_bits > MAX_DF_BITS {
        return Err(DrbgError::DerivationTooLong {
            requested_bits: num_bits,
            max_bits: MAX_DF_BITS,
        });
    }
    if num_bits % 8 != 0 {
        return Err(DrbgError::DerivationNotByteAligned {
            requested_bits: num_bits,
        });
    }
    let out_len = num_bits / 8;
    let key_len = cipher.key_len();

    // S = L || N || input_string || 0x80, zero padded to a block multiple
    let mut s = Zeroizing::new(Vec::with_capacity(8 + input.len() + BLOCK_LEN));
    s.extend_from_slice(&uint_to_bytes_be(input.len() as u128, 4)?);
    s.extend_from_slice(&uint_to_bytes_be(out_len as u128, 4)?);
    s.extend_from_slice(input);
    s.push(0x80);
    let padded = s.len().next_multiple_of(BLOCK_LEN);
    s.resize(padded, 0);

    // K = leftmost(0x00010203..., keylen)
    let k: Vec<u8> = (0..key_len as u8).collect();
    let df_key = AesKey::for_cipher(cipher, &k)?;

    let mut temp = Zeroizing::new(Vec::with_capacity(key_len + 2 * BLOCK_LEN));
    let mut iv_s = Zeroizing::new(Vec::with_capacity(BLOCK_LEN + s.len()));
    let mut i: u128 = 0;
    while temp.len() < key_len + BLOCK_LEN {
        iv_s.clear();
        iv_s.extend_from_slice(&uint_to_bytes_be(i, 4)?);
        iv_s.extend_from_slice(&[0u8; BLOCK_LEN - 4]);
        iv_s.extend_from_slice(&s);
        temp.extend_from_slice(&bcc(&df_key, &iv_s)?);
        i += 1;
    }

    let key = AesKey::for_cipher(cipher, &temp[..key_len])?;
    let mut x = [0u8; BLOCK_LEN];
    x.copy_from_slice(&temp[key_len..key_len + BLOCK_LEN]);

    let mut out = Vec::with_capacity(out_len + BLOCK_LEN);
    while out.len() < out_len {
        x = key.encrypt(&x);
        out.extend_from_slice(&x);
    }
    out.truncate(out_len);
    x.zeroize();
    Ok(out)
}

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct CtrState {
    /// Block cipher key (keylen bytes).
    key: Vec<u8>,
    /// Counter block V.
    v: u128,
    /// Number of generate requests since last (re)seed, plus one.
    reseed_counter: u64,
}

impl CtrState {
    /// CTR-DRBG Update function (SP 800-90A §10.2.1.2).
    ///
    /// `provided_data` must be exactly `seedlen` bytes.
    fn update(&mut self, provided_data: &[u8]) -> Result<(), DrbgError> {
        let key_len = self.key.len();
        let aes = AesKey::new(&self.key)?;

        let mut temp = Zeroizing::new(vec![0u8; key_len + BLOCK_LEN]);
        CtrKeystream::new(&aes, self.v.wrapping_add(1)).fill(&mut temp)?;
        xor_in_place(&mut temp, provided_data);

        self.key.copy_from_slice(&temp[..key_len]);
        self.v = bytes_to_uint_be(&temp[key_len..])?;
        Ok(())
    }
}

/// CTR-DRBG context over AES.
pub struct CtrDrbg {
    cipher: CtrCipher,
    use_df: bool,
    reseed_interval: u64,
    state: Option<CtrState>,
}

impl CtrDrbg {
    /// Create an uninstantiated CTR-DRBG without derivation function.
    ///
    /// Entropy input must be exactly `seedlen` bytes.
    pub fn new(cipher: CtrCipher) -> Self {
        CtrDrbg {
            cipher,
            use_df: false,
            reseed_interval: MAX_RESEED_INTERVAL,
            state: None,
        }
    }

    /// Create an uninstantiated CTR-DRBG that runs all seed material
    /// through Block_Cipher_df.
    pub fn with_df(cipher: CtrCipher) -> Self {
        CtrDrbg {
            use_df: true,
            ..Self::new(cipher)
        }
    }

    /// Create a CTR-DRBG (no df) from a cipher name: `aes128`, `aes192`
    /// or `aes256`, case-insensitive.
    pub fn from_cipher_name(name: &str) -> Result<Self, DrbgError> {
        Ok(Self::new(CtrCipher::from_str(name)?))
    }

    /// Lower the reseed interval (1..=100000 generate requests).
    pub fn with_reseed_interval(mut self, interval: u64) -> Result<Self, DrbgError> {
        self.reseed_interval = check_reseed_interval(interval, MAX_RESEED_INTERVAL)?;
        Ok(self)
    }

    /// Create and instantiate (no df) from the system entropy source.
    pub fn from_system_entropy(cipher: CtrCipher, personalization: &[u8]) -> Result<Self, DrbgError> {
        let mut drbg = Self::new(cipher);
        let seed = entropy::system_entropy(cipher.seed_len())?;
        drbg.instantiate(&seed, personalization)?;
        Ok(drbg)
    }

    /// The block cipher this instance runs on.
    pub fn cipher(&self) -> CtrCipher {
        self.cipher
    }

    /// True if seed material goes through Block_Cipher_df.
    pub fn uses_df(&self) -> bool {
        self.use_df
    }

    /// Turn `entropy` and an optional input string into `seedlen` bytes of
    /// seed material.
    fn seed_material(&self, entropy: &[u8], extra: &[u8]) -> Result<Zeroizing<Vec<u8>>, DrbgError> {
        let seed_len = self.cipher.seed_len();
        if self.use_df {
            let mut input = Zeroizing::new(Vec::with_capacity(entropy.len() + extra.len()));
            input.extend_from_slice(entropy);
            input.extend_from_slice(extra);
            Ok(Zeroizing::new(block_cipher_df(self.cipher, &input, seed_len * 8)?))
        } else {
            let padded = Zeroizing::new(pad_right(extra, seed_len)?);
            Ok(Zeroizing::new(xor(entropy, &padded)))
        }
    }

    /// Additional input as fed to the update function: padded (no df) or
    /// derived (df) to `seedlen` bytes, all zeros when empty.
    fn additional_block(&self, additional_input: &[u8]) -> Result<Zeroizing<Vec<u8>>, DrbgError> {
        let seed_len = self.cipher.seed_len();
        if additional_input.is_empty() {
            return Ok(Zeroizing::new(vec![0u8; seed_len]));
        }
        if self.use_df {
            Ok(Zeroizing::new(block_cipher_df(self.cipher, additional_input, seed_len * 8)?))
        } else {
            Ok(Zeroizing::new(pad_right(additional_input, seed_len)?))
        }
    }
}

impl Drbg for CtrDrbg {
    fn mechanism(&self) -> DrbgMechanism {
        DrbgMechanism::Ctr
    }

    fn security_strength(&self) -> SecurityStrength {
        self.cipher.security_strength()
    }

    fn limits(&self) -> DrbgLimits {
        let seed_len = self.cipher.seed_len();
        let (min_entropy_len, max_entropy_len, max_input_len) = if self.use_df {
            (self.cipher.key_len(), MAX_ENTROPY_LEN, MAX_ENTROPY_LEN)
        } else {
            (seed_len, seed_len, seed_len)
        };
        DrbgLimits {
            min_entropy_len,
            max_entropy_len,
            max_personalization_len: max_input_len,
            max_additional_input_len: max_input_len,
            max_request_bits: MAX_REQUEST_BITS,
            reseed_interval: self.reseed_interval,
        }
    }

    fn reseed_counter(&self) -> Option<u64> {
        self.state.as_ref().map(|s| s.reseed_counter)
    }

    /// Instantiate (SP 800-90A §10.2.1.3). With df, `entropy` carries the
    /// nonce.
    fn instantiate(&mut self, entropy: &[u8], personalization: &[u8]) -> Result<(), DrbgError> {
        let limits = self.limits();
        limits.check_entropy(entropy.len())?;
        limits.check_personalization(personalization.len())?;

        let seed_material = self.seed_material(entropy, personalization)?;
        let mut state = CtrState {
            key: vec![0u8; self.cipher.key_len()],
            v: 0,
            reseed_counter: 1,
        };
        state.update(&seed_material)?;
        self.state = Some(state);

        log::debug!(
            "{}: instantiated with {} (df: {})",
            DrbgMechanism::Ctr,
            self.cipher,
            self.use_df
        );
        Ok(())
    }

    /// Reseed (SP 800-90A §10.2.1.4).
    fn reseed(&mut self, entropy: &[u8], additional_input: &[u8]) -> Result<(), DrbgError> {
        let limits = self.limits();
        if self.state.is_none() {
            return Err(DrbgError::NotInstantiated);
        }
        limits.check_entropy(entropy.len())?;
        limits.check_additional_input(additional_input.len())?;

        let seed_material = self.seed_material(entropy, additional_input)?;
        let state = self.state.as_mut().ok_or(DrbgError::NotInstantiated)?;
        let mut next = state.clone();
        next.update(&seed_material)?;
        next.reseed_counter = 1;
        *state = next;

        log::debug!("{}: reseeded", DrbgMechanism::Ctr);
        Ok(())
    }

    /// Generate (SP 800-90A §10.2.1.5).
    fn generate_into(&mut self, out: &mut [u8], additional_input: &[u8]) -> Result<(), DrbgError> {
        let limits = self.limits();
        let counter = self.reseed_counter().ok_or(DrbgError::NotInstantiated)?;
        limits.check_request(out.len())?;
        limits.check_additional_input(additional_input.len())?;
        limits.check_counter(DrbgMechanism::Ctr, counter)?;

        let adin = self.additional_block(additional_input)?;
        let state = self.state.as_mut().ok_or(DrbgError::NotInstantiated)?;
        let mut next = state.clone();
        if !additional_input.is_empty() {
            next.update(&adin)?;
        }

        {
            let aes = AesKey::new(&next.key)?;
            let mut keystream = CtrKeystream::new(&aes, next.v.wrapping_add(1));
            keystream.fill(out)?;
            next.v = keystream.counter().wrapping_sub(1);
        }

        next.update(&adin)?;
        next.reseed_counter += 1;
        *state = next;

        log::trace!(
            "{}: generated {} bytes, reseed counter {}",
            DrbgMechanism::Ctr,
            out.len(),
            state.reseed_counter
        );
        Ok(())
    }
}
