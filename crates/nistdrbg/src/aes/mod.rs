//! AES (FIPS 197) block cipher provider for CTR-DRBG.
//!
//! Exposes the closed set AES-128/192/256 as [`AesKey`], encryption
//! direction only, plus [`CtrKeystream`], the counter-mode keystream that
//! both the CTR-DRBG update function and its output loop are built on. The
//! round function comes from the RustCrypto `aes` crate.

use ::aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use nistdrbg_types::{CryptoError, CtrCipher};

use crate::provider::BlockCipher;

/// AES block size in bytes (128 bits).
pub(crate) const AES_BLOCK_SIZE: usize = 16;

/// An expanded AES encryption key.
///
/// Round keys are wiped on drop by the underlying implementation.
#[derive(Clone)]
pub(crate) enum AesKey {
    Aes128(::aes::Aes128Enc),
    Aes192(::aes::Aes192Enc),
    Aes256(::aes::Aes256Enc),
}

impl AesKey {
    /// Create a new AES key from raw bytes.
    ///
    /// Accepts 16, 24, or 32-byte keys for AES-128, AES-192, and AES-256.
    pub(crate) fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let invalid = |_| CryptoError::InvalidKeyLength { got: key.len() };
        match key.len() {
            16 => Ok(Self::Aes128(::aes::Aes128Enc::new_from_slice(key).map_err(invalid)?)),
            24 => Ok(Self::Aes192(::aes::Aes192Enc::new_from_slice(key).map_err(invalid)?)),
            32 => Ok(Self::Aes256(::aes::Aes256Enc::new_from_slice(key).map_err(invalid)?)),
            got => Err(CryptoError::InvalidKeyLength { got }),
        }
    }

    /// Create a key for `cipher`, rejecting a key of any other length.
    pub(crate) fn for_cipher(cipher: CtrCipher, key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != cipher.key_len() {
            return Err(CryptoError::InvalidKeyLength { got: key.len() });
        }
        Self::new(key)
    }

    /// Encrypt one block held in a fixed-size array.
    pub(crate) fn encrypt(&self, block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
        let mut out = GenericArray::clone_from_slice(block);
        match self {
            Self::Aes128(c) => c.encrypt_block(&mut out),
            Self::Aes192(c) => c.encrypt_block(&mut out),
            Self::Aes256(c) => c.encrypt_block(&mut out),
        }
        let mut result = [0u8; AES_BLOCK_SIZE];
        result.copy_from_slice(&out);
        result
    }
}

impl BlockCipher for AesKey {
    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        let input: &[u8; AES_BLOCK_SIZE] =
            (&*block)
                .try_into()
                .map_err(|_| CryptoError::LengthMismatch {
                    expected: AES_BLOCK_SIZE,
                    got: block.len(),
                })?;
        let out = self.encrypt(input);
        block.copy_from_slice(&out);
        Ok(())
    }
}

/// Counter-mode keystream over a 128-bit block cipher.
///
/// Each block is `E(K, counter)`; the counter is incremented after every
/// block modulo 2^128, so `0xff…ff` is followed by `0x00…00`.
pub(crate) struct CtrKeystream<'a, C: BlockCipher + ?Sized> {
    cipher: &'a C,
    counter: u128,
}

impl<'a, C: BlockCipher + ?Sized> CtrKeystream<'a, C> {
    /// Start a keystream whose first block encrypts `counter`.
    pub(crate) fn new(cipher: &'a C, counter: u128) -> Self {
        Self { cipher, counter }
    }

    /// The counter value the next block will encrypt.
    pub(crate) fn counter(&self) -> u128 {
        self.counter
    }

    /// Produce the next keystream block.
    pub(crate) fn next_block(&mut self) -> Result<[u8; AES_BLOCK_SIZE], CryptoError> {
        let mut block = self.counter.to_be_bytes();
        self.cipher.encrypt_block(&mut block)?;
        self.counter = self.counter.wrapping_add(1);
        Ok(block)
    }

    /// Fill `out` with keystream. A trailing partial block consumes a whole
    /// counter value.
    pub(crate) fn fill(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        for chunk in out.chunks_mut(AES_BLOCK_SIZE) {
            let block = self.next_block()?;
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    /// FIPS 197 Appendix C.1 (AES-128)
    #[test]
    fn aes128_fips197_appendix_c1() {
        let key: Vec<u8> = (0u8..16).collect();
        let aes = AesKey::new(&key).unwrap();
        let mut block = hex("00112233445566778899aabbccddeeff");
        aes.encrypt_block(&mut block).unwrap();
        assert_eq!(block, hex("69c4e0d86a7b0430d8cdb78070b4c55a"));
    }

    /// FIPS 197 Appendix C.2 (AES-192)
    #[test]
    fn aes192_fips197_appendix_c2() {
        let key: Vec<u8> = (0u8..24).collect();
        let aes = AesKey::new(&key).unwrap();
        assert!(matches!(aes, AesKey::Aes192(_)));
        let mut block = hex("00112233445566778899aabbccddeeff");
        aes.encrypt_block(&mut block).unwrap();
        assert_eq!(block, hex("dda97ca4864cdfe06eaf70a0ec0d7191"));
    }

    /// FIPS 197 Appendix C.3 (AES-256)
    #[test]
    fn aes256_fips197_appendix_c3() {
        let key: Vec<u8> = (0u8..32).collect();
        let aes = AesKey::new(&key).unwrap();
        let pt: [u8; 16] = hex("00112233445566778899aabbccddeeff").try_into().unwrap();
        assert_eq!(aes.encrypt(&pt).to_vec(), hex("8ea2b7ca516745bfeafc49904b496089"));
    }

    #[test]
    fn invalid_key_length_rejected() {
        assert!(AesKey::new(&[0u8; 15]).is_err());
        assert!(AesKey::new(&[0u8; 0]).is_err());
        assert!(matches!(
            AesKey::new(&[0u8; 33]),
            Err(CryptoError::InvalidKeyLength { got: 33 })
        ));
        assert!(AesKey::for_cipher(CtrCipher::Aes192, &[0u8; 32]).is_err());
        assert!(matches!(
            AesKey::for_cipher(CtrCipher::Aes256, &[0u8; 32]),
            Ok(AesKey::Aes256(_))
        ));
    }

    #[test]
    fn invalid_block_size_rejected() {
        let aes = AesKey::new(&[0u8; 16]).unwrap();
        let mut short = [0u8; 8];
        assert!(aes.encrypt_block(&mut short).is_err());
        let mut long = [0u8; 32];
        assert!(aes.encrypt_block(&mut long).is_err());
    }

    #[test]
    fn keystream_encrypts_counter_then_increments() {
        let aes = AesKey::new(&[0x42u8; 16]).unwrap();
        let mut ks = CtrKeystream::new(&aes, 7);

        let first = ks.next_block().unwrap();
        assert_eq!(first, aes.encrypt(&7u128.to_be_bytes()));
        assert_eq!(ks.counter(), 8);

        let mut ks = CtrKeystream::new(&aes, 100);
        let mut out = [0u8; 20];
        ks.fill(&mut out).unwrap();
        assert_eq!(&out[..16], &aes.encrypt(&100u128.to_be_bytes()));
        assert_eq!(&out[16..], &aes.encrypt(&101u128.to_be_bytes())[..4]);
        assert_eq!(ks.counter(), 102);
    }

    #[test]
    fn keystream_counter_wraps() {
        let aes = AesKey::new(&[0u8; 32]).unwrap();
        let mut ks = CtrKeystream::new(&aes, u128::MAX);

        let last = ks.next_block().unwrap();
        assert_eq!(last, aes.encrypt(&[0xff; 16]));
        assert_eq!(ks.counter(), 0);

        let wrapped = ks.next_block().unwrap();
        assert_eq!(wrapped, aes.encrypt(&[0u8; 16]));
        assert_eq!(ks.counter(), 1);
    }

    #[test]
    fn keystream_over_trait_object() {
        let aes = AesKey::new(&[0x01u8; 24]).unwrap();
        let cipher: &dyn BlockCipher = &aes;
        let mut ks = CtrKeystream::new(cipher, 0);
        assert_eq!(ks.next_block().unwrap(), aes.encrypt(&[0u8; 16]));
    }
}
