//! Capability trait for the block cipher CTR-DRBG is built on.
//!
//! The only implementation is [`crate::aes::AesKey`]. The trait fixes the
//! shape BCC and the counter-mode keystream rely on so both can also run
//! over `&dyn BlockCipher`.

use nistdrbg_types::CryptoError;

/// A block cipher used in the forward (encrypt) direction only.
///
/// CTR-DRBG and its derivation function never decrypt.
pub(crate) trait BlockCipher: Send + Sync {
    /// Encrypt a single block in-place.
    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError>;
}
