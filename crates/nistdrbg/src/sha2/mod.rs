//! SHA-256 (FIPS 180-4), the hash function behind Hash-DRBG.
//!
//! The compression function comes from the RustCrypto `sha2` crate. The
//! multi-part helper lets the DRBG update steps hash `V ‖ 0x01 ‖ data`
//! without building the concatenation first.

use ::sha2::Digest as _;

/// SHA-256 output size in bytes.
pub(crate) const SHA256_OUTPUT_SIZE: usize = 32;

/// Hash the concatenation of `parts`: `SHA-256(parts[0] ‖ parts[1] ‖ …)`.
pub(crate) fn sha256(parts: &[&[u8]]) -> [u8; SHA256_OUTPUT_SIZE] {
    let mut ctx = ::sha2::Sha256::new();
    for part in parts {
        ctx.update(part);
    }
    ctx.finalize().into()
}
