//! HMAC-SHA-256 (RFC 2104 / FIPS 198-1), the PRF behind HMAC-DRBG.
//!
//! HMAC(K, m) = H((K' XOR opad) || H((K' XOR ipad) || m))
//!
//! The construction comes from the RustCrypto `hmac` crate. The multi-part
//! helper feeds `V ‖ 0x00 ‖ data` to the MAC without concatenating.

use ::hmac::Mac as _;
use nistdrbg_types::CryptoError;

use crate::sha2::SHA256_OUTPUT_SIZE;

type HmacSha256 = ::hmac::Hmac<::sha2::Sha256>;

/// HMAC-SHA-256 output size in bytes.
pub(crate) const HMAC_SHA256_SIZE: usize = SHA256_OUTPUT_SIZE;

/// HMAC-SHA-256 over the concatenation of `parts`.
pub(crate) fn hmac_sha256(
    key: &[u8],
    parts: &[&[u8]],
) -> Result<[u8; HMAC_SHA256_SIZE], CryptoError> {
    let mut ctx = HmacSha256::new_from_slice(key)
        .map_err(|_| CryptoError::InvalidKeyLength { got: key.len() })?;
    for part in parts {
        ctx.update(part);
    }
    Ok(ctx.finalize().into_bytes().into())
}
