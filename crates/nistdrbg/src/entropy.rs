//! Entropy acquisition from the operating system.
//!
//! The DRBGs never collect entropy on their own; callers pass it to
//! `instantiate` and `reseed`. The `from_system_entropy` constructors use
//! this module to draw entropy and nonce from the OS CSPRNG
//! (`getrandom`), which is treated as a full-entropy source.

use nistdrbg_types::{DrbgError, SecurityStrength};
use zeroize::Zeroizing;

/// Read `len` bytes from the OS CSPRNG. The buffer is wiped on drop.
pub fn system_entropy(len: usize) -> Result<Zeroizing<Vec<u8>>, DrbgError> {
    let mut buf = Zeroizing::new(vec![0u8; len]);
    getrandom::getrandom(&mut buf[..]).map_err(|e| {
        log::error!("entropy: getrandom failed: {e}");
        DrbgError::EntropyUnavailable
    })?;
    Ok(buf)
}

/// Entropy plus nonce length for the hash-based mechanisms: the full
/// strength for entropy, half of it again for the nonce.
pub fn entropy_with_nonce_len(strength: SecurityStrength) -> usize {
    strength.bytes() + strength.bytes() / 2
}
