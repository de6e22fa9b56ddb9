#![doc = "Deterministic random bit generators (NIST SP 800-90A) for nistdrbg."]
//!
//! The block cipher and hash primitives stay inside the crate; only the
//! DRBG lifecycle is public.
//!
//! ```compile_fail
//! let key = nistdrbg::aes::AesKey::new(&[0u8; 16]).unwrap();
//! ```
//!
//! ```compile_fail
//! let digest = nistdrbg::sha2::sha256(&[b"abc"]);
//! ```
#![forbid(unsafe_code)]

// Primitives, internal to the mechanisms
mod aes;
mod bytes;
mod hmac;
mod provider;
mod sha2;

// DRBG mechanisms and the shared lifecycle surface
pub mod drbg;

// Entropy acquisition for the `from_system_entropy` constructors
pub mod entropy;

#[cfg(feature = "self-test")]
pub mod selftest;

pub use drbg::{Drbg, DrbgLimits, DrbgStatus};
#[cfg(feature = "ctr-drbg")]
pub use drbg::CtrDrbg;
#[cfg(feature = "hash-drbg")]
pub use drbg::HashDrbg;
#[cfg(feature = "hmac-drbg")]
pub use drbg::HmacDrbg;
pub use nistdrbg_types::{
    CryptoError, CtrCipher, DrbgError, DrbgMechanism, InputKind, SecurityStrength, SelfTestError,
};
