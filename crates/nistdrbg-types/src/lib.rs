#![forbid(unsafe_code)]
#![doc = "Common types, error codes and algorithm identifiers for nistdrbg."]

pub mod algorithm;
pub mod error;

pub use algorithm::*;
pub use error::*;
