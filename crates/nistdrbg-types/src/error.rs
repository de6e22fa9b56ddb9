use std::fmt;

/// Cryptographic primitive errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    #[error("invalid argument")]
    InvalidArg,
    #[error("invalid key length: got {got}")]
    InvalidKeyLength { got: usize },
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("buffer length not enough: need {need}, got {got}")]
    BufferTooSmall { need: usize, got: usize },
    #[error("input length {len} is not a multiple of the {block} byte block size")]
    NotBlockAligned { len: usize, block: usize },
    #[error("value does not fit in {width} bytes")]
    IntegerOverflow { width: usize },
}

/// Caller-supplied input that a DRBG validates before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Entropy,
    Personalization,
    AdditionalInput,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Entropy => "entropy input",
            Self::Personalization => "personalization string",
            Self::AdditionalInput => "additional input",
        })
    }
}

/// DRBG lifecycle errors.
///
/// Every variant is returned before the DRBG state is touched, so the
/// caller may correct the input (or reseed) and retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrbgError {
    // Configuration errors
    #[error("drbg: requested security strength {requested} exceeds 256 bits")]
    UnsupportedStrength { requested: u32 },
    #[error("drbg: unknown cipher {0:?}")]
    UnknownCipher(String),
    #[error("drbg: reseed interval must be in 1..={max}, got {requested}")]
    InvalidReseedInterval { requested: u64, max: u64 },

    // Input length errors
    #[error("drbg: {kind} length {len} bytes outside {min}..={max}")]
    InputLength {
        kind: InputKind,
        len: usize,
        min: usize,
        max: usize,
    },

    // Request errors
    #[error("drbg: request of {requested_bits} bits exceeds {max_bits} bits per call")]
    RequestTooLarge { requested_bits: u64, max_bits: u64 },
    #[error("drbg: requested strength {requested} exceeds instantiated strength {instantiated}")]
    StrengthNotSupported { requested: u32, instantiated: u32 },
    #[error("drbg: reseed required")]
    ReseedRequired,
    #[error("drbg: not instantiated")]
    NotInstantiated,

    // Derivation function
    #[error("drbg: derivation function cannot return {requested_bits} bits (max {max_bits})")]
    DerivationTooLong { requested_bits: usize, max_bits: usize },
    #[error("drbg: derivation function output of {requested_bits} bits is not a whole number of bytes")]
    DerivationNotByteAligned { requested_bits: usize },

    #[error("drbg: failed to obtain entropy")]
    EntropyUnavailable,
    #[error("drbg: crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl DrbgError {
    /// True for errors a caller fixes by changing construction parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedStrength { .. }
                | Self::UnknownCipher(_)
                | Self::InvalidReseedInterval { .. }
        )
    }
}

/// Known-answer self-test errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelfTestError {
    #[error("self-test {name}: output mismatch")]
    KatMismatch { name: &'static str },
    #[error("self-test {name}: malformed test vector")]
    InvalidVector { name: &'static str },
    #[error("self-test {name}: {source}")]
    Drbg {
        name: &'static str,
        #[source]
        source: DrbgError,
    },
    #[error("self-test {name}: expected failure was not reported")]
    MissingFailure { name: &'static str },
}
