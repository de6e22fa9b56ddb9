use std::fmt;
use std::str::FromStr;

use crate::error::DrbgError;

/// DRBG mechanism identifiers (NIST SP 800-90A Section 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrbgMechanism {
    /// Hash-DRBG over SHA-256.
    Hash,
    /// HMAC-DRBG over HMAC-SHA-256.
    Hmac,
    /// CTR-DRBG over AES.
    Ctr,
}

impl DrbgMechanism {
    /// Short lowercase name, as used in log output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hash => "hash-drbg",
            Self::Hmac => "hmac-drbg",
            Self::Ctr => "ctr-drbg",
        }
    }
}

impl fmt::Display for DrbgMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Supported security strengths (SP 800-57 Part 1, Table 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecurityStrength {
    Bits112,
    Bits128,
    Bits192,
    Bits256,
}

impl SecurityStrength {
    /// Select the lowest supported strength that is at least `requested` bits.
    ///
    /// Requests above 256 bits cannot be satisfied by any mechanism here.
    pub fn from_requested(requested: u32) -> Result<Self, DrbgError> {
        match requested {
            0..=112 => Ok(Self::Bits112),
            113..=128 => Ok(Self::Bits128),
            129..=192 => Ok(Self::Bits192),
            193..=256 => Ok(Self::Bits256),
            _ => Err(DrbgError::UnsupportedStrength { requested }),
        }
    }

    /// Strength in bits.
    pub fn bits(self) -> u32 {
        match self {
            Self::Bits112 => 112,
            Self::Bits128 => 128,
            Self::Bits192 => 192,
            Self::Bits256 => 256,
        }
    }

    /// Strength in bytes (112 bits rounds to 14 bytes exactly).
    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }
}

impl fmt::Display for SecurityStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.bits())
    }
}

impl TryFrom<u32> for SecurityStrength {
    type Error = DrbgError;

    fn try_from(requested: u32) -> Result<Self, Self::Error> {
        Self::from_requested(requested)
    }
}

/// Block cipher selection for CTR-DRBG (SP 800-90A Table 3).
///
/// The output block is 128 bits for every AES variant; only the key
/// length differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CtrCipher {
    Aes128,
    Aes192,
    Aes256,
}

impl CtrCipher {
    /// AES output block length in bytes.
    pub const BLOCK_LEN: usize = 16;

    /// Key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Seed length in bytes: `(outlen + keylen) / 8`.
    pub fn seed_len(self) -> usize {
        self.key_len() + Self::BLOCK_LEN
    }

    /// Security strength provided by this key length.
    pub fn security_strength(self) -> SecurityStrength {
        match self {
            Self::Aes128 => SecurityStrength::Bits128,
            Self::Aes192 => SecurityStrength::Bits192,
            Self::Aes256 => SecurityStrength::Bits256,
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Aes128 => "aes128",
            Self::Aes192 => "aes192",
            Self::Aes256 => "aes256",
        }
    }
}

impl fmt::Display for CtrCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CtrCipher {
    type Err = DrbgError;

    /// Parse `aes128`, `aes192` or `aes256`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aes128" => Ok(Self::Aes128),
            "aes192" => Ok(Self::Aes192),
            "aes256" => Ok(Self::Aes256),
            _ => Err(DrbgError::UnknownCipher(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_rounds_up() {
        assert_eq!(SecurityStrength::from_requested(0).unwrap(), SecurityStrength::Bits112);
        assert_eq!(SecurityStrength::from_requested(112).unwrap(), SecurityStrength::Bits112);
        assert_eq!(SecurityStrength::from_requested(113).unwrap(), SecurityStrength::Bits128);
        assert_eq!(SecurityStrength::from_requested(160).unwrap(), SecurityStrength::Bits192);
        assert_eq!(SecurityStrength::from_requested(256).unwrap(), SecurityStrength::Bits256);
    }

    #[test]
    fn test_strength_above_256_rejected() {
        assert!(matches!(
            SecurityStrength::from_requested(257),
            Err(DrbgError::UnsupportedStrength { requested: 257 })
        ));
        assert!(SecurityStrength::try_from(512).is_err());
    }

    #[test]
    fn test_strength_bytes() {
        assert_eq!(SecurityStrength::Bits112.bytes(), 14);
        assert_eq!(SecurityStrength::Bits256.bytes(), 32);
        assert!(SecurityStrength::Bits128 < SecurityStrength::Bits192);
    }

    #[test]
    fn test_cipher_lengths() {
        assert_eq!(CtrCipher::Aes128.seed_len(), 32);
        assert_eq!(CtrCipher::Aes192.seed_len(), 40);
        assert_eq!(CtrCipher::Aes256.seed_len(), 48);
        assert_eq!(CtrCipher::Aes192.security_strength(), SecurityStrength::Bits192);
    }

    #[test]
    fn test_cipher_parse_case_insensitive() {
        assert_eq!("AES256".parse::<CtrCipher>().unwrap(), CtrCipher::Aes256);
        assert_eq!("Aes192".parse::<CtrCipher>().unwrap(), CtrCipher::Aes192);
        assert_eq!("aes128".parse::<CtrCipher>().unwrap(), CtrCipher::Aes128);
        assert!(matches!(
            "tdea".parse::<CtrCipher>(),
            Err(DrbgError::UnknownCipher(name)) if name == "tdea"
        ));
    }
}
