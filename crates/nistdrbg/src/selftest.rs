//! Known Answer Tests (KAT) for the DRBG mechanisms.
//!
//! Each KAT instantiates a mechanism with fixed inputs, generates twice and
//! compares the second output with the expected value from NIST CAVP (or a
//! pinned vector for Hash-DRBG). Comparison is constant-time.

use nistdrbg_types::{CtrCipher, DrbgError, SecurityStrength, SelfTestError};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::drbg::ctr_drbg::{block_cipher_df, MAX_DF_BITS};
use crate::drbg::{CtrDrbg, Drbg, HashDrbg, HmacDrbg};

/// Inputs for one instantiate / (reseed) / generate / generate run.
struct Kat {
    name: &'static str,
    entropy: &'static str,
    personalization: &'static str,
    reseed: Option<(&'static str, &'static str)>,
    additional_input: [&'static str; 2],
    expected: &'static str,
}

const HASH_DRBG_KAT: Kat = Kat {
    name: "Hash-DRBG SHA-256",
    entropy: "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f\
              999a9b9c9d9e9fa0a1a2a3a4a5a6a7a8",
    personalization: "",
    reseed: None,
    additional_input: ["", ""],
    expected: "f4995bc8e9fffcbf312dc746ab3efbb0fb7ae6c0159c04eaf3cb84bf5827404f",
};

const HMAC_DRBG_KAT: Kat = Kat {
    name: "HMAC-DRBG SHA-256",
    entropy: "cdb0d9117cc6dbc9ef9dcb06a97579841d72dc18b2d46a1cb61e314012bdf416\
              d0c0d01d156016d0eb6b7e9c7c3c8da8",
    personalization: "6f0fb9eab3f9ea7ab0a719bfa879bf0aaed683307fda0c6d73ce018b6e34faaa",
    reseed: Some((
        "8ec6f7d5a8e2e88f43986f70b86e050d07c84b931bcf18e601c5a3eee3064c82",
        "1ab4ca9014fa98a55938316de8ba5a68c629b0741bdd058c4d70c91cda5099b3",
    )),
    additional_input: [
        "16e2d0721b58d839a122852abd3bf2c942a31c84d82fca74211871880d7162ff",
        "53686f042a7b087d5d2eca0d2a96de131f275ed7151189f7ca52deaa78b79fb2",
    ],
    expected: "dda04a2ca7b8147af1548f5d086591ca4fd951a345ce52b3cd49d47e84aa31a1\
               83e31fbc42a1ff1d95afec7143c8008c97bc2a9c091df0a763848391f68cb4a3\
               66ad89857ac725a53b303ddea767be8dc5f605b1b95f6d24c9f06be65a973a08\
               9320b3cc42569dcfd4b92b62a993785b0301b3fc452445656fce22664827b88f",
};

const CTR_DRBG_KAT: Kat = Kat {
    name: "CTR-DRBG AES-128",
    entropy: "ce50f33da5d4c1d3d4004eb35244b7f2cd7f2e5076fbf6780a7ff634b249a5fc",
    personalization: "",
    reseed: None,
    additional_input: ["", ""],
    expected: "6545c0529d372443b392ceb3ae3a99a30f963eaf313280f1d1a1e87f9db373d3\
               61e75d18018266499cccd64d9bbb8de0185f213383080faddec46bae1f784e5a",
};

const CTR_DRBG_DF_KAT: Kat = Kat {
    name: "CTR-DRBG AES-128 df",
    entropy: "890eb067acf7382eff80b0c73bc872c6aad471ef3ef1d203",
    personalization: "",
    reseed: None,
    additional_input: ["", ""],
    expected: "a5514ed7095f64f3d0d3a5760394ab42062f373a25072a6ea6bcfd8489e94af6\
               cf18659fea22ed1ca0a9e33f718b115ee536b12809c31b72b08ddd8be1910fa3",
};

/// Run all KAT self-tests. Returns on first failure.
pub fn run_self_tests() -> Result<(), SelfTestError> {
    kat_hash_drbg()?;
    kat_hmac_drbg()?;
    kat_ctr_drbg()?;
    kat_ctr_drbg_df()?;
    kat_df_length_cap()?;
    log::debug!("self-test: all known-answer tests passed");
    Ok(())
}

fn decode(name: &'static str, s: &str) -> Result<Zeroizing<Vec<u8>>, SelfTestError> {
    hex::decode(s)
        .map(Zeroizing::new)
        .map_err(|_| SelfTestError::InvalidVector { name })
}

fn run_kat(drbg: &mut dyn Drbg, kat: &Kat) -> Result<(), SelfTestError> {
    let name = kat.name;
    let wrap = |source: DrbgError| SelfTestError::Drbg { name, source };

    let expected = decode(name, kat.expected)?;
    drbg.instantiate(&decode(name, kat.entropy)?, &decode(name, kat.personalization)?)
        .map_err(wrap)?;
    if let Some((entropy, additional_input)) = kat.reseed {
        drbg.reseed(&decode(name, entropy)?, &decode(name, additional_input)?)
            .map_err(wrap)?;
    }

    // Generate #1 (discard)
    drbg.generate(expected.len(), &decode(name, kat.additional_input[0])?)
        .map_err(wrap)?;
    // Generate #2 (compare)
    let out = drbg
        .generate(expected.len(), &decode(name, kat.additional_input[1])?)
        .map_err(wrap)?;

    if !bool::from(out.ct_eq(&expected[..])) {
        log::error!("self-test: {name} output mismatch");
        return Err(SelfTestError::KatMismatch { name });
    }
    Ok(())
}

/// Hash-DRBG KAT (pinned vector, 256-bit strength).
fn kat_hash_drbg() -> Result<(), SelfTestError> {
    run_kat(&mut HashDrbg::new(SecurityStrength::Bits256), &HASH_DRBG_KAT)
}

/// HMAC-DRBG SHA-256 KAT (NIST CAVP, no prediction resistance, COUNT 0).
fn kat_hmac_drbg() -> Result<(), SelfTestError> {
    run_kat(&mut HmacDrbg::new(SecurityStrength::Bits256), &HMAC_DRBG_KAT)
}

/// CTR-DRBG AES-128 KAT without derivation function (NIST CAVP COUNT 0).
fn kat_ctr_drbg() -> Result<(), SelfTestError> {
    run_kat(&mut CtrDrbg::new(CtrCipher::Aes128), &CTR_DRBG_KAT)
}

/// CTR-DRBG AES-128 KAT with derivation function (NIST CAVP COUNT 0).
fn kat_ctr_drbg_df() -> Result<(), SelfTestError> {
    run_kat(&mut CtrDrbg::with_df(CtrCipher::Aes128), &CTR_DRBG_DF_KAT)
}

/// Block_Cipher_df must refuse requests over 512 bits.
fn kat_df_length_cap() -> Result<(), SelfTestError> {
    let name = "Block_Cipher_df length cap";
    match block_cipher_df(CtrCipher::Aes256, b"self-test", MAX_DF_BITS * 2) {
        Err(DrbgError::DerivationTooLong { .. }) => {}
        _ => return Err(SelfTestError::MissingFailure { name }),
    }
    let out = block_cipher_df(CtrCipher::Aes256, b"self-test", MAX_DF_BITS)
        .map_err(|source| SelfTestError::Drbg { name, source })?;
    if out.len() != MAX_DF_BITS / 8 {
        return Err(SelfTestError::KatMismatch { name });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kat_hash_drbg() {
        kat_hash_drbg().unwrap();
    }

    #[test]
    fn test_kat_hmac_drbg() {
        kat_hmac_drbg().unwrap();
    }

    #[test]
    fn test_kat_ctr_drbg() {
        kat_ctr_drbg().unwrap();
    }

    #[test]
    fn test_kat_ctr_drbg_df() {
        kat_ctr_drbg_df().unwrap();
    }

    #[test]
    fn test_kat_df_length_cap() {
        kat_df_length_cap().unwrap();
    }

    #[test]
    fn test_run_self_tests() {
        run_self_tests().unwrap();
    }

    #[test]
    fn test_kat_detects_mismatch() {
        let bad = Kat {
            expected: "00000000000000000000000000000000",
            ..HASH_DRBG_KAT
        };
        assert_eq!(
            run_kat(&mut HashDrbg::new(SecurityStrength::Bits256), &bad),
            Err(SelfTestError::KatMismatch {
                name: "Hash-DRBG SHA-256"
            })
        );
    }

    #[test]
    fn test_kat_reports_malformed_vector() {
        let odd = Kat {
            personalization: "abc",
            ..HMAC_DRBG_KAT
        };
        assert_eq!(
            run_kat(&mut HmacDrbg::new(SecurityStrength::Bits256), &odd),
            Err(SelfTestError::InvalidVector {
                name: "HMAC-DRBG SHA-256"
            })
        );
    }

    #[test]
    fn test_kat_reports_drbg_error() {
        let short = Kat {
            entropy: "00",
            ..CTR_DRBG_KAT
        };
        assert!(matches!(
            run_kat(&mut CtrDrbg::new(CtrCipher::Aes128), &short),
            Err(SelfTestError::Drbg {
                source: DrbgError::InputLength { .. },
                ..
            })
        ));
    }
}
