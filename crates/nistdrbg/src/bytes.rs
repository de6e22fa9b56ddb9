//! Byte-string helpers shared by the DRBG mechanisms.
//!
//! Fixed-width big-endian integers are carried as `u128`, which covers every
//! counter and length field the mechanisms use.

use nistdrbg_types::CryptoError;

/// Element-wise XOR of two equal-length byte strings.
///
/// # Panics
///
/// Panics if `a` and `b` differ in length. Callers size both operands from
/// the same seed length, so a mismatch is a bug rather than bad input.
pub fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    assert_eq!(a.len(), b.len(), "xor operands differ in length");
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

/// XOR `src` into `dst` in place. Same length rule as [`xor`].
pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len(), "xor operands differ in length");
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

/// Return `a` followed by zero bytes up to a total of `n` bytes.
pub fn pad_right(a: &[u8], n: usize) -> Result<Vec<u8>, CryptoError> {
    if a.len() > n {
        return Err(CryptoError::LengthMismatch {
            expected: n,
            got: a.len(),
        });
    }
    let mut out = vec![0u8; n];
    out[..a.len()].copy_from_slice(a);
    Ok(out)
}

/// Interpret `b` as a big-endian unsigned integer. At most 16 bytes.
pub fn bytes_to_uint_be(b: &[u8]) -> Result<u128, CryptoError> {
    if b.len() > 16 {
        return Err(CryptoError::IntegerOverflow { width: 16 });
    }
    Ok(b.iter().fold(0u128, |acc, &byte| (acc << 8) | u128::from(byte)))
}

/// Encode `v` as exactly `n` big-endian bytes, left-padded with zeros.
pub fn uint_to_bytes_be(v: u128, n: usize) -> Result<Vec<u8>, CryptoError> {
    let full = v.to_be_bytes();
    let significant = 16 - (v.leading_zeros() as usize / 8);
    if significant > n {
        return Err(CryptoError::IntegerOverflow { width: n });
    }
    let mut out = vec![0u8; n];
    out[n - significant..].copy_from_slice(&full[16 - significant..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor() {
        assert_eq!(xor(&[0xff, 0x0f, 0x00], &[0x0f, 0x0f, 0xaa]), vec![0xf0, 0x00, 0xaa]);
        assert!(xor(&[], &[]).is_empty());

        let mut dst = [0x55u8; 4];
        xor_in_place(&mut dst, &[0x55, 0xaa, 0x00, 0xff]);
        assert_eq!(dst, [0x00, 0xff, 0x55, 0xaa]);
    }

    #[test]
    #[should_panic(expected = "differ in length")]
    fn test_xor_length_mismatch_panics() {
        let _ = xor(&[1, 2, 3], &[1, 2]);
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right(&[1, 2], 4).unwrap(), vec![1, 2, 0, 0]);
        assert_eq!(pad_right(&[1, 2], 2).unwrap(), vec![1, 2]);
        assert_eq!(pad_right(&[], 3).unwrap(), vec![0, 0, 0]);
        assert_eq!(
            pad_right(&[1, 2, 3], 2),
            Err(CryptoError::LengthMismatch { expected: 2, got: 3 })
        );
    }

    #[test]
    fn test_bytes_to_uint_be() {
        assert_eq!(bytes_to_uint_be(&[]).unwrap(), 0);
        assert_eq!(bytes_to_uint_be(&[0x01, 0x02]).unwrap(), 0x0102);
        assert_eq!(bytes_to_uint_be(&[0xff; 16]).unwrap(), u128::MAX);
        assert!(bytes_to_uint_be(&[0u8; 17]).is_err());
    }

    #[test]
    fn test_uint_to_bytes_be() {
        assert_eq!(uint_to_bytes_be(0x0102, 4).unwrap(), vec![0, 0, 1, 2]);
        assert_eq!(uint_to_bytes_be(0, 0).unwrap(), Vec::<u8>::new());
        assert_eq!(uint_to_bytes_be(u128::MAX, 16).unwrap(), vec![0xff; 16]);
        assert_eq!(uint_to_bytes_be(255, 1).unwrap(), vec![0xff]);
        assert_eq!(
            uint_to_bytes_be(256, 1),
            Err(CryptoError::IntegerOverflow { width: 1 })
        );
        assert!(uint_to_bytes_be(1, 0).is_err());
    }

    #[test]
    fn test_uint_round_trip_at_counter_width() {
        let v = 0x0011_2233_4455_6677_8899_aabb_ccdd_eeffu128;
        let b = uint_to_bytes_be(v, 16).unwrap();
        assert_eq!(bytes_to_uint_be(&b).unwrap(), v);
    }
}
