#![no_main]
use libfuzzer_sys::fuzz_target;
use nistdrbg::drbg::ctr_drbg::{block_cipher_df, MAX_DF_BITS};
use nistdrbg::CtrCipher;

fuzz_target!(|data: &[u8]| {
    let Some((&bits, input)) = data.split_first() else { return };
    let num_bits = bits as usize * 8;
    for cipher in [CtrCipher::Aes128, CtrCipher::Aes192, CtrCipher::Aes256] {
        match block_cipher_df(cipher, input, num_bits) {
            Ok(out) => assert_eq!(out.len(), num_bits / 8),
            Err(_) => assert!(num_bits > MAX_DF_BITS),
        }
    }
});
