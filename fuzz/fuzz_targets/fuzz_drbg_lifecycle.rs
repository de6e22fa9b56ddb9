#![no_main]
use libfuzzer_sys::fuzz_target;
use nistdrbg::{CtrCipher, CtrDrbg, Drbg, DrbgStatus, HashDrbg, HmacDrbg, SecurityStrength};

// Drive one DRBG through instantiate / reseed / generate with arbitrary
// lengths. Every call must either succeed with the requested output length
// or fail without panicking.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let (selector, rest) = (data[0], &data[1..]);
    let mut drbg: Box<dyn Drbg> = match selector % 6 {
        0 => Box::new(HashDrbg::new(SecurityStrength::Bits128)),
        1 => Box::new(HashDrbg::new(SecurityStrength::Bits256)),
        2 => Box::new(HmacDrbg::new(SecurityStrength::Bits192)),
        3 => Box::new(CtrDrbg::new(CtrCipher::Aes128)),
        4 => Box::new(CtrDrbg::new(CtrCipher::Aes256)),
        _ => Box::new(CtrDrbg::with_df(CtrCipher::Aes192)),
    };

    let mut chunks = rest.chunks(40);
    let Some(seed) = chunks.next() else { return };
    let _ = drbg.instantiate(seed, &[]);

    for (i, chunk) in chunks.enumerate() {
        let counter_before = drbg.reseed_counter();
        let len = chunk.first().copied().unwrap_or(0) as usize * 4;
        let adin = chunk.get(1..).unwrap_or(&[]);
        if i % 4 == 3 {
            let _ = drbg.reseed(chunk, adin);
            continue;
        }
        match drbg.generate(len, adin) {
            Ok(out) => {
                assert_eq!(out.len(), len);
                assert_eq!(drbg.reseed_counter(), counter_before.map(|c| c + 1));
            }
            Err(_) => assert_eq!(drbg.reseed_counter(), counter_before),
        }
        assert_ne!(drbg.status(), DrbgStatus::ReseedRequired);
    }
});
