#![no_main]
use libfuzzer_sys::fuzz_target;
use lz4_block::{decompress_to_vec, DecodedSize};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes either decode or return an error — never panic and
    // never grow past the cap.
    if let Ok(out) = decompress_to_vec(data, DecodedSize::AtMost(1 << 20)) {
        assert!(out.len() <= 1 << 20);
    }

    // Exact hints must be equally robust against garbage.
    let _ = decompress_to_vec(data, DecodedSize::Exact(data.len()));
});
