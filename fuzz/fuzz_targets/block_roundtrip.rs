#![no_main]
use libfuzzer_sys::fuzz_target;
use lz4_block::{compress_bound, compress_default, decompress_to_vec, DecodedSize};

fuzz_target!(|data: &[u8]| {
    // Compression cannot fail for in-range inputs.
    let block = compress_default(data).expect("compression must succeed");
    assert!(
        block.len() <= compress_bound(data.len()),
        "block {} exceeds bound {} for {} input bytes",
        block.len(),
        compress_bound(data.len()),
        data.len()
    );

    // Decompress back, supplying the exact original length.
    let recovered =
        decompress_to_vec(&block, DecodedSize::Exact(data.len())).expect("block must decode");
    assert_eq!(recovered, data, "block round-trip mismatch");
});
