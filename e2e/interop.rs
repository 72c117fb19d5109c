//! E2E Test Suite 02: Interoperability
//!
//! The block format is externally defined, so compatibility with an
//! independent implementation is part of the contract.  These tests prove
//! byte-level interop against `lz4_flex` in both directions:
//!
//!   - blocks we emit decode correctly under `lz4_flex`
//!   - blocks `lz4_flex` emits decode correctly under this crate
//!
//! No byte-identity of the *compressed* form is asserted — two encoders may
//! legitimately pick different matches — only decode-side agreement.

use lz4_block::{compress_default, compress_to_vec, decompress_to_vec, DecodedSize};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn xorshift_noise(len: usize, mut state: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let bytes = state.to_le_bytes();
        let take = bytes.len().min(len - out.len());
        out.extend_from_slice(&bytes[..take]);
    }
    out
}

fn corpus() -> Vec<Vec<u8>> {
    vec![
        b"A".to_vec(),
        b"hello interop".to_vec(),
        vec![0u8; 5000],
        vec![0xFFu8; 1200],
        b"AB".iter().copied().cycle().take(2000).collect(),
        b"The block format is externally defined. ".repeat(100),
        xorshift_noise(10_000, 0xDEAD_BEEF_CAFE_F00D),
        {
            // mixed: text, noise, text again at a matchable distance
            let mut v = b"mixed section ".repeat(50);
            v.extend_from_slice(&xorshift_noise(3000, 11));
            v.extend_from_slice(&b"mixed section ".repeat(50));
            v
        },
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: our blocks decode under lz4_flex
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_our_blocks_decode_under_lz4_flex() {
    for data in corpus() {
        let block = compress_default(&data).unwrap();
        let decoded = lz4_flex::block::decompress(&block, data.len())
            .expect("lz4_flex should accept our block");
        assert_eq!(decoded, data);
    }
}

#[test]
fn test_our_accelerated_blocks_decode_under_lz4_flex() {
    for data in corpus() {
        for accel in [2, 17] {
            let block = compress_to_vec(&data, accel).unwrap();
            let decoded = lz4_flex::block::decompress(&block, data.len())
                .expect("lz4_flex should accept our accelerated block");
            assert_eq!(decoded, data);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: lz4_flex blocks decode under this crate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_lz4_flex_blocks_decode_here() {
    for data in corpus() {
        let block = lz4_flex::block::compress(&data);
        let decoded = decompress_to_vec(&block, DecodedSize::Exact(data.len()))
            .expect("we should accept an lz4_flex block");
        assert_eq!(decoded, data);
    }
}

#[test]
fn test_lz4_flex_blocks_decode_here_without_a_hint() {
    for data in corpus() {
        let block = lz4_flex::block::compress(&data);
        let decoded = decompress_to_vec(&block, DecodedSize::Unknown).unwrap();
        assert_eq!(decoded, data);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: full cross round-trip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_cross_roundtrip_both_directions() {
    // ours → flex → ours: re-compress what lz4_flex decoded and decode again.
    for data in corpus() {
        let ours = compress_default(&data).unwrap();
        let via_flex = lz4_flex::block::decompress(&ours, data.len()).unwrap();
        let theirs = lz4_flex::block::compress(&via_flex);
        let back = decompress_to_vec(&theirs, DecodedSize::Exact(data.len())).unwrap();
        assert_eq!(back, data);
    }
}
