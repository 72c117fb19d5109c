//! E2E Test Suite 01: Block One-Shot API
//!
//! Validates the codec end to end through its public surface:
//! - compress_to_vec / compress_default / compress_range
//! - decompress_to_vec / decompress_range with every DecodedSize hint
//!
//! The backbone is the round-trip identity: for every input class the block
//! format cares about (empty, tiny, boundary-length, runs, periodic data,
//! text, near-incompressible noise), decompressing the compressed block must
//! reproduce the input bit for bit.

use lz4_block::{
    compress_bound, compress_default, compress_to_vec, decompress_to_vec, DecodedSize,
    DecompressError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Deterministic xorshift64 byte stream — incompressible for all practical
/// purposes, reproducible across runs.
fn noise(len: usize, mut state: u64) -> Vec<u8> {
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

/// Compress with the given acceleration, decompress with an exact hint, and
/// require bit-identity plus the worst-case bound.
fn roundtrip_with(data: &[u8], acceleration: i32) {
    let block = compress_to_vec(data, acceleration).expect("compression should succeed");
    assert!(
        block.len() <= compress_bound(data.len()),
        "block {} exceeds bound {} for input of {} bytes",
        block.len(),
        compress_bound(data.len()),
        data.len()
    );
    let round = decompress_to_vec(&block, DecodedSize::Exact(data.len()))
        .expect("decompression should succeed");
    assert_eq!(round, data, "round-trip mismatch for {} bytes", data.len());

    // The same block must also decode without any size information.
    let round = decompress_to_vec(&block, DecodedSize::Unknown).unwrap();
    assert_eq!(round, data);
}

fn roundtrip(data: &[u8]) {
    roundtrip_with(data, 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: round-trip across the input size boundary
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_empty() {
    roundtrip(b"");
}

#[test]
fn test_roundtrip_one_byte() {
    roundtrip(b"A");
    roundtrip(&[0x00]);
    roundtrip(&[0xFF]);
}

#[test]
fn test_roundtrip_below_min_length() {
    // 12 bytes: one short of the shortest input that can hold a match.
    roundtrip(b"AAAAAAAAAAAA");
    roundtrip(b"0123456789ab");
}

#[test]
fn test_roundtrip_exactly_min_length() {
    roundtrip(b"AAAAAAAAAAAAA");
    roundtrip(b"0123456789abc");
}

#[test]
fn test_roundtrip_every_length_up_to_64() {
    // Sweep the small-length edge cases in one go, both repetitive and not.
    let noise = noise(64, 0x9E37_79B9_7F4A_7C15);
    for len in 0..=64 {
        roundtrip(&vec![b'Q'; len]);
        roundtrip(&noise[..len]);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: round-trip across data shapes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_all_zeros() {
    for len in [13, 100, 4096, 100_000] {
        roundtrip(&vec![0u8; len]);
    }
}

#[test]
fn test_roundtrip_all_255s() {
    for len in [13, 100, 4096] {
        roundtrip(&vec![0xFFu8; len]);
    }
}

#[test]
fn test_roundtrip_overlap_pattern() {
    // Exercises match lengths longer than their offsets in the decoder.
    roundtrip(b"ABABABABAB");
    let abab: Vec<u8> = b"AB".iter().copied().cycle().take(1000).collect();
    roundtrip(&abab);
    let abc: Vec<u8> = b"abc".iter().copied().cycle().take(1000).collect();
    roundtrip(&abc);
}

#[test]
fn test_roundtrip_natural_language() {
    let text = b"It was the best of times, it was the worst of times, it was the \
        age of wisdom, it was the age of foolishness, it was the epoch of belief, \
        it was the epoch of incredulity, it was the season of Light, it was the \
        season of Darkness, it was the spring of hope, it was the winter of despair."
        .repeat(8);
    roundtrip(&text);
    // Text this repetitive must actually compress.
    let block = compress_default(&text).unwrap();
    assert!(block.len() < text.len());
}

#[test]
fn test_roundtrip_random_data() {
    for len in [300, 4096, 65_536] {
        roundtrip(&noise(len, 0x1234_5678_9ABC_DEF0));
    }
}

#[test]
fn test_roundtrip_already_compressed_data() {
    // Compressing a compressed block: near-incompressible input with just
    // enough structure to tempt the match finder.
    let text = b"a moderately repetitive payload ".repeat(64);
    let once = compress_default(&text).unwrap();
    roundtrip(&once);
}

#[test]
fn test_roundtrip_long_distance_matches() {
    // The same 64-byte marker at distance ~32 KiB (addressable) embedded in
    // noise; matches beyond 65535 bytes are simply not emitted.
    let marker = b"-- a distinctive marker that repeats far, far apart --\0\0\0\0\0\0\0\0";
    let mut data = Vec::new();
    data.extend_from_slice(marker);
    data.extend_from_slice(&noise(32 * 1024, 42));
    data.extend_from_slice(marker);
    data.extend_from_slice(&noise(40 * 1024, 43));
    data.extend_from_slice(marker);
    roundtrip(&data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: acceleration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_acceleration_variants_all_roundtrip() {
    let text = b"acceleration trades ratio for speed ".repeat(50);
    let mixed = {
        let mut v = noise(2000, 7);
        v.extend_from_slice(&text);
        v.extend_from_slice(&noise(2000, 8));
        v
    };
    for accel in [1, 2, 8, 64, 65_537] {
        roundtrip_with(&text, accel);
        roundtrip_with(&mixed, accel);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: block shape invariants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_final_sequence_is_literal_only() {
    // The block must end with the literal payload of its last sequence:
    // decoding must consume every byte, and the last 5 input bytes must be
    // the block's last 5 bytes, verbatim.
    for data in [
        &b"some ordinary input with a tail"[..],
        &vec![b'r'; 500][..],
        &noise(500, 99)[..],
    ] {
        let block = compress_default(data).unwrap();
        assert_eq!(&block[block.len() - 5..], &data[data.len() - 5..]);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: bounded-growth decompression
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_exact_hint_boundary() {
    let data = b"bounded growth, bounded growth, bounded growth".repeat(10);
    let block = compress_default(&data).unwrap();
    assert_eq!(
        decompress_to_vec(&block, DecodedSize::Exact(data.len())).unwrap(),
        data
    );
    assert_eq!(
        decompress_to_vec(&block, DecodedSize::Exact(data.len() - 1)),
        Err(DecompressError::MaxLengthExceeded)
    );
}

#[test]
fn test_at_most_hint_boundary() {
    let data = vec![7u8; 10_000];
    let block = compress_default(&data).unwrap();
    assert_eq!(
        decompress_to_vec(&block, DecodedSize::AtMost(data.len())).unwrap(),
        data
    );
    assert_eq!(
        decompress_to_vec(&block, DecodedSize::AtMost(data.len() - 1)),
        Err(DecompressError::MaxLengthExceeded)
    );
}

#[test]
fn test_growth_past_initial_capacity() {
    // Larger than the decoder's 512 KiB initial allocation.
    let data = b"grow me ".repeat(256 * 1024); // 2 MiB
    let block = compress_default(&data).unwrap();
    let round = decompress_to_vec(&block, DecodedSize::Unknown).unwrap();
    assert_eq!(round, data);
}
