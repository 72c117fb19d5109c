// Unit tests for the block compression core and one-shot API
//
// Tests verify:
//   - compress_bound() returns correct worst-case sizes
//   - Byte-exact blocks for the canonical small inputs (empty, one byte,
//     all-literal runs, repeated-byte match, literal-run extension)
//   - The mandatory literal tail: last sequence has no match fields, last
//     5 input bytes always land in the final literal run
//   - Argument validation: range checks, acceleration checks
//   - The output never exceeds compress_bound()

use lz4_block::block::compress::{
    compress_bound, compress_default, compress_range, compress_to_vec, CompressError,
    ACCELERATION_DEFAULT, ACCELERATION_MAX, MAX_INPUT_SIZE,
};

/// 300 bytes in which every 4-byte window is unique, so no match exists and
/// the encoder must emit a single 300-literal run.  Interleaving a zero with
/// a counter keeps all windows of the forms [0,k,0,k+1] and [k,0,k+1,0]
/// pairwise distinct.
fn matchless_300() -> Vec<u8> {
    let mut data = Vec::with_capacity(300);
    for k in 0u8..150 {
        data.push(0);
        data.push(k);
    }
    data
}

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn constant_acceleration_default() {
    assert_eq!(ACCELERATION_DEFAULT, 1i32);
}

#[test]
fn constant_acceleration_max() {
    assert_eq!(ACCELERATION_MAX, 65_537i32);
}

#[test]
fn constant_max_input_size() {
    assert_eq!(MAX_INPUT_SIZE, 0x7E00_0000);
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_bound — worst-case size calculation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn compress_bound_zero_input() {
    // 0 + 0/250 + 16
    assert_eq!(compress_bound(0), 16);
}

#[test]
fn compress_bound_small_inputs() {
    assert_eq!(compress_bound(1), 17);
    assert_eq!(compress_bound(249), 265);
    assert_eq!(compress_bound(250), 267);
}

#[test]
fn compress_bound_1000_bytes() {
    // 1000 + 4 + 16
    assert_eq!(compress_bound(1000), 1020);
}

#[test]
fn compress_bound_exceeds_max_returns_zero() {
    assert_eq!(compress_bound(MAX_INPUT_SIZE + 1), 0);
}

#[test]
fn compress_bound_covers_the_incompressible_worst_case() {
    // A 300-byte matchless input encodes to 303 bytes (token + 2 extension
    // bytes + 300 literals); the bound must cover it.
    assert!(compress_bound(300) >= 303);
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte-exact blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_is_a_single_zero_token() {
    let block = compress_default(b"").unwrap();
    assert_eq!(block, [0x00]);
}

#[test]
fn single_byte_is_token_plus_literal() {
    let block = compress_default(b"A").unwrap();
    assert_eq!(block, [0x10, 0x41]);
}

#[test]
fn thirteen_distinct_bytes_are_all_literals() {
    // Exactly the minimum length that admits a match — but none exists.
    let block = compress_default(b"0123456789abc").unwrap();
    assert_eq!(block.len(), 14);
    assert_eq!(block[0], 0xD0);
    assert_eq!(&block[1..], b"0123456789abc");
}

#[test]
fn below_min_length_skips_the_match_search() {
    // 12 repeated bytes would match, but the input is too short to encode one.
    let block = compress_default(b"AAAAAAAAAAAA").unwrap();
    assert_eq!(block[0], 0xC0);
    assert_eq!(&block[1..], b"AAAAAAAAAAAA");
}

#[test]
fn repeated_byte_run_uses_offset_one() {
    let input = [0x41u8; 20];
    let block = compress_default(&input).unwrap();
    // One literal 'A', then a 14-byte match at offset 1, then the 5-byte
    // literal tail.
    assert_eq!(
        block,
        [0x1A, 0x41, 0x01, 0x00, 0x50, 0x41, 0x41, 0x41, 0x41, 0x41]
    );
}

#[test]
fn two_byte_period_uses_offset_two() {
    let input: Vec<u8> = b"AB".iter().copied().cycle().take(20).collect();
    let block = compress_default(&input).unwrap();
    assert_eq!(
        block,
        [0x29, 0x41, 0x42, 0x02, 0x00, 0x50, 0x42, 0x41, 0x42, 0x41, 0x42]
    );
}

#[test]
fn long_literal_run_extends_the_token_nibble() {
    // 300 literals: nibble 15, extension bytes 255 and 30 (300 - 15 - 255).
    let data = matchless_300();
    let block = compress_default(&data).unwrap();
    assert_eq!(block.len(), 303);
    assert_eq!(block[0], 0xF0);
    assert_eq!(block[1], 0xFF);
    assert_eq!(block[2], 30);
    assert_eq!(&block[3..], &data[..]);
}

#[test]
fn literal_run_of_exactly_fifteen_emits_a_zero_extension_byte() {
    // 15 matchless bytes: saturated nibble plus a mandatory 0x00 extension.
    let full = matchless_300();
    let data = &full[..15];
    let block = compress_default(data).unwrap();
    assert_eq!(block[0], 0xF0);
    assert_eq!(block[1], 0x00);
    assert_eq!(&block[2..], data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing restrictions on the emit side
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn last_five_input_bytes_are_in_the_final_literal_run() {
    // Fully periodic input: everything after the first byte could match, but
    // the tail must still arrive as literals.
    let input = [0x7Au8; 64];
    let block = compress_default(&input).unwrap();
    let tail = &block[block.len() - 5..];
    assert_eq!(tail, &input[input.len() - 5..]);
    // The token introducing that run carries no match nibble.
    assert_eq!(block[block.len() - 6], 0x50);
}

#[test]
fn compressed_size_stays_within_bound() {
    let zeros = vec![0u8; 4096];
    let text = b"The quick brown fox jumps over the lazy dog. ".repeat(40);
    let noise = matchless_300();
    for input in [&zeros[..], &text[..], &noise[..], b""] {
        let block = compress_default(input).unwrap();
        assert!(
            block.len() <= compress_bound(input.len()),
            "{} > bound {}",
            block.len(),
            compress_bound(input.len())
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn range_past_the_buffer_is_rejected() {
    let data = [0u8; 8];
    assert_eq!(
        compress_range(&data, 4, 5, 1),
        Err(CompressError::RangeOutOfBounds)
    );
    assert_eq!(
        compress_range(&data, 9, 0, 1),
        Err(CompressError::RangeOutOfBounds)
    );
}

#[test]
fn range_overflow_is_rejected() {
    let data = [0u8; 8];
    assert_eq!(
        compress_range(&data, usize::MAX, 2, 1),
        Err(CompressError::RangeOutOfBounds)
    );
}

#[test]
fn sub_range_compresses_like_the_slice() {
    let data = b"XXhello worldXX";
    let ranged = compress_range(data, 2, 11, 1).unwrap();
    let sliced = compress_to_vec(b"hello world", 1).unwrap();
    assert_eq!(ranged, sliced);
}

#[test]
fn zero_acceleration_is_rejected() {
    assert_eq!(
        compress_to_vec(b"data", 0),
        Err(CompressError::InvalidAcceleration)
    );
}

#[test]
fn negative_acceleration_is_rejected() {
    assert_eq!(
        compress_to_vec(b"data", -3),
        Err(CompressError::InvalidAcceleration)
    );
}

#[test]
fn oversized_acceleration_is_clamped_not_rejected() {
    let block = compress_to_vec(&[0x41u8; 20], i32::MAX).unwrap();
    assert!(!block.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Error display
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn error_messages_are_descriptive() {
    assert_eq!(
        CompressError::RangeOutOfBounds.to_string(),
        "data range not in buffer"
    );
    assert_eq!(
        CompressError::InvalidAcceleration.to_string(),
        "acceleration must be an integer >= 1"
    );
}

#[test]
fn compress_error_eq_copy_debug() {
    let e = CompressError::RangeOutOfBounds;
    let e2 = e; // Copy
    assert_eq!(e, e2);
    assert_ne!(e, CompressError::InvalidAcceleration);
    let _ = format!("{e:?}");
}
