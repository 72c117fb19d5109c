//! LZ4 block compression — the one-shot encoder.
//!
//! The encoder scans the input with a [`MatchTable`] keyed by a 16-bit
//! fingerprint of each 4-byte window.  A table hit that survives verification
//! becomes a back-reference; everything between the previous sequence and the
//! match start is emitted as a literal run.  Incompressible stretches are
//! crossed cheaply by an adaptive skip counter, and every accepted match is
//! first extended backwards over pending literals and then forwards as far as
//! the format allows.
//!
//! | Entry point          | Input                              |
//! |----------------------|------------------------------------|
//! | [`compress_range`]   | sub-range of a buffer              |
//! | [`compress_to_vec`]  | whole slice                        |
//! | [`compress_default`] | whole slice, default acceleration  |
//!
//! The output block always ends with a literal-only sequence, the last 5
//! input bytes are never part of a match, and no match starts within the
//! last [`MFLIMIT`] bytes — the parsing restrictions the format imposes on
//! every encoder.
//!
//! Compression never fails on arguments that pass validation: the output is
//! allocated at [`compress_bound`] up front, and that bound is never exceeded.

use thiserror::Error;

use super::types::{
    fingerprint, read_u32_le, MatchTable, LASTLITERALS, LZ4_DISTANCE_MAX, LZ4_MIN_LENGTH,
    LZ4_SKIP_TRIGGER, MFLIMIT, MINMATCH, ML_BITS, ML_MASK, RUN_MASK,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum allowed input size (2 113 929 216 bytes).  Inputs larger than this
/// cannot be represented in an LZ4 block.
pub const MAX_INPUT_SIZE: usize = 0x7E00_0000;

/// Default acceleration factor (equals 1 — probe every position).
pub const ACCELERATION_DEFAULT: i32 = 1;

/// Acceleration factors above this are clamped.
pub const ACCELERATION_MAX: i32 = 65_537;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by LZ4 block compression functions.
///
/// All of these are precondition failures: they are raised before the encoder
/// body runs, and an argument set that passes validation always compresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompressError {
    /// `data_start + data_len` exceeds the buffer.
    #[error("data range not in buffer")]
    RangeOutOfBounds,
    /// The acceleration factor is zero or negative.
    #[error("acceleration must be an integer >= 1")]
    InvalidAcceleration,
    /// The input exceeds [`MAX_INPUT_SIZE`].
    #[error("input exceeds the maximum compressible size")]
    InputTooLarge,
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case compressed size for a given input size.
///
/// Returns 0 if `input_len` exceeds [`MAX_INPUT_SIZE`].  The compressor
/// allocates this many bytes up front and never writes past them.
#[inline]
pub fn compress_bound(input_len: usize) -> usize {
    if input_len > MAX_INPUT_SIZE {
        0
    } else {
        input_len + input_len / 250 + 16
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public one-shot API
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `data[data_start .. data_start + data_len]` into a fresh block.
///
/// `acceleration` tunes the initial skip step of the match search: 1 probes
/// every position; larger values trade ratio for speed on incompressible
/// data.  Values above [`ACCELERATION_MAX`] are clamped.
///
/// Returns the block as a freshly allocated `Vec<u8>` whose length is the
/// block length.
pub fn compress_range(
    data: &[u8],
    data_start: usize,
    data_len: usize,
    acceleration: i32,
) -> Result<Vec<u8>, CompressError> {
    let data_end = data_start
        .checked_add(data_len)
        .ok_or(CompressError::RangeOutOfBounds)?;
    if data_end > data.len() {
        return Err(CompressError::RangeOutOfBounds);
    }
    if acceleration < ACCELERATION_DEFAULT {
        return Err(CompressError::InvalidAcceleration);
    }
    if data_len > MAX_INPUT_SIZE {
        return Err(CompressError::InputTooLarge);
    }

    let input = &data[data_start..data_end];
    let mut out = Vec::with_capacity(compress_bound(input.len()));
    compress_into(input, &mut out, acceleration.min(ACCELERATION_MAX) as u32);
    debug_assert!(out.len() <= compress_bound(input.len()));
    Ok(out)
}

/// Compress a whole slice into a fresh block.
///
/// Identical to [`compress_range`] over the full slice.
pub fn compress_to_vec(data: &[u8], acceleration: i32) -> Result<Vec<u8>, CompressError> {
    compress_range(data, 0, data.len(), acceleration)
}

/// Compress a whole slice with the default acceleration factor (1).
///
/// This is the recommended entry point for one-shot block compression.
pub fn compress_default(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    compress_to_vec(data, ACCELERATION_DEFAULT)
}

// ─────────────────────────────────────────────────────────────────────────────
// Core compression loop
// ─────────────────────────────────────────────────────────────────────────────

/// Encode `input` into `out`.
///
/// Preconditions (validated by the public entry points):
/// - `acceleration >= 1`
/// - `input.len() <= MAX_INPUT_SIZE`
fn compress_into(input: &[u8], out: &mut Vec<u8>, acceleration: u32) {
    let len = input.len();
    // First input byte not yet covered by an emitted sequence.
    let mut anchor = 0usize;

    // Inputs below LZ4_MIN_LENGTH cannot contain a match that honors the
    // trailing-literal restrictions; they are a single literal run.
    if len >= LZ4_MIN_LENGTH {
        let mflimit = len - MFLIMIT;
        let match_limit = len - LASTLITERALS;

        let mut table = MatchTable::new();
        // Low LZ4_SKIP_TRIGGER bits count misses; the bits above them are the
        // current scan step.  Every 64 consecutive misses carry into the step.
        let mut search_match_nb = acceleration << LZ4_SKIP_TRIGGER;

        let mut pos = 0usize;
        while pos <= mflimit {
            let sequence = read_u32_le(input, pos);
            let candidate = table.probe(fingerprint(sequence), pos);

            let matched = match candidate {
                Some(m)
                    if pos - m <= LZ4_DISTANCE_MAX && read_u32_le(input, m) == sequence =>
                {
                    m
                }
                _ => {
                    // Miss (vacant slot, out of range, or fingerprint
                    // collision): advance by the current step.
                    let step = (search_match_nb >> LZ4_SKIP_TRIGGER) as usize;
                    search_match_nb += 1;
                    pos += step;
                    continue;
                }
            };

            // Extend the match backwards over pending literals.  The offset
            // is unchanged; the loop stops at the anchor and at the start of
            // the input.
            let mut match_pos = matched;
            while pos > anchor && match_pos > 0 && input[pos - 1] == input[match_pos - 1] {
                pos -= 1;
                match_pos -= 1;
            }
            let offset = pos - match_pos;

            // Extend forwards past the verified MINMATCH bytes, stopping
            // before the mandatory trailing-literal zone.
            let mut cursor = pos + MINMATCH;
            let mut match_cursor = match_pos + MINMATCH;
            while cursor < match_limit && input[cursor] == input[match_cursor] {
                cursor += 1;
                match_cursor += 1;
            }
            let match_extra = cursor - (pos + MINMATCH);

            emit_sequence(out, &input[anchor..pos], offset, match_extra);

            anchor = cursor;
            pos = cursor;
            search_match_nb = acceleration << LZ4_SKIP_TRIGGER;
        }
    }

    emit_last_literals(out, &input[anchor..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Sequence emission
// ─────────────────────────────────────────────────────────────────────────────

/// Emit one full sequence: token, literal run, offset, match length.
///
/// `match_extra` counts match bytes beyond the implicit MINMATCH.
fn emit_sequence(out: &mut Vec<u8>, literals: &[u8], offset: usize, match_extra: usize) {
    let run = literals.len();
    let token = (run.min(RUN_MASK) << ML_BITS) | match_extra.min(ML_MASK);
    out.push(token as u8);
    if run >= RUN_MASK {
        push_length_tail(out, run - RUN_MASK);
    }
    out.extend_from_slice(literals);
    out.extend_from_slice(&(offset as u16).to_le_bytes());
    if match_extra >= ML_MASK {
        push_length_tail(out, match_extra - ML_MASK);
    }
}

/// Emit the final, truncated sequence: token and literals, no match fields.
/// Every block ends here, which is how the decoder recognizes the end.
fn emit_last_literals(out: &mut Vec<u8>, literals: &[u8]) {
    let run = literals.len();
    out.push((run.min(RUN_MASK) << ML_BITS) as u8);
    if run >= RUN_MASK {
        push_length_tail(out, run - RUN_MASK);
    }
    out.extend_from_slice(literals);
}

/// Emit the extension bytes of a length field that overflowed its nibble.
///
/// `remainder` has already had the nibble maximum subtracted.  A remainder of
/// exactly zero still emits one `0x00` byte — the decoder always reads at
/// least one extension byte after a saturated nibble.
fn push_length_tail(out: &mut Vec<u8>, mut remainder: usize) {
    while remainder >= 255 {
        out.push(255);
        remainder -= 255;
    }
    out.push(remainder as u8);
}
