//! LZ4 block decompression — the growing-output decoder.
//!
//! The decoder walks the block sequence by sequence: token, literal run,
//! back-reference.  The final sequence is truncated — token and literals
//! only — and is recognized by the input cursor landing exactly on the end
//! of the block after a literal copy.  Anything else that runs out of input
//! is a malformed block.
//!
//! # Security boundary
//!
//! This is the path that handles untrusted data.  Every length is checked
//! against the remaining input before it is consumed, every offset is checked
//! against the bytes written so far before it is dereferenced, and output
//! growth is capped by the caller's [`DecodedSize`].  Malformed or oversized
//! input returns an error — it must never panic.
//!
//! Output starts small and doubles geometrically up to the cap, so the
//! amortized copy cost stays linear; a [`DecodedSize::Exact`] hint pins the
//! allocation and disables growth entirely.

use thiserror::Error;

use super::types::{read_u16_le, KB, MINMATCH, ML_BITS, ML_MASK, RUN_MASK};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Initial output allocation when the decoded size is unknown (512 KiB).
pub const INITIAL_OUTPUT_CAPACITY: usize = 512 * KB;

/// Output ceiling when the caller supplies no bound (2 GiB).
pub const DEFAULT_OUTPUT_LIMIT: usize = 1 << 31;

// ─────────────────────────────────────────────────────────────────────────────
// Size hint
// ─────────────────────────────────────────────────────────────────────────────

/// What the caller knows about the decoded size of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodedSize {
    /// The exact decoded size.  The output is allocated once and growth is
    /// disabled; a block that decodes past this length fails with
    /// [`DecompressError::MaxLengthExceeded`].
    Exact(usize),
    /// An upper bound.  The output grows geometrically up to the bound.
    AtMost(usize),
    /// No information.  The output grows up to [`DEFAULT_OUTPUT_LIMIT`].
    #[default]
    Unknown,
}

impl DecodedSize {
    /// Initial capacity and hard ceiling for the output buffer.
    fn layout(self) -> (usize, usize) {
        match self {
            DecodedSize::Exact(n) => (n, n),
            DecodedSize::AtMost(cap) => (INITIAL_OUTPUT_CAPACITY.min(cap), cap),
            DecodedSize::Unknown => (INITIAL_OUTPUT_CAPACITY, DEFAULT_OUTPUT_LIMIT),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by LZ4 block decompression functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecompressError {
    /// `data_start + data_len` exceeds the buffer.
    #[error("data range not in buffer")]
    RangeOutOfBounds,
    /// The block decodes to more bytes than the caller's cap allows.
    #[error("maximum decompressed length exceeded")]
    MaxLengthExceeded,
    /// A match offset of zero, or one reaching back past the first byte
    /// written so far.
    #[error("malformed block: match offset out of range")]
    OffsetOutOfRange,
    /// The block ends mid-sequence: inside a length extension, inside a
    /// literal run, inside an offset field, or immediately after a match.
    #[error("malformed block: truncated sequence")]
    TruncatedBlock,
}

// ─────────────────────────────────────────────────────────────────────────────
// Public one-shot API
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress the block at `data[data_start .. data_start + data_len]`.
///
/// `decoded` tells the decoder how large the output may grow; see
/// [`DecodedSize`].  Returns the decoded bytes as a freshly allocated
/// `Vec<u8>` whose length is the decoded length.
pub fn decompress_range(
    data: &[u8],
    data_start: usize,
    data_len: usize,
    decoded: DecodedSize,
) -> Result<Vec<u8>, DecompressError> {
    let data_end = data_start
        .checked_add(data_len)
        .ok_or(DecompressError::RangeOutOfBounds)?;
    if data_end > data.len() {
        return Err(DecompressError::RangeOutOfBounds);
    }
    decompress_block(&data[data_start..data_end], decoded)
}

/// Decompress a whole slice holding one block.
///
/// Identical to [`decompress_range`] over the full slice; the size hint is
/// forwarded unchanged.
pub fn decompress_to_vec(data: &[u8], decoded: DecodedSize) -> Result<Vec<u8>, DecompressError> {
    decompress_range(data, 0, data.len(), decoded)
}

// ─────────────────────────────────────────────────────────────────────────────
// Core decode loop
// ─────────────────────────────────────────────────────────────────────────────

fn decompress_block(input: &[u8], decoded: DecodedSize) -> Result<Vec<u8>, DecompressError> {
    let (initial, limit) = decoded.layout();
    let mut out: Vec<u8> = Vec::with_capacity(initial.min(limit));
    let end = input.len();
    let mut cursor = 0usize;

    loop {
        // Every sequence starts with a token byte.  Running out of input
        // here means the previous sequence was a match — only a literal run
        // may end the block.
        let token = *input
            .get(cursor)
            .ok_or(DecompressError::TruncatedBlock)?;
        cursor += 1;

        // ── Literal run ──────────────────────────────────────────────────────
        let run = read_length(input, &mut cursor, (token >> ML_BITS) as usize, RUN_MASK)?;
        let literal_end = cursor
            .checked_add(run)
            .ok_or(DecompressError::TruncatedBlock)?;
        if literal_end > end {
            return Err(DecompressError::TruncatedBlock);
        }
        let required = out
            .len()
            .checked_add(run)
            .ok_or(DecompressError::MaxLengthExceeded)?;
        ensure_capacity(&mut out, required, limit)?;
        out.extend_from_slice(&input[cursor..literal_end]);
        cursor = literal_end;

        // The final sequence is token + literals only; landing exactly on
        // the block end here is the one legal way to finish.
        if cursor == end {
            break;
        }

        // ── Back-reference ───────────────────────────────────────────────────
        if end - cursor < 2 {
            return Err(DecompressError::TruncatedBlock);
        }
        let offset = read_u16_le(input, cursor) as usize;
        cursor += 2;
        if offset == 0 || offset > out.len() {
            return Err(DecompressError::OffsetOutOfRange);
        }

        let match_extra = read_length(input, &mut cursor, (token as usize) & ML_MASK, ML_MASK)?;
        let match_len = match_extra
            .checked_add(MINMATCH)
            .ok_or(DecompressError::MaxLengthExceeded)?;
        let required = out
            .len()
            .checked_add(match_len)
            .ok_or(DecompressError::MaxLengthExceeded)?;
        ensure_capacity(&mut out, required, limit)?;
        copy_match(&mut out, offset, match_len);
    }

    Ok(out)
}

/// Read a length field: the token nibble plus, when the nibble is saturated,
/// extension bytes accumulated until the first byte below 255 (inclusive).
fn read_length(
    input: &[u8],
    cursor: &mut usize,
    nibble: usize,
    mask: usize,
) -> Result<usize, DecompressError> {
    let mut length = nibble;
    if nibble == mask {
        loop {
            let byte = *input
                .get(*cursor)
                .ok_or(DecompressError::TruncatedBlock)?;
            *cursor += 1;
            length = length
                .checked_add(byte as usize)
                .ok_or(DecompressError::MaxLengthExceeded)?;
            if byte < 255 {
                break;
            }
        }
    }
    Ok(length)
}

/// Grow `out` so its capacity covers `required` bytes, doubling up to `limit`.
fn ensure_capacity(
    out: &mut Vec<u8>,
    required: usize,
    limit: usize,
) -> Result<(), DecompressError> {
    if required > limit {
        return Err(DecompressError::MaxLengthExceeded);
    }
    let mut capacity = out.capacity();
    if capacity >= required {
        return Ok(());
    }
    while capacity < required {
        capacity = capacity.max(1).saturating_mul(2).min(limit);
    }
    out.reserve_exact(capacity - out.len());
    Ok(())
}

/// Append `match_len` bytes replayed from `offset` bytes back.
///
/// When the match is longer than its offset the source overlaps the bytes
/// being written, so the copy proceeds in slices of at most `offset` bytes,
/// doubling the already-written run each time.  Capacity has been ensured by
/// the caller; `offset <= out.len()` has been validated.
fn copy_match(out: &mut Vec<u8>, offset: usize, match_len: usize) {
    let mut remaining = match_len;
    while remaining > offset {
        let from = out.len() - offset;
        out.extend_from_within(from..from + offset);
        remaining -= offset;
    }
    let from = out.len() - offset;
    out.extend_from_within(from..from + remaining);
}
