//! `lz4-block` — a pure in-memory codec for the LZ4 block format.
//!
//! The block format is the raw LZ4 container: a sequence of tokens, literal
//! runs, and back-references, with no magic number, no checksums, and no
//! framing.  Given a slice of bytes, [`compress_to_vec`] produces a
//! self-contained block that [`decompress_to_vec`] reproduces bit-identically.
//! Blocks are interchangeable with every other implementation of the format.
//!
//! # Crate layout
//!
//! | Module  | Contents |
//! |---------|----------|
//! | `block` | The two-sided codec: one-shot compression and decompression. |
//!
//! # Example
//!
//! ```
//! use lz4_block::{compress_default, decompress_to_vec, DecodedSize};
//!
//! let data = b"an example payload, an example payload";
//! let block = compress_default(data).unwrap();
//! let round = decompress_to_vec(&block, DecodedSize::Exact(data.len())).unwrap();
//! assert_eq!(round, data);
//! ```

#![forbid(unsafe_code)]

pub mod block;

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::compress::{
    compress_bound, compress_default, compress_range, compress_to_vec, CompressError,
    ACCELERATION_DEFAULT, ACCELERATION_MAX, MAX_INPUT_SIZE,
};
pub use block::decompress::{
    decompress_range, decompress_to_vec, DecodedSize, DecompressError, DEFAULT_OUTPUT_LIMIT,
    INITIAL_OUTPUT_CAPACITY,
};
pub use block::types::LZ4_DISTANCE_MAX;
