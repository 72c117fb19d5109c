//! LZ4 block compression and decompression.
//!
//! This module contains the core LZ4 block-format engine.  Both sides are
//! one-shot: each call owns its inputs, its scratch state, and its output.

pub mod compress;
pub mod decompress;
pub mod types;

// Re-export the most important public API items at the module level.
pub use compress::{
    compress_bound, compress_default, compress_range, compress_to_vec, CompressError,
    ACCELERATION_DEFAULT, ACCELERATION_MAX, MAX_INPUT_SIZE,
};
pub use decompress::{
    decompress_range, decompress_to_vec, DecodedSize, DecompressError, DEFAULT_OUTPUT_LIMIT,
    INITIAL_OUTPUT_CAPACITY,
};
pub use types::LZ4_DISTANCE_MAX;
