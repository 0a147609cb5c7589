//! Error taxonomy for the cipher engine and its memory boundary

use thiserror::Error;

/// Everything that can go wrong at or behind the module boundary.
///
/// Encoding and key problems are caught before the cipher runs. Handle
/// misuse (stale or foreign handles) is detected by the arena's generation
/// scheme and fails loudly instead of corrupting memory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Zero-length keys break the key schedule and are rejected up front.
    #[error("invalid key: key must not be empty")]
    InvalidKey,

    /// Hex input failed validation before reaching the engine.
    #[error("invalid encoding: {detail}")]
    InvalidEncoding { detail: String },

    /// The arena cannot grow enough to satisfy an allocation request.
    #[error("allocation failure: requested {requested} bytes with {remaining} remaining")]
    AllocationFailure { requested: usize, remaining: usize },

    /// The handle's slot was never issued by this arena.
    #[error("invalid handle: slot {index} was never allocated")]
    InvalidHandle { index: usize },

    /// The buffer behind the handle has already been freed.
    #[error("use after free: buffer in slot {index} is no longer live")]
    UseAfterFree { index: usize },

    /// The handle was already freed once.
    #[error("double free: buffer in slot {index} was already released")]
    DoubleFree { index: usize },

    /// A raw read or write fell outside the buffer's extent.
    #[error("out of bounds: offset {offset} + {len} bytes exceeds buffer of {buffer_len}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },
}
