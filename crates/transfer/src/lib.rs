//! Fixed-size block chunking with per-block SHA-256 digests.
//!
//! A [`SourceFile`] is split lazily by a [`Chunker`] into a
//! [`BlockReader`]: each block is read and hashed only when the previous
//! one has been consumed, while the total block count is known up front.

mod chunked;
mod progress;
mod types;

pub use chunked::{BlockReader, Chunker, checksum_bytes, reassemble, verify_chunk};
pub use progress::BlockProgress;
pub use types::{Block, SourceFile};

/// Default block size: 1 MiB.
pub const DEFAULT_BLOCK_SIZE: usize = 1024 * 1024;

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("block {index} checksum mismatch")]
    ChecksumMismatch { index: u64 },

    #[error("block {expected} missing or out of order (found {found})")]
    OutOfOrder { expected: u64, found: u64 },

    #[error("block {index} declares total {found}, expected {expected}")]
    TotalMismatch { index: u64, expected: u64, found: u64 },

    #[error("invalid path: {0}")]
    InvalidPath(String),
}
