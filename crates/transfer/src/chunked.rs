use std::io::Read;

use goflux_protocol::ChunkData;
use sha2::{Digest, Sha256};

use crate::types::{Block, SourceFile};
use crate::{DEFAULT_BLOCK_SIZE, TransferError};

// ---------------------------------------------------------------------------
// Checksum helpers
// ---------------------------------------------------------------------------

/// Computes SHA-256 of `data` and returns the lowercase hex digest.
pub fn checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Checks that a received chunk's payload reproduces its declared digest.
pub fn verify_chunk(chunk: &ChunkData) -> Result<(), TransferError> {
    if checksum_bytes(&chunk.data) != chunk.checksum {
        return Err(TransferError::ChecksumMismatch {
            index: chunk.chunk_id,
        });
    }
    Ok(())
}

/// Rebuilds file content from the chunks of one upload, as the store does.
///
/// Chunks must be in index order starting at 0, all declare the same
/// `total` equal to the number of chunks, and every digest must match.
pub fn reassemble(chunks: &[ChunkData]) -> Result<Vec<u8>, TransferError> {
    let expected_total = chunks.len() as u64;
    let mut content = Vec::with_capacity(chunks.iter().map(|c| c.data.len()).sum());
    for (i, chunk) in chunks.iter().enumerate() {
        let i = i as u64;
        if chunk.chunk_id != i {
            return Err(TransferError::OutOfOrder {
                expected: i,
                found: chunk.chunk_id,
            });
        }
        if chunk.total != expected_total {
            return Err(TransferError::TotalMismatch {
                index: i,
                expected: expected_total,
                found: chunk.total,
            });
        }
        verify_chunk(chunk)?;
        content.extend_from_slice(&chunk.data);
    }
    Ok(content)
}

// ---------------------------------------------------------------------------
// Chunker
// ---------------------------------------------------------------------------

/// Splits files into fixed-size blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    block_size: usize,
}

impl Chunker {
    /// Creates a chunker. A `block_size` of 0 selects [`DEFAULT_BLOCK_SIZE`].
    pub fn new(block_size: usize) -> Self {
        let block_size = if block_size == 0 {
            DEFAULT_BLOCK_SIZE
        } else {
            block_size
        };
        Self { block_size }
    }

    /// Configured block size in bytes.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of blocks for a file of `size` bytes.
    ///
    /// `ceil(size / block_size)`, except that a zero-byte file is sent as a
    /// single empty block so the store still learns the file exists.
    pub fn total_blocks(&self, size: u64) -> u64 {
        if size == 0 {
            1
        } else {
            size.div_ceil(self.block_size as u64)
        }
    }

    /// Opens a lazy block sequence over `file`.
    pub fn blocks(&self, file: &SourceFile) -> Result<BlockReader, TransferError> {
        let reader = file.open()?;
        Ok(BlockReader::new(reader, file.size(), self.block_size))
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}

// ---------------------------------------------------------------------------
// BlockReader
// ---------------------------------------------------------------------------

/// Produces the blocks of one file in order, hashing each on demand.
pub struct BlockReader {
    reader: Box<dyn Read + Send>,
    block_size: usize,
    file_size: u64,
    offset: u64,
    next_index: u64,
    total_blocks: u64,
}

impl BlockReader {
    /// Wraps `reader`, which must yield exactly `file_size` bytes.
    ///
    /// If `block_size` is 0, [`DEFAULT_BLOCK_SIZE`] (1 MiB) is used.
    pub fn new(reader: Box<dyn Read + Send>, file_size: u64, block_size: usize) -> Self {
        let chunker = Chunker::new(block_size);
        Self {
            reader,
            block_size: chunker.block_size(),
            file_size,
            offset: 0,
            next_index: 0,
            total_blocks: chunker.total_blocks(file_size),
        }
    }

    /// Reads and hashes the next block. Returns `None` after the last one.
    pub fn next_block(&mut self) -> Result<Option<Block>, TransferError> {
        if self.next_index >= self.total_blocks {
            return Ok(None);
        }

        let read_size = std::cmp::min(self.remaining(), self.block_size as u64) as usize;
        let mut buf = vec![0u8; read_size];
        // A short read means the content changed under us; surface it as I/O.
        self.reader.read_exact(&mut buf)?;

        let block = Block {
            index: self.next_index,
            offset: self.offset,
            checksum: checksum_bytes(&buf),
            data: buf,
        };
        self.offset += read_size as u64;
        self.next_index += 1;
        Ok(Some(block))
    }

    /// Total number of blocks this reader will produce.
    pub fn total_blocks(&self) -> u64 {
        self.total_blocks
    }

    /// Current byte offset.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Total file size in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Bytes remaining to read.
    pub fn remaining(&self) -> u64 {
        self.file_size - self.offset
    }
}

impl Iterator for BlockReader {
    type Item = Result<Block, TransferError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block().transpose()
    }
}
