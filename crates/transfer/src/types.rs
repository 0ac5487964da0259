use std::fmt;
use std::io::{Cursor, Read};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use goflux_protocol::{ChunkData, RemotePath};

use crate::TransferError;

/// One contiguous slice of a file plus its integrity digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Zero-based position in the file's block sequence.
    pub index: u64,
    /// Byte offset of the first payload byte within the file.
    pub offset: u64,
    /// Raw block payload.
    pub data: Vec<u8>,
    /// Lowercase hex SHA-256 of `data`.
    pub checksum: String,
}

impl Block {
    /// Byte range `[start, end)` covered by this block.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.offset + self.data.len() as u64
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty (only the single block of a zero-byte file).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Converts the block into its `/upload` request body.
    pub fn into_chunk_data(self, target: &RemotePath, total: u64) -> ChunkData {
        ChunkData {
            path: target.as_str().to_string(),
            chunk_id: self.index,
            data: self.data,
            checksum: self.checksum,
            total,
        }
    }
}

#[derive(Clone)]
enum Content {
    Memory(Arc<[u8]>),
    Disk(PathBuf),
}

/// A file queued for upload: display name, byte length and content.
///
/// The content is treated as immutable for the duration of an upload.
#[derive(Clone)]
pub struct SourceFile {
    name: String,
    size: u64,
    content: Content,
}

impl SourceFile {
    /// Wraps in-memory content (e.g. bytes handed over by a picker or drop).
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = data.into();
        let data: Arc<[u8]> = data.into();
        Self {
            name: name.into(),
            size: data.len() as u64,
            content: Content::Memory(data),
        }
    }

    /// References a local file. The display name is the path's leaf.
    pub fn from_path(path: &Path) -> Result<Self, TransferError> {
        let name = path
            .file_name()
            .ok_or_else(|| TransferError::InvalidPath(format!("no file name: {}", path.display())))?
            .to_string_lossy()
            .into_owned();
        let size = std::fs::metadata(path)?.len();
        Ok(Self {
            name,
            size,
            content: Content::Disk(path.to_path_buf()),
        })
    }

    /// Display (leaf) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Content length in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Opens a fresh sequential reader over the content.
    pub(crate) fn open(&self) -> Result<Box<dyn Read + Send>, TransferError> {
        match &self.content {
            Content::Memory(data) => Ok(Box::new(Cursor::new(Arc::clone(data)))),
            Content::Disk(path) => Ok(Box::new(std::fs::File::open(path)?)),
        }
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = match &self.content {
            Content::Memory(_) => "memory".to_string(),
            Content::Disk(path) => path.display().to_string(),
        };
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("origin", &origin)
            .finish()
    }
}
