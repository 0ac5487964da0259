//! Upload error types.

use goflux_client::ClientError;
use goflux_protocol::PathError;
use goflux_transfer::TransferError;

/// Errors that abort a single file's upload.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("invalid target path: {0}")]
    Path(#[from] PathError),

    #[error("cannot open source: {0}")]
    Open(#[from] TransferError),

    #[error("block {index} could not be read: {source}")]
    Block { index: u64, source: TransferError },

    #[error("block {index} upload failed: {source}")]
    Transport { index: u64, source: ClientError },

    #[error("task join error: {0}")]
    Join(String),
}

impl UploadError {
    /// Index of the block whose read or send failed, if any.
    pub fn failed_block(&self) -> Option<u64> {
        match self {
            Self::Block { index, .. } | Self::Transport { index, .. } => Some(*index),
            _ => None,
        }
    }
}
