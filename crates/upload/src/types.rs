//! Data types for the upload flow.

/// Event emitted while files are uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// A file's first block is about to be read.
    Started {
        file_name: String,
        target_path: String,
        total_blocks: u64,
    },
    /// A block was acknowledged. `percent` is non-decreasing per file and
    /// reaches 100 only when the last block is acknowledged.
    Progress { file_name: String, percent: u8 },
    /// Every block of the file was acknowledged.
    Completed {
        file_name: String,
        target_path: String,
    },
    /// The file's upload was aborted.
    Failed { file_name: String, error: String },
}

/// Final state of one file's upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Success,
    Failed {
        reason: String,
        /// Block whose read or send failed; `None` if no block was attempted.
        failed_block: Option<u64>,
    },
}

/// Result of uploading a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub file_name: String,
    pub target_path: String,
    pub total_blocks: u64,
    /// Blocks the store acknowledged, always a prefix `0..blocks_acknowledged`.
    pub blocks_acknowledged: u64,
    pub status: UploadStatus,
}

impl UploadOutcome {
    /// Whether every block was acknowledged.
    pub fn is_success(&self) -> bool {
        matches!(self.status, UploadStatus::Success)
    }

    /// Failure reason, if the upload failed.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            UploadStatus::Success => None,
            UploadStatus::Failed { reason, .. } => Some(reason),
        }
    }

    /// Index of the failed block, if the upload failed on one.
    pub fn failed_block(&self) -> Option<u64> {
        match &self.status {
            UploadStatus::Success => None,
            UploadStatus::Failed { failed_block, .. } => *failed_block,
        }
    }

    /// Blocks that were never sent.
    pub fn blocks_unsent(&self) -> u64 {
        let attempted = self.blocks_acknowledged + u64::from(self.failed_block().is_some());
        self.total_blocks.saturating_sub(attempted)
    }
}
