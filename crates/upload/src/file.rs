//! Per-file upload: drives one file's blocks through the transport in order.

use goflux_client::BlockTransport;
use goflux_protocol::RemotePath;
use goflux_transfer::{Block, BlockProgress, BlockReader, Chunker, SourceFile, TransferError};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::UploadError;
use crate::types::{UploadEvent, UploadOutcome, UploadStatus};

/// Uploads single files over a [`BlockTransport`].
pub struct FileUpload<'a> {
    transport: &'a dyn BlockTransport,
    chunker: Chunker,
}

impl<'a> FileUpload<'a> {
    /// Creates an uploader that splits files with `chunker`.
    pub fn new(transport: &'a dyn BlockTransport, chunker: Chunker) -> Self {
        Self { transport, chunker }
    }

    /// Uploads `file` into `target_dir` and reports how far it got.
    ///
    /// Blocks are read, hashed and sent one at a time; block `i + 1` is
    /// not read before block `i` is acknowledged. The first read or send
    /// failure aborts the file. Already acknowledged blocks are not
    /// rolled back.
    pub async fn upload(
        &self,
        file: &SourceFile,
        target_dir: &RemotePath,
        events_tx: &mpsc::UnboundedSender<UploadEvent>,
    ) -> UploadOutcome {
        // The caller may move on to another directory; keep our own copy.
        let target_dir = target_dir.clone();
        let total_blocks = self.chunker.total_blocks(file.size());
        let mut progress = BlockProgress::new(total_blocks);

        let result = match target_dir.join(file.name()) {
            Ok(target) => {
                let status = self
                    .send_blocks(file, &target, &mut progress, events_tx)
                    .await;
                (target.to_string(), status)
            }
            Err(e) => (
                format!("{}/{}", target_dir.as_str().trim_end_matches('/'), file.name()),
                Err(UploadError::from(e)),
            ),
        };

        let (target_path, status) = result;
        let status = match status {
            Ok(()) => UploadStatus::Success,
            Err(e) => {
                warn!(
                    file = %file.name(),
                    acknowledged = progress.acknowledged(),
                    total = total_blocks,
                    error = %e,
                    "upload aborted"
                );
                UploadStatus::Failed {
                    reason: e.to_string(),
                    failed_block: e.failed_block(),
                }
            }
        };

        UploadOutcome {
            file_name: file.name().to_string(),
            target_path,
            total_blocks,
            blocks_acknowledged: progress.acknowledged(),
            status,
        }
    }

    /// Sends every block of `file` to `target`, updating `progress`.
    async fn send_blocks(
        &self,
        file: &SourceFile,
        target: &RemotePath,
        progress: &mut BlockProgress,
        events_tx: &mpsc::UnboundedSender<UploadEvent>,
    ) -> Result<(), UploadError> {
        let total = progress.total();
        let _ = events_tx.send(UploadEvent::Started {
            file_name: file.name().to_string(),
            target_path: target.to_string(),
            total_blocks: total,
        });

        let mut reader = tokio::task::spawn_blocking({
            let file = file.clone();
            let chunker = self.chunker;
            move || chunker.blocks(&file)
        })
        .await
        .map_err(|e| UploadError::Join(e.to_string()))??;

        loop {
            let index = progress.acknowledged();
            let (returned, next) = read_next_block(reader).await?;
            reader = returned;

            let Some(block) = next.map_err(|source| UploadError::Block { index, source })? else {
                break;
            };

            let chunk = block.into_chunk_data(target, total);
            self.transport
                .send(&chunk)
                .await
                .map_err(|source| UploadError::Transport { index, source })?;

            let percent = progress.acknowledge();
            debug!(file = %file.name(), block = index, total, percent, "block sent");
            let _ = events_tx.send(UploadEvent::Progress {
                file_name: file.name().to_string(),
                percent,
            });
        }

        Ok(())
    }
}

/// Reads and hashes the next block off the async executor.
async fn read_next_block(
    mut reader: BlockReader,
) -> Result<(BlockReader, Result<Option<Block>, TransferError>), UploadError> {
    tokio::task::spawn_blocking(move || {
        let next = reader.next_block();
        (reader, next)
    })
    .await
    .map_err(|e| UploadError::Join(e.to_string()))
}
