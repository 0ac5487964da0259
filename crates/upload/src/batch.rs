//! Batch coordinator for multi-file uploads.
//!
//! Runs the per-file pipeline over a set of files, strictly one after
//! another, and keeps going when a file fails.

use goflux_client::BlockTransport;
use goflux_protocol::RemotePath;
use goflux_transfer::{Chunker, SourceFile};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::file::FileUpload;
use crate::types::{UploadEvent, UploadOutcome};

/// Uploads batches of files (from a picker or a drop) one at a time.
pub struct BatchCoordinator {
    chunker: Chunker,
    events_tx: mpsc::UnboundedSender<UploadEvent>,
    events_rx: Option<mpsc::UnboundedReceiver<UploadEvent>>,
}

impl Default for BatchCoordinator {
    fn default() -> Self {
        Self::new(Chunker::default())
    }
}

impl BatchCoordinator {
    /// Creates a coordinator that splits files with `chunker`.
    pub fn new(chunker: Chunker) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            chunker,
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<UploadEvent>> {
        self.events_rx.take()
    }

    /// Uploads `files` into `target_dir`, returning one outcome per file in
    /// input order.
    ///
    /// File `k + 1` starts only after file `k` has produced its outcome.
    /// A failed file is reported and the batch continues with the next.
    pub async fn upload_all(
        &self,
        transport: &dyn BlockTransport,
        files: &[SourceFile],
        target_dir: &RemotePath,
    ) -> Vec<UploadOutcome> {
        let target_dir = target_dir.clone();
        let uploader = FileUpload::new(transport, self.chunker);

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let outcome = uploader.upload(file, &target_dir, &self.events_tx).await;
            self.report(&outcome);
            outcomes.push(outcome);
        }

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(
            files = outcomes.len(),
            failed,
            dir = %target_dir,
            "batch finished"
        );
        outcomes
    }

    fn report(&self, outcome: &UploadOutcome) {
        match outcome.error() {
            None => {
                let _ = self.events_tx.send(UploadEvent::Completed {
                    file_name: outcome.file_name.clone(),
                    target_path: outcome.target_path.clone(),
                });
                info!(
                    file = %outcome.file_name,
                    path = %outcome.target_path,
                    blocks = outcome.total_blocks,
                    "upload completed"
                );
            }
            Some(err) => {
                let _ = self.events_tx.send(UploadEvent::Failed {
                    file_name: outcome.file_name.clone(),
                    error: err.to_string(),
                });
                error!(
                    file = %outcome.file_name,
                    acknowledged = outcome.blocks_acknowledged,
                    total = outcome.total_blocks,
                    error = %err,
                    "upload failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStore;
    use goflux_transfer::reassemble;

    fn patterned(len: usize, seed: u8) -> Vec<u8> {
        (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
    }

    fn three_files() -> Vec<SourceFile> {
        vec![
            SourceFile::from_bytes("a.bin", patterned(30, 1)),
            SourceFile::from_bytes("b.bin", patterned(50, 2)),
            SourceFile::from_bytes("c.bin", patterned(15, 3)),
        ]
    }

    #[tokio::test]
    async fn continues_after_a_failed_file() {
        let store = MockStore::new();
        // Second file: 5 blocks, the 3rd one (index 2) is rejected.
        store.fail_at("/in/b.bin", 2);

        let coordinator = BatchCoordinator::new(Chunker::new(10));
        let dir = RemotePath::parse("/in").unwrap();
        let outcomes = coordinator.upload_all(&store, &three_files(), &dir).await;

        let statuses: Vec<bool> = outcomes.iter().map(UploadOutcome::is_success).collect();
        assert_eq!(statuses, vec![true, false, true]);

        let failed = &outcomes[1];
        assert_eq!(failed.total_blocks, 5);
        assert_eq!(failed.blocks_acknowledged, 2);
        assert_eq!(failed.failed_block(), Some(2));
        assert_eq!(failed.blocks_unsent(), 2);

        let b_ids: Vec<u64> = store
            .received_for("/in/b.bin")
            .iter()
            .map(|c| c.chunk_id)
            .collect();
        assert_eq!(b_ids, vec![0, 1, 2]);

        // The third file still arrived intact.
        let c = store.received_for("/in/c.bin");
        assert_eq!(reassemble(&c).unwrap(), patterned(15, 3));
    }

    #[tokio::test]
    async fn files_are_strictly_sequential() {
        let store = MockStore::new();
        let coordinator = BatchCoordinator::new(Chunker::new(10));
        let outcomes = coordinator
            .upload_all(&store, &three_files(), &RemotePath::root())
            .await;
        assert!(outcomes.iter().all(UploadOutcome::is_success));

        // Arrival order groups each file's blocks together, in input order.
        let order: Vec<(String, u64)> = store
            .received()
            .into_iter()
            .map(|c| (c.path, c.chunk_id))
            .collect();
        let expected: Vec<(String, u64)> = [("/a.bin", 3u64), ("/b.bin", 5), ("/c.bin", 2)]
            .iter()
            .flat_map(|(p, n)| (0..*n).map(move |i| (p.to_string(), i)))
            .collect();
        assert_eq!(order, expected);
        assert_eq!(store.max_in_flight(), 1);
    }

    #[tokio::test]
    async fn emits_completed_and_failed_events() {
        let store = MockStore::new();
        store.fail_at("/b.bin", 0);

        let mut coordinator = BatchCoordinator::new(Chunker::new(10));
        let mut events_rx = coordinator.take_events().unwrap();
        coordinator
            .upload_all(&store, &three_files(), &RemotePath::root())
            .await;
        drop(coordinator);

        let mut events = Vec::new();
        while let Some(e) = events_rx.recv().await {
            events.push(e);
        }

        let terminal: Vec<&UploadEvent> = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    UploadEvent::Completed { .. } | UploadEvent::Failed { .. }
                )
            })
            .collect();
        assert_eq!(terminal.len(), 3);
        assert!(matches!(terminal[0], UploadEvent::Completed { file_name, .. } if file_name == "a.bin"));
        assert!(matches!(terminal[1], UploadEvent::Failed { file_name, .. } if file_name == "b.bin"));
        assert!(matches!(terminal[2], UploadEvent::Completed { file_name, .. } if file_name == "c.bin"));
    }

    #[tokio::test]
    async fn progress_monotonic_per_file() {
        let store = MockStore::new();
        let mut coordinator = BatchCoordinator::new(Chunker::new(7));
        let mut events_rx = coordinator.take_events().unwrap();
        coordinator
            .upload_all(&store, &three_files(), &RemotePath::root())
            .await;
        drop(coordinator);

        let mut last: Option<(String, u8)> = None;
        while let Some(e) = events_rx.recv().await {
            match e {
                UploadEvent::Started { file_name, .. } => last = Some((file_name, 0)),
                UploadEvent::Progress { file_name, percent } => {
                    let (current, prev) = last.clone().unwrap();
                    assert_eq!(current, file_name);
                    assert!(percent >= prev, "progress regressed: {prev} -> {percent}");
                    last = Some((file_name, percent));
                }
                UploadEvent::Completed { .. } => {
                    assert_eq!(last.as_ref().unwrap().1, 100);
                }
                UploadEvent::Failed { .. } => panic!("no failures expected"),
            }
        }
    }

    #[tokio::test]
    async fn empty_batch() {
        let store = MockStore::new();
        let coordinator = BatchCoordinator::default();
        let outcomes = coordinator
            .upload_all(&store, &[], &RemotePath::root())
            .await;
        assert!(outcomes.is_empty());
        assert!(store.received().is_empty());
    }

    #[tokio::test]
    async fn take_events_once() {
        let mut coordinator = BatchCoordinator::default();
        assert!(coordinator.take_events().is_some());
        assert!(coordinator.take_events().is_none());
    }
}
