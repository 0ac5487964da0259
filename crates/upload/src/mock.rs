//! In-memory store used by the pipeline tests.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use goflux_client::{Ack, BlockTransport, ClientError};
use goflux_protocol::ChunkData;

/// Records every received block and rejects configured ones.
#[derive(Default)]
pub(crate) struct MockStore {
    received: Mutex<Vec<ChunkData>>,
    /// path -> chunk index that answers 500.
    fail_at: Mutex<HashMap<String, u64>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_at(&self, path: &str, chunk_id: u64) {
        self.fail_at.lock().unwrap().insert(path.to_string(), chunk_id);
    }

    /// All requests in arrival order, rejected ones included.
    pub(crate) fn received(&self) -> Vec<ChunkData> {
        self.received.lock().unwrap().clone()
    }

    pub(crate) fn received_for(&self, path: &str) -> Vec<ChunkData> {
        self.received()
            .into_iter()
            .filter(|c| c.path == path)
            .collect()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl BlockTransport for MockStore {
    fn send<'a>(
        &'a self,
        chunk: &'a ChunkData,
    ) -> Pin<Box<dyn Future<Output = Result<Ack, ClientError>> + Send + 'a>> {
        Box::pin(async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            // Give a pipelining caller the chance to issue another request.
            tokio::task::yield_now().await;

            self.received.lock().unwrap().push(chunk.clone());
            let reject = self.fail_at.lock().unwrap().get(&chunk.path) == Some(&chunk.chunk_id);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if reject {
                Err(ClientError::Status {
                    status: 500,
                    body: format!("chunk {} rejected", chunk.chunk_id),
                })
            } else {
                Ok(Ack { status: 200 })
            }
        })
    }
}
