//! Transport traits consumed by the upload and browse flows.

use std::future::Future;
use std::pin::Pin;

use goflux_protocol::{ChunkData, RemotePath};

use crate::error::ClientError;

/// Acknowledgement of one accepted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// The 2xx status the store answered with.
    pub status: u16,
}

/// Sends one block at a time to the store.
///
/// A call is a single request/response exchange. Success is decided by
/// the response status alone; implementations never retry and keep no
/// state between calls.
pub trait BlockTransport: Send + Sync {
    /// Uploads one block.
    fn send<'a>(
        &'a self,
        chunk: &'a ChunkData,
    ) -> Pin<Box<dyn Future<Output = Result<Ack, ClientError>> + Send + 'a>>;
}

/// Read side of the store namespace.
pub trait NamespaceStore: Send + Sync {
    /// Lists entry names under a path prefix. No entries is an empty vector.
    fn list<'a>(
        &'a self,
        path: &'a RemotePath,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, ClientError>> + Send + 'a>>;

    /// Fetches the raw content stored at `path`.
    fn download<'a>(
        &'a self,
        path: &'a RemotePath,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, ClientError>> + Send + 'a>>;
}
