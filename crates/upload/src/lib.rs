//! Chunked upload pipeline.
//!
//! This crate holds the upload **business logic** and has no UI or
//! network dependency of its own: the caller supplies a
//! [`BlockTransport`](goflux_client::BlockTransport) and consumes
//! [`UploadEvent`]s from a channel.
//!
//! # Pipeline
//!
//! 1. **Resolve**: join the target directory and the file's leaf name
//! 2. **Chunk**: lazily read and hash one block at a time
//! 3. **Send**: transmit blocks strictly in order, one in flight at most
//! 4. **Report**: emit progress per acknowledged block and an outcome per file
//!
//! A block failure aborts only the current file; the batch moves on.
//! Nothing is rolled back: blocks the store already acknowledged for a
//! failed file stay there until the store discards them.

pub mod batch;
pub mod error;
pub mod file;
pub mod types;

#[cfg(test)]
mod mock;

pub use batch::BatchCoordinator;
pub use error::UploadError;
pub use file::FileUpload;
pub use types::{UploadEvent, UploadOutcome, UploadStatus};
