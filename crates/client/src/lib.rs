//! HTTP transport for the goflux store.
//!
//! Upload and browse logic only see the [`BlockTransport`] and
//! [`NamespaceStore`] traits; [`HttpClient`] implements both on top of
//! `reqwest`, and tests substitute in-memory mocks.

pub mod error;
pub mod http;
pub mod transport;

pub use error::ClientError;
pub use http::HttpClient;
pub use transport::{Ack, BlockTransport, NamespaceStore};
