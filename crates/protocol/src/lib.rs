//! Wire types for the goflux file store HTTP API.
//!
//! The store exposes three endpoints (`/upload`, `/list`, `/download`)
//! over a flat, path-addressed namespace. This crate holds the request
//! and response shapes plus the path naming convention shared by the
//! upload and browse flows.

pub mod constants;
pub mod messages;
pub mod path;

pub use messages::{ChunkData, parse_list_response};
pub use path::{PathError, RemotePath, validate_leaf_name};
