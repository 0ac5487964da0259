//! Browsing the store namespace.
//!
//! The namespace is flat, so "navigating" is only a matter of changing
//! the [`RemotePath`](goflux_protocol::RemotePath) prefix passed to
//! [`Browser::list`]. Entries are leaf names relative to that prefix.

pub mod browse;

pub use browse::{BrowseError, Browser, Listing, ListingView, breadcrumbs};
