//! Namespace listing and downloads.

use std::path::{Path, PathBuf};

use goflux_client::{ClientError, NamespaceStore};
use goflux_protocol::{PathError, RemotePath};
use tracing::{debug, info, warn};

/// Errors produced while browsing or downloading.
#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    #[error("invalid entry name: {0}")]
    Path(#[from] PathError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Entries found under one namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub path: RemotePath,
    /// Leaf names in the order the store returned them.
    pub entries: Vec<String>,
}

/// What a listing looks like to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingView {
    /// The "no entries" state.
    Empty,
    Entries(Vec<String>),
    /// Listing failed; the message is shown in place of the entries.
    Failed(String),
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn view(&self) -> ListingView {
        if self.entries.is_empty() {
            ListingView::Empty
        } else {
            ListingView::Entries(self.entries.clone())
        }
    }
}

/// Read-only view over a [`NamespaceStore`].
pub struct Browser<'a> {
    store: &'a dyn NamespaceStore,
}

impl<'a> Browser<'a> {
    pub fn new(store: &'a dyn NamespaceStore) -> Self {
        Self { store }
    }

    /// Lists the entries under `path`.
    pub async fn list(&self, path: &RemotePath) -> Result<Listing, BrowseError> {
        let entries = self.store.list(path).await?;
        debug!(path = %path, entries = entries.len(), "listed");
        Ok(Listing {
            path: path.clone(),
            entries,
        })
    }

    /// Lists `path` for display. Errors become [`ListingView::Failed`].
    pub async fn load(&self, path: &RemotePath) -> ListingView {
        match self.list(path).await {
            Ok(listing) => listing.view(),
            Err(e) => {
                warn!(path = %path, error = %e, "failed to load listing");
                ListingView::Failed(e.to_string())
            }
        }
    }

    /// Downloads `entry` from `dir` into `dest_dir`, keeping its leaf name.
    ///
    /// Returns the local path written.
    pub async fn download(
        &self,
        dir: &RemotePath,
        entry: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, BrowseError> {
        let remote = dir.join(entry)?;
        let body = self.store.download(&remote).await?;

        let local = dest_dir.join(entry);
        tokio::fs::write(&local, &body)
            .await
            .map_err(|source| BrowseError::Write {
                path: local.clone(),
                source,
            })?;

        info!(
            remote = %remote,
            local = %local.display(),
            bytes = body.len(),
            "download complete"
        );
        Ok(local)
    }
}

/// Breadcrumb trail for `path`: `" / a / b"`, or empty for the root.
pub fn breadcrumbs(path: &RemotePath) -> String {
    if path.is_root() {
        return String::new();
    }
    let parts: Vec<&str> = path.segments().collect();
    format!(" / {}", parts.join(" / "))
}
