//! `put`, `get` and `ls` command handlers.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use goflux_browser::{Browser, ListingView, breadcrumbs};
use goflux_client::{BlockTransport, NamespaceStore};
use goflux_notify::{NoticeKind, NoticeQueue};
use goflux_protocol::RemotePath;
use goflux_transfer::{Chunker, SourceFile};
use goflux_upload::{BatchCoordinator, UploadEvent};
use tokio::sync::mpsc;
use tracing::warn;

/// Width of the progress bar in characters.
const BAR_WIDTH: usize = 40;

/// Result of a `put` batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutSummary {
    pub uploaded: usize,
    pub failed: usize,
}

/// Uploads `files` into the remote directory `to`, one after another.
pub async fn put(
    transport: &dyn BlockTransport,
    chunker: Chunker,
    files: &[PathBuf],
    to: &str,
) -> anyhow::Result<PutSummary> {
    let target_dir =
        RemotePath::parse(to).with_context(|| format!("invalid remote directory {to:?}"))?;

    let mut notices = NoticeQueue::new();
    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        match SourceFile::from_path(path) {
            Ok(file) => sources.push(file),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "cannot open file");
                notices.error(format!("Upload failed: {}: {e}", path.display()));
            }
        }
    }
    let unreadable = notices.len();
    show_notices(&mut notices);

    let mut coordinator = BatchCoordinator::new(chunker);
    let events = coordinator
        .take_events()
        .context("upload events already taken")?;
    let renderer = tokio::spawn(render_events(events, notices));

    let outcomes = coordinator
        .upload_all(transport, &sources, &target_dir)
        .await;
    // Closes the event channel so the renderer can finish.
    drop(coordinator);
    renderer.await.context("progress renderer panicked")?;

    let uploaded = outcomes.iter().filter(|o| o.is_success()).count();
    Ok(PutSummary {
        uploaded,
        failed: outcomes.len() - uploaded + unreadable,
    })
}

/// Downloads `remote_path` into `out_dir`.
pub async fn get(
    store: &dyn NamespaceStore,
    remote_path: &str,
    out_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let remote = RemotePath::parse(remote_path)
        .with_context(|| format!("invalid remote path {remote_path:?}"))?;
    let entry = remote
        .leaf()
        .with_context(|| format!("{remote} is not a file"))?;

    let mut notices = NoticeQueue::new();
    let result = Browser::new(store)
        .download(&remote.parent(), entry, out_dir)
        .await;
    match &result {
        Ok(local) => {
            notices.success(format!("Downloaded: {entry} → {}", local.display()));
        }
        Err(e) => {
            notices.error(format!("Download failed: {e}"));
        }
    }
    show_notices(&mut notices);

    Ok(result?)
}

/// Lists the entries under `path`.
pub async fn ls(store: &dyn NamespaceStore, path: &str) -> anyhow::Result<()> {
    let dir = RemotePath::parse(path).with_context(|| format!("invalid remote path {path:?}"))?;
    let view = Browser::new(store).load(&dir).await;
    println!("{}", render_listing(&dir, &view));

    if let ListingView::Failed(msg) = view {
        anyhow::bail!("listing {dir} failed: {msg}");
    }
    Ok(())
}

/// Formats a listing the way `ls` prints it.
pub fn render_listing(dir: &RemotePath, view: &ListingView) -> String {
    let crumbs = breadcrumbs(dir);
    let header = if crumbs.is_empty() {
        "Files in /".to_string()
    } else {
        format!("Files in{crumbs}")
    };

    match view {
        ListingView::Empty => format!("{header}\n  No files in this directory"),
        ListingView::Entries(entries) => {
            let mut out = header;
            for entry in entries {
                out.push_str("\n  ");
                out.push_str(entry);
            }
            out
        }
        ListingView::Failed(msg) => format!("{header}\n  Failed to load files: {msg}"),
    }
}

/// One-line progress bar: `name [=====>    ]  42%`.
pub fn progress_line(file_name: &str, percent: u8) -> String {
    let percent = usize::from(percent.min(100));
    let filled = percent * BAR_WIDTH / 100;
    let head = if filled < BAR_WIDTH { ">" } else { "" };
    let pad = BAR_WIDTH - filled - head.len();
    format!(
        "{file_name} [{}{head}{}] {percent:>3}%",
        "=".repeat(filled),
        " ".repeat(pad)
    )
}

/// Draws progress and turns terminal events into notices until the
/// channel closes.
async fn render_events(mut events: mpsc::UnboundedReceiver<UploadEvent>, mut notices: NoticeQueue) {
    while let Some(event) = events.recv().await {
        match event {
            UploadEvent::Started {
                file_name,
                target_path,
                total_blocks,
            } => {
                println!("Uploading {file_name} → {target_path} ({total_blocks} blocks)");
                eprint!("\r{}", progress_line(&file_name, 0));
            }
            UploadEvent::Progress { file_name, percent } => {
                eprint!("\r{}", progress_line(&file_name, percent));
            }
            UploadEvent::Completed { file_name, .. } => {
                eprintln!();
                notices.success(format!("Upload complete: {file_name}"));
            }
            UploadEvent::Failed { file_name, error } => {
                eprintln!();
                notices.error(format!("Upload failed: {file_name}: {error}"));
            }
        }
        let _ = std::io::stderr().flush();
        show_notices(&mut notices);
    }
}

/// Prints every queued notice once. A terminal has no redraw loop, so
/// notices are dismissed as soon as they are shown.
fn show_notices(notices: &mut NoticeQueue) {
    for notice in notices.drain() {
        match notice.kind {
            NoticeKind::Success => println!("✓ {}", notice.message),
            NoticeKind::Error => eprintln!("✗ {}", notice.message),
        }
    }
}
