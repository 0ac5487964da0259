mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use goflux_client::HttpClient;
use goflux_transfer::Chunker;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ClientConfig;

#[derive(Parser)]
#[command(name = "goflux", version)]
#[command(about = "Chunked file transfer client for a goflux store", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = "goflux.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload files into a remote directory
    Put {
        /// Remote directory
        #[arg(long, default_value = "/")]
        to: String,

        /// Local files, uploaded in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Download a remote file
    Get {
        /// Remote file path
        remote_path: String,

        /// Local directory to write into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// List a remote directory
    Ls {
        /// Remote directory
        #[arg(default_value = "/")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,goflux=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (cfg, created) = ClientConfig::load_or_create(&cli.config)?;
    if created {
        info!(path = %cli.config.display(), "created default configuration");
    }

    let client = HttpClient::new(&cfg.server_url)
        .with_context(|| format!("invalid server_url in {}", cli.config.display()))?;
    let chunker = Chunker::new(cfg.chunk_size);

    match cli.command {
        Command::Put { to, files } => {
            let summary = commands::put(&client, chunker, &files, &to).await?;
            if summary.failed > 0 {
                anyhow::bail!(
                    "{} of {} uploads failed",
                    summary.failed,
                    summary.failed + summary.uploaded
                );
            }
        }
        Command::Get { remote_path, out } => {
            commands::get(&client, &remote_path, &out).await?;
        }
        Command::Ls { path } => {
            commands::ls(&client, &path).await?;
        }
    }

    Ok(())
}
