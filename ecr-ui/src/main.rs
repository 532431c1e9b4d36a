//! ecr-ui (Evidence Clip Review) - Read-only evidence clip dashboard
//!
//! Loads a clip dataset from the root folder (multi-run archive, flat list,
//! or a remote URL as last resort), classifies clips into narrative
//! threads, and serves the review dashboard over HTTP.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ecr_common::config::{resolve_root_folder, RootFolder, TomlConfig};
use ecr_ui::{build_router, loader, AppState};

#[derive(Parser, Debug)]
#[command(name = "ecr-ui", about = "Evidence Clip Review dashboard", version)]
struct Args {
    /// Root folder holding the dataset files and clip media
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// HTTP server port
    #[arg(long)]
    port: Option<u16>,

    /// Remote clip dataset URL, fetched when no local dataset exists
    #[arg(long)]
    clips_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml_config = TomlConfig::load_or_default();

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(toml_config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Evidence Clip Review (ecr-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &toml_config);
    let root = RootFolder::new(root_folder);
    root.ensure_directory_exists()?;
    info!("Root folder: {}", root.path().display());

    let threads = loader::load_thread_set(&root)?;
    info!("Thread table: {} declared thread(s)", threads.len());

    let remote_url = args.clips_url.or(toml_config.remote_clips_url);
    let library = match loader::load_library(&root, remote_url.as_deref()).await {
        Ok(library) => {
            info!("✓ Loaded {} run(s)", library.len());
            library
        }
        Err(e) => {
            error!("Error loading clips: {:#}", e);
            return Err(e);
        }
    };

    let port = args.port.unwrap_or(toml_config.port);
    let state = AppState::new(library, threads, Some(root.clips_dir()));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("ecr-ui listening on http://127.0.0.1:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
