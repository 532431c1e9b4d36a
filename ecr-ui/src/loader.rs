//! Dataset acquisition
//!
//! Three mutually exclusive loading strategies, tried in order:
//! 1. Multi-run archive: `<root>/runs.json` (run name -> clip array)
//! 2. Flat dataset: `<root>/clips_metadata.json` (single clip array)
//! 3. Remote fetch of a configured URL (flat clip array)
//!
//! The first strategy that yields a library wins. A present-but-malformed
//! dataset file is an error, not a fall-through: a broken dataset must be
//! surfaced rather than silently skipped. When every strategy fails the
//! caller gets a single error and serves nothing.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use ecr_common::config::RootFolder;
use ecr_common::{Clip, ClipRun, RunLibrary, ThreadSet};

/// Load the clip library from the root folder, falling back to the remote
/// URL when no local dataset exists.
pub async fn load_library(root: &RootFolder, remote_url: Option<&str>) -> Result<RunLibrary> {
    // Strategy 1: multi-run archive
    let runs_path = root.runs_path();
    if runs_path.exists() {
        let library = load_runs_file(&runs_path)?;
        if !library.is_empty() {
            info!(
                "Loaded run archive {} ({} runs)",
                runs_path.display(),
                library.len()
            );
            return Ok(library);
        }
        info!(
            "Run archive {} declares no runs, trying flat dataset",
            runs_path.display()
        );
    }

    // Strategy 2: flat dataset
    let flat_path = root.flat_clips_path();
    if flat_path.exists() {
        let library = load_flat_file(&flat_path)?;
        info!("Loaded flat dataset {}", flat_path.display());
        return Ok(library);
    }

    // Strategy 3: remote fetch
    if let Some(url) = remote_url {
        info!("No local dataset, fetching {}", url);
        return fetch_remote(url).await;
    }

    anyhow::bail!(
        "No clip dataset found: expected {} or {}, and no remote URL is configured",
        runs_path.display(),
        flat_path.display()
    )
}

/// Load the thread table: `<root>/threads.toml` when present, otherwise the
/// built-in table.
pub fn load_thread_set(root: &RootFolder) -> Result<ThreadSet> {
    let path = root.threads_path();
    if path.exists() {
        let set = ThreadSet::load_toml(&path)
            .with_context(|| format!("Failed to load thread table {}", path.display()))?;
        info!("Loaded thread table override {}", path.display());
        return Ok(set);
    }
    Ok(ThreadSet::builtin().clone())
}

/// Parse a multi-run archive: JSON object mapping run name to clip array
fn load_runs_file(path: &Path) -> Result<RunLibrary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read run archive {}", path.display()))?;
    let runs: BTreeMap<String, Vec<Clip>> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse run archive {}", path.display()))?;

    Ok(RunLibrary::new(
        runs.into_iter()
            .map(|(name, clips)| ClipRun { name, clips })
            .collect(),
    ))
}

/// Parse a flat dataset: JSON array of clips, loaded as a single run
fn load_flat_file(path: &Path) -> Result<RunLibrary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let clips: Vec<Clip> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse dataset {}", path.display()))?;

    Ok(RunLibrary::from_flat(clips))
}

/// Fetch a flat clip array from a remote URL
async fn fetch_remote(url: &str) -> Result<RunLibrary> {
    let clips: Vec<Clip> = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("Server rejected fetch of {}", url))?
        .json()
        .await
        .with_context(|| format!("Failed to parse clip data from {}", url))?;

    Ok(RunLibrary::from_flat(clips))
}
