//! ecr-ui library - Evidence Clip Review dashboard service
//!
//! Serves the browser UI and the JSON API over an immutable clip library
//! loaded once at startup. Classification and grouping are recomputed per
//! request from the shared state; nothing is mutated after startup.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use ecr_common::{RunLibrary, ThreadSet};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod api;
pub mod loader;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded clip runs, immutable after startup
    pub library: Arc<RunLibrary>,
    /// Thread table the classifier runs against
    pub threads: Arc<ThreadSet>,
    /// Clip media directory served under /clips (absent in tests)
    pub clips_dir: Option<PathBuf>,
}

impl AppState {
    /// Create new application state
    pub fn new(library: RunLibrary, threads: ThreadSet, clips_dir: Option<PathBuf>) -> Self {
        Self {
            library: Arc::new(library),
            threads: Arc::new(threads),
            clips_dir,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let mut router = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/runs", get(api::list_runs))
        .route("/api/stats", get(api::get_stats))
        .route("/api/groups", get(api::get_groups))
        .route("/api/clips/:id", get(api::get_clip_detail))
        .merge(api::health_routes());

    // Clip media for in-browser playback
    if let Some(dir) = &state.clips_dir {
        router = router.nest_service("/clips", ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
