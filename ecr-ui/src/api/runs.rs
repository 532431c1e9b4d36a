//! Run listing for the dashboard's run selector

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Run listing response
#[derive(Debug, Serialize)]
pub struct RunListResponse {
    /// Run names in display order (newest first, "Latest" pinned)
    pub runs: Vec<String>,
    /// Run shown when no explicit selection is made
    pub default_run: Option<String>,
    /// True when the dataset has no run structure (selector is hidden)
    pub single_run: bool,
}

/// GET /api/runs
pub async fn list_runs(State(state): State<AppState>) -> Json<RunListResponse> {
    Json(RunListResponse {
        runs: state
            .library
            .run_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        default_run: state.library.default_run().map(str::to_string),
        single_run: state.library.is_single_run(),
    })
}
