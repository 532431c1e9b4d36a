//! Summary statistics endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use ecr_common::human_time::format_total_minutes;
use ecr_common::stats::library_stats;

use super::select::{select_run, ApiError};
use crate::AppState;

/// Query parameters for the stats view
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Run name; default run when omitted
    pub run: Option<String>,
}

/// Collection totals for the dashboard header
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub run: String,
    pub total_clips: usize,
    /// Sum of clip durations, floor-divided to whole minutes
    pub total_minutes: u64,
    /// Display label ("12m")
    pub total_minutes_label: String,
}

/// GET /api/stats?run=NAME
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    let (run, clips) = select_run(&state, query.run.as_deref())?;
    let stats = library_stats(clips);

    Ok(Json(StatsResponse {
        run,
        total_clips: stats.total_clips,
        total_minutes: stats.total_minutes,
        total_minutes_label: format_total_minutes(stats.total_minutes),
    }))
}
