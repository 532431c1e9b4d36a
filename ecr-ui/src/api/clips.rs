//! Single-clip detail view
//!
//! Backs the dashboard's modal overlay: full text fields with placeholder
//! strings for absent transcript/significance, uppercased id, source video
//! reference, and the display time range.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::groups::video_path;
use super::select::{select_run, ApiError};
use crate::AppState;

/// Query parameters for the detail view
#[derive(Debug, Deserialize)]
pub struct ClipQuery {
    /// Run name; default run when omitted
    pub run: Option<String>,
}

/// Clip detail response
#[derive(Debug, Serialize)]
pub struct ClipDetailResponse {
    /// Uppercased clip id
    pub id: String,
    pub description: Option<String>,
    /// Transcript text, or a placeholder when absent
    pub transcript: String,
    /// Significance text, or a placeholder when absent
    pub significance: String,
    pub source_video: Option<String>,
    /// `"start - end"` display range
    pub timestamp: String,
    /// Playback path under /clips, when the clip file exists
    pub video: Option<String>,
}

/// GET /api/clips/:id?run=NAME
///
/// Returns full detail for one clip of the selected run. Unknown clip ids
/// yield 404.
pub async fn get_clip_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ClipQuery>,
) -> Result<Json<ClipDetailResponse>, ApiError> {
    let (_, clips) = select_run(&state, query.run.as_deref())?;

    let clip = clips
        .iter()
        .find(|c| c.id == id)
        .ok_or(ApiError::UnknownClip(id))?;

    Ok(Json(ClipDetailResponse {
        id: clip.id.to_uppercase(),
        description: clip.description.clone(),
        transcript: clip
            .transcript
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("No transcript available.")
            .to_string(),
        significance: clip
            .significance
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("No significance noted.")
            .to_string(),
        source_video: clip.original_video.clone(),
        timestamp: clip.time_range(),
        video: video_path(clip),
    }))
}
