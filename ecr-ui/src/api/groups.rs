//! Grouped clip view
//!
//! Classifies and groups the selected run's clips and returns the groups
//! in rendering order: declared-thread order with empty groups dropped,
//! the fallback category last, and a rotating display hue per rendered
//! group.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use ecr_common::{group_clips, human_time::format_clip_seconds, Clip};

use super::select::{select_run, ApiError};
use crate::AppState;

/// Query parameters for the grouped view
#[derive(Debug, Deserialize)]
pub struct GroupsQuery {
    /// Run name; default run when omitted
    pub run: Option<String>,
}

/// One clip card in a group section
#[derive(Debug, Serialize)]
pub struct ClipCard {
    pub id: String,
    /// Short display code ("001" for "clip_001")
    pub code: String,
    /// Whole-second duration label ("45s")
    pub duration: String,
    pub description: Option<String>,
    /// Playback path under /clips, when the clip file exists
    pub video: Option<String>,
}

impl ClipCard {
    fn from_clip(clip: &Clip) -> Self {
        Self {
            id: clip.id.clone(),
            code: clip.card_code(),
            duration: format_clip_seconds(clip.duration_seconds),
            description: clip.description.clone(),
            video: video_path(clip),
        }
    }
}

/// One rendered group section
#[derive(Debug, Serialize)]
pub struct GroupView {
    pub category: String,
    pub description: String,
    pub hue: u32,
    pub clip_count: usize,
    pub clips: Vec<ClipCard>,
}

/// Grouped clips response
#[derive(Debug, Serialize)]
pub struct GroupsResponse {
    pub run: String,
    pub total_clips: usize,
    pub groups: Vec<GroupView>,
}

/// GET /api/groups?run=NAME
///
/// Returns the selected run's clips partitioned into ordered display
/// groups. Unknown run names yield 404.
pub async fn get_groups(
    State(state): State<AppState>,
    Query(query): Query<GroupsQuery>,
) -> Result<Json<GroupsResponse>, ApiError> {
    let (run, clips) = select_run(&state, query.run.as_deref())?;

    let groups = group_clips(clips, &state.threads)
        .into_iter()
        .map(|g| GroupView {
            clip_count: g.members.len(),
            clips: g.members.iter().map(ClipCard::from_clip).collect(),
            category: g.category,
            description: g.description,
            hue: g.hue,
        })
        .collect();

    Ok(Json(GroupsResponse {
        run,
        total_clips: clips.len(),
        groups,
    }))
}

/// Browser playback path for a clip's extracted media file
pub(crate) fn video_path(clip: &Clip) -> Option<String> {
    clip.filename
        .as_deref()
        .filter(|f| !f.is_empty())
        .map(|f| format!("/clips/{}", f))
}
