//! Run selection shared by the data endpoints
//!
//! Every data endpoint takes an optional `?run=` parameter; when omitted,
//! the library's default run (newest, with any "Latest" run pinned first)
//! is used.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use ecr_common::Clip;

use crate::AppState;

/// Resolve the requested run to its clip collection
pub fn select_run<'a>(
    state: &'a AppState,
    requested: Option<&str>,
) -> Result<(String, &'a [Clip]), ApiError> {
    let name = match requested {
        Some(name) => name.to_string(),
        None => state
            .library
            .default_run()
            .ok_or(ApiError::NoData)?
            .to_string(),
    };

    let clips = state
        .library
        .get(&name)
        .map_err(|_| ApiError::UnknownRun(name.clone()))?;

    Ok((name, clips))
}

/// Data endpoint errors
#[derive(Debug)]
pub enum ApiError {
    UnknownRun(String),
    UnknownClip(String),
    NoData,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UnknownRun(name) => {
                (StatusCode::NOT_FOUND, format!("Unknown run: {}", name))
            }
            ApiError::UnknownClip(id) => {
                (StatusCode::NOT_FOUND, format!("Unknown clip: {}", id))
            }
            ApiError::NoData => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "No clip data loaded".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
