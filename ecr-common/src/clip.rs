//! Clip data model
//!
//! One video-evidence record with descriptive/transcript text and timing
//! metadata. Clips are supplied by the dataset generator and treated as
//! read-only; absent text fields degrade to empty strings, absent durations
//! to zero.

use serde::{Deserialize, Serialize};

/// One video-evidence clip record
///
/// `id` is required and unique across a collection; every other field is
/// optional in the source JSON. Unknown fields are ignored on deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clip {
    /// Unique identifier within a run (e.g. "clip_001")
    pub id: String,

    /// Short free-text description of what the clip shows
    #[serde(default)]
    pub description: Option<String>,

    /// Free-text note on why the clip matters
    #[serde(default)]
    pub significance: Option<String>,

    /// Spoken-word transcript of the clip
    #[serde(default)]
    pub transcript: Option<String>,

    /// Clip length in seconds
    #[serde(default)]
    pub duration_seconds: Option<f64>,

    /// Extracted clip file name, relative to the clip media directory
    #[serde(default)]
    pub filename: Option<String>,

    /// Source video the clip was cut from
    #[serde(default)]
    pub original_video: Option<String>,

    /// Display-only timestamp within the source video
    #[serde(default)]
    pub start_time: Option<String>,

    /// Display-only timestamp within the source video
    #[serde(default)]
    pub end_time: Option<String>,

    /// Summary of the source segment, carried through from the generator
    #[serde(default)]
    pub parent_summary: Option<String>,
}

impl Clip {
    /// Combined lower-cased text the classifier matches against:
    /// significance and description joined with a single space, absent
    /// fields as empty strings.
    pub fn subject_text(&self) -> String {
        format!(
            "{} {}",
            self.significance.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }

    /// Duration in seconds, absent treated as zero
    pub fn duration_or_zero(&self) -> f64 {
        self.duration_seconds.unwrap_or(0.0)
    }

    /// Short display code for clip cards: the final `_`-separated segment
    /// of the uppercased id, with any `.MP4` suffix stripped
    /// ("clip_001" becomes "001").
    pub fn card_code(&self) -> String {
        let upper = self.id.to_uppercase();
        let tail = upper.rsplit('_').next().unwrap_or(upper.as_str());
        tail.replacen(".MP4", "", 1)
    }

    /// `"start - end"` range string for the detail view
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.as_deref().unwrap_or(""),
            self.end_time.as_deref().unwrap_or("")
        )
    }
}
