//! Summary statistics over a clip collection

use serde::Serialize;

use crate::clip::Clip;

/// Header statistics for one clip collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    /// Number of clips in the collection
    pub total_clips: usize,
    /// Sum of all clip durations, floor-divided to whole minutes
    pub total_minutes: u64,
}

/// Compute collection totals. Absent durations count as zero.
pub fn library_stats(clips: &[Clip]) -> LibraryStats {
    let total_seconds: f64 = clips.iter().map(Clip::duration_or_zero).sum();
    LibraryStats {
        total_clips: clips.len(),
        total_minutes: (total_seconds / 60.0).floor() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_with_duration(id: &str, duration: Option<f64>) -> Clip {
        Clip {
            id: id.to_string(),
            duration_seconds: duration,
            ..Clip::default()
        }
    }

    #[test]
    fn test_stats_floor_minutes_and_missing_durations() {
        let clips = vec![
            clip_with_duration("c1", Some(45.0)),
            clip_with_duration("c2", Some(75.0)),
            clip_with_duration("c3", None),
        ];
        let stats = library_stats(&clips);
        assert_eq!(stats.total_clips, 3);
        // floor((45 + 75 + 0) / 60) = 2
        assert_eq!(stats.total_minutes, 2);
    }

    #[test]
    fn test_stats_empty_collection() {
        let stats = library_stats(&[]);
        assert_eq!(stats.total_clips, 0);
        assert_eq!(stats.total_minutes, 0);
    }

    #[test]
    fn test_stats_sub_minute_total() {
        let clips = vec![clip_with_duration("c1", Some(59.9))];
        assert_eq!(library_stats(&clips).total_minutes, 0);
    }
}
