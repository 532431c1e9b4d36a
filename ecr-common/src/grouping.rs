//! Grouping and ordering engine
//!
//! Partitions a clip collection by primary category, orders the non-empty
//! groups by thread declaration order (fallback last), sorts members by id,
//! and assigns each rendered group a rotating display hue. Groups are
//! rebuilt from scratch on every call; nothing is patched incrementally.

use serde::Serialize;

use crate::clip::Clip;
use crate::threads::{ThreadSet, FALLBACK_CATEGORY};

/// Hue of the first rendered group (blue-cyan)
const HUE_BASE: u32 = 200;
/// Hue shift between consecutive rendered groups
const HUE_STEP: u32 = 40;

/// One rendered group of clips sharing a primary category
#[derive(Debug, Clone, Serialize)]
pub struct ThreadGroup {
    /// Thread name, or the fallback category
    pub category: String,
    /// Static description from the thread table (empty for the fallback)
    pub description: String,
    /// Display hue in degrees, assigned by rendering position
    pub hue: u32,
    /// Member clips, sorted ascending by id
    pub members: Vec<Clip>,
}

/// Partition `clips` into ordered display groups.
///
/// One bucket per declared thread (declaration order) plus the fallback
/// bucket is tracked; buckets with zero members are dropped from the output
/// and do not consume a hue slot. Members are sorted by plain lexicographic
/// id comparison, so "clip_10" sorts before "clip_2".
pub fn group_clips(clips: &[Clip], threads: &ThreadSet) -> Vec<ThreadGroup> {
    // Buckets in rendering order: declared threads, then the fallback
    let mut buckets: Vec<(String, Vec<Clip>)> = threads
        .iter()
        .map(|t| (t.name.clone(), Vec::new()))
        .collect();
    buckets.push((FALLBACK_CATEGORY.to_string(), Vec::new()));

    for clip in clips {
        let primary = threads.classify(clip).primary().to_string();
        // classify only yields declared names or the fallback
        if let Some((_, members)) = buckets.iter_mut().find(|(name, _)| *name == primary) {
            members.push(clip.clone());
        }
    }

    let mut groups = Vec::new();
    for (category, mut members) in buckets {
        if members.is_empty() {
            continue;
        }
        members.sort_by(|a, b| a.id.cmp(&b.id));

        let hue = (HUE_BASE + groups.len() as u32 * HUE_STEP) % 360;
        groups.push(ThreadGroup {
            description: threads.description_of(&category).to_string(),
            category,
            hue,
            members,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threads::ThreadDef;
    use std::collections::HashSet;

    fn clip(id: &str, description: &str) -> Clip {
        Clip {
            id: id.to_string(),
            description: Some(description.to_string()),
            ..Clip::default()
        }
    }

    /// Thread set with one simple keyword rule per name
    fn keyword_threads(names: &[&str]) -> ThreadSet {
        ThreadSet::from_defs(
            names
                .iter()
                .map(|n| ThreadDef::new(n, &n.to_lowercase(), "").unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_groups_partition_the_collection() {
        let clips = vec![
            clip("clip_001", "Becker Contagion fallout"),
            clip("clip_002", "unrelated footage"),
            clip("clip_003", "Percival Echo aftermath"),
            clip("clip_004", "more unrelated footage"),
        ];
        let groups = group_clips(&clips, ThreadSet::builtin());

        // No empty groups in the output
        assert!(groups.iter().all(|g| !g.members.is_empty()));

        // Every clip appears exactly once across all groups
        let mut seen = HashSet::new();
        for group in &groups {
            for member in &group.members {
                assert!(seen.insert(member.id.clone()), "duplicate {}", member.id);
            }
        }
        assert_eq!(seen.len(), clips.len());
    }

    #[test]
    fn test_group_order_follows_declaration_order() {
        let clips = vec![
            clip("clip_001", "no match here"),
            clip("clip_002", "Percival Echo"),
            clip("clip_003", "Becker Contagion"),
        ];
        let groups = group_clips(&clips, ThreadSet::builtin());
        let categories: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["Becker Contagion", "Percival Echo", FALLBACK_CATEGORY]
        );
    }

    #[test]
    fn test_empty_groups_skip_hue_slots() {
        // Threads Alpha, Beta, Gamma declared; Beta matches nothing.
        // Gamma must take hue 240, not 280.
        let threads = keyword_threads(&["Alpha", "Beta", "Gamma"]);
        let clips = vec![clip("c1", "alpha lead"), clip("c2", "gamma lead")];

        let groups = group_clips(&clips, &threads);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Alpha");
        assert_eq!(groups[0].hue, 200);
        assert_eq!(groups[1].category, "Gamma");
        assert_eq!(groups[1].hue, 240);
    }

    #[test]
    fn test_hue_rotation_and_wraparound() {
        let names = ["T1", "T2", "T3", "T4", "T5"];
        let threads = keyword_threads(&names);
        let clips: Vec<Clip> = names
            .iter()
            .enumerate()
            .map(|(i, n)| clip(&format!("c{}", i), &n.to_lowercase()))
            .collect();

        let groups = group_clips(&clips, &threads);
        let hues: Vec<u32> = groups.iter().map(|g| g.hue).collect();
        // (200 + index * 40) % 360 wraps after the fourth rendered group
        assert_eq!(hues, vec![200, 240, 280, 320, 0]);
    }

    #[test]
    fn test_members_sorted_lexicographically() {
        let clips = vec![
            clip("b2", "unmatched"),
            clip("b10", "unmatched"),
            clip("a9", "unmatched"),
        ];
        let groups = group_clips(&clips, ThreadSet::builtin());
        assert_eq!(groups.len(), 1);

        let ids: Vec<&str> = groups[0].members.iter().map(|c| c.id.as_str()).collect();
        // Plain string comparison, not numeric-aware: "b10" before "b2"
        assert_eq!(ids, vec!["a9", "b10", "b2"]);
    }

    #[test]
    fn test_fallback_group_has_empty_description() {
        let clips = vec![clip("clip_001", "nothing notable")];
        let groups = group_clips(&clips, ThreadSet::builtin());
        assert_eq!(groups[0].category, FALLBACK_CATEGORY);
        assert_eq!(groups[0].description, "");
    }

    #[test]
    fn test_matched_and_unmatched_scenario() {
        // Becker Contagion is declared first of eight threads; the fallback
        // renders after it as the second group.
        let clips = vec![
            Clip {
                id: "a1".to_string(),
                description: Some("possible Becker Contagion issue".to_string()),
                significance: Some("".to_string()),
                ..Clip::default()
            },
            Clip {
                id: "a2".to_string(),
                description: Some("unrelated footage".to_string()),
                significance: Some("".to_string()),
                ..Clip::default()
            },
        ];
        let groups = group_clips(&clips, ThreadSet::builtin());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Becker Contagion");
        assert_eq!(groups[0].hue, 200);
        assert_eq!(groups[0].members[0].id, "a1");
        assert_eq!(groups[1].category, FALLBACK_CATEGORY);
        assert_eq!(groups[1].hue, 240);
        assert_eq!(groups[1].members[0].id, "a2");
    }

    #[test]
    fn test_regrouping_is_a_full_recompute() {
        let clips = vec![clip("c1", "alpha"), clip("c2", "beta")];

        let wide = keyword_threads(&["Alpha", "Beta"]);
        let narrow = keyword_threads(&["Beta"]);

        let first = group_clips(&clips, &wide);
        assert_eq!(first.len(), 2);

        // Same collection against a different table: nothing is carried over
        let second = group_clips(&clips, &narrow);
        let categories: Vec<&str> = second.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["Beta", FALLBACK_CATEGORY]);
        assert_eq!(second[0].hue, 200);
    }

    #[test]
    fn test_empty_collection_renders_no_groups() {
        let groups = group_clips(&[], ThreadSet::builtin());
        assert!(groups.is_empty());
    }
}
