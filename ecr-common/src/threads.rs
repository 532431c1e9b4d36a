//! Narrative thread table and clip classifier
//!
//! A thread is a named narrative category with a case-insensitive matching
//! rule and a display description. The table is ordered: declaration order
//! decides which matching thread a clip is filed under and the order groups
//! are rendered in. The table is fixed at startup (built-in, or replaced by
//! a `threads.toml` file) and never mutated at runtime.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::clip::Clip;
use crate::error::{Error, Result};

/// Catch-all category for clips matching no declared thread
pub const FALLBACK_CATEGORY: &str = "General Evidence";

/// One narrative thread declaration
#[derive(Debug, Clone)]
pub struct ThreadDef {
    /// Unique name, also the display label
    pub name: String,
    /// Case-insensitive, unanchored matching rule
    pub pattern: Regex,
    /// Static explanatory text shown in the group header
    pub description: String,
}

impl ThreadDef {
    /// Compile a thread declaration. The pattern is case-insensitive and
    /// unanchored: it matches anywhere in the subject text.
    pub fn new(name: &str, pattern: &str, description: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::Config(format!("Thread '{}': invalid pattern: {}", name, e)))?;
        Ok(Self {
            name: name.to_string(),
            pattern,
            description: description.to_string(),
        })
    }
}

/// Result of classifying one clip
///
/// `matched` holds every matching thread name in declaration order, or the
/// fallback category alone when nothing matched. It is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub matched: Vec<String>,
}

impl Classification {
    /// The single category the clip is displayed under: the
    /// earliest-declared matching thread, or the fallback.
    pub fn primary(&self) -> &str {
        &self.matched[0]
    }
}

/// Ordered set of thread declarations
#[derive(Debug, Clone)]
pub struct ThreadSet {
    threads: Vec<ThreadDef>,
}

/// Built-in thread table, in declaration order
static BUILTIN: Lazy<ThreadSet> = Lazy::new(|| {
    let table = [
        (
            "Becker Contagion",
            "Becker Contagion",
            "Systemic Misidentification: This thread highlights the catastrophic failure to \
             properly identify the 'Most Wanted' fugitive Christopher Foster. By accepting the \
             false alias 'Ed Becker', law enforcement allowed a dangerous criminal to be released \
             while prosecuting the disabled victim.",
        ),
        (
            "Coordinated Extraction",
            "Coordinated Extraction",
            "The Passenger Conspiracy: Evidence suggests a premeditated plan by the passengers \
             to use Mr. Vega as a shield. This includes the unexplained flight of Danielle Allen \
             and the potential coordination with third parties (e.g., the off-duty officer theory).",
        ),
        (
            "Calculated Disablement",
            "Calculated Disablement",
            "Physical Duress & Encirclement: By violently ejecting Mr. Vega's walker from the \
             vehicle, the co-conspirators stripped him of his only means of independent mobility. \
             This act physically trapped him in the driver's seat, cementing the duress.",
        ),
        (
            "Scapegoat Gambit",
            "Scapegoat Gambit",
            "Framing the Vulnerable: This validates Mr. Vega's claim of innocent intent (e.g., \
             the Hobby Town trip) and exposes the State's arbitrary charging decisions. It \
             contrasts his genuine confusion with the calculated deception of his passengers.",
        ),
        (
            "Unconscionable Price",
            "Unconscionable Price",
            "Medical Incompatibility: Demonstrating that Mr. Vega's unique physical condition \
             (triple amputee with a failing prototype implant) renders standard incarceration \
             not just difficult, but constitutionally excessive and dangerous.",
        ),
        (
            "Percival Echo",
            "Percival Echo",
            "Consequences of Release: Documenting the direct causal link between the 'Becker' \
             misidentification and the subsequent tragic death of Stacy Percival. It underscores \
             the high stakes of the initial police failure.",
        ),
        (
            "Illusion of Choice",
            "Illusion of Choice",
            "Psychological & Physical Duress: Evidence that Mr. Vega was operating under extreme \
             fear ('Freeze/Appease' response) and contradictory commands, negating the 'willful' \
             element required for the fleeing charge.",
        ),
        (
            "Police Conduct",
            "Unprofessionalism|Misconduct|Corruption|Giglio",
            "Investigative Failures: Instances of potential bias, mishandling of evidence (e.g., \
             theft jokes), and procedural violations that undermine the integrity of the \
             prosecution's case.",
        ),
    ];

    let threads = table
        .iter()
        .map(|(name, pattern, desc)| {
            ThreadDef::new(name, pattern, desc).expect("built-in thread pattern must compile")
        })
        .collect();

    ThreadSet { threads }
});

impl ThreadSet {
    /// The built-in thread table
    pub fn builtin() -> &'static ThreadSet {
        &BUILTIN
    }

    /// Build a set from compiled declarations, preserving their order
    pub fn from_defs(threads: Vec<ThreadDef>) -> Self {
        Self { threads }
    }

    /// Load a thread table from a TOML file
    ///
    /// File shape: an ordered sequence of `[[thread]]` tables, each with
    /// `name`, `pattern`, and optional `description`. Order in the file is
    /// declaration order.
    pub fn load_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a thread table from TOML text (see [`ThreadSet::load_toml`])
    pub fn from_toml_str(content: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct ThreadEntry {
            name: String,
            pattern: String,
            #[serde(default)]
            description: String,
        }

        #[derive(Deserialize)]
        struct ThreadTable {
            #[serde(default)]
            thread: Vec<ThreadEntry>,
        }

        let table: ThreadTable =
            toml::from_str(content).map_err(|e| Error::Config(format!("Thread table: {}", e)))?;

        if table.thread.is_empty() {
            return Err(Error::Config(
                "Thread table declares no threads".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut threads = Vec::with_capacity(table.thread.len());
        for entry in &table.thread {
            if !seen.insert(entry.name.clone()) {
                return Err(Error::Config(format!(
                    "Thread table declares '{}' twice",
                    entry.name
                )));
            }
            if entry.name == FALLBACK_CATEGORY {
                return Err(Error::Config(format!(
                    "Thread name '{}' is reserved for unmatched clips",
                    FALLBACK_CATEGORY
                )));
            }
            threads.push(ThreadDef::new(&entry.name, &entry.pattern, &entry.description)?);
        }

        Ok(Self { threads })
    }

    /// Declared threads, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ThreadDef> {
        self.threads.iter()
    }

    /// Number of declared threads (the fallback category is not counted)
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Display description for a category name; the fallback category has
    /// no configured description.
    pub fn description_of(&self, category: &str) -> &str {
        self.threads
            .iter()
            .find(|t| t.name == category)
            .map(|t| t.description.as_str())
            .unwrap_or("")
    }

    /// Classify one clip against the declared threads.
    ///
    /// Every rule is tested against the clip's combined lower-cased text;
    /// matches are collected in declaration order. Classification is total:
    /// absent text fields match as empty strings and an unmatched clip
    /// falls back to [`FALLBACK_CATEGORY`].
    pub fn classify(&self, clip: &Clip) -> Classification {
        let subject = clip.subject_text();

        let matched: Vec<String> = self
            .threads
            .iter()
            .filter(|t| t.pattern.is_match(&subject))
            .map(|t| t.name.clone())
            .collect();

        if matched.is_empty() {
            Classification {
                matched: vec![FALLBACK_CATEGORY.to_string()],
            }
        } else {
            Classification { matched }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_with_text(id: &str, description: &str, significance: &str) -> Clip {
        Clip {
            id: id.to_string(),
            description: Some(description.to_string()),
            significance: Some(significance.to_string()),
            ..Clip::default()
        }
    }

    #[test]
    fn test_builtin_declaration_order() {
        let names: Vec<&str> = ThreadSet::builtin().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Becker Contagion",
                "Coordinated Extraction",
                "Calculated Disablement",
                "Scapegoat Gambit",
                "Unconscionable Price",
                "Percival Echo",
                "Illusion of Choice",
                "Police Conduct",
            ]
        );
    }

    #[test]
    fn test_classify_single_match() {
        let c = clip_with_text("clip_001", "possible Becker Contagion issue", "");
        let result = ThreadSet::builtin().classify(&c);
        assert_eq!(result.matched, vec!["Becker Contagion"]);
        assert_eq!(result.primary(), "Becker Contagion");
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let c = clip_with_text("clip_002", "BECKER CONTAGION everywhere", "");
        assert_eq!(
            ThreadSet::builtin().classify(&c).primary(),
            "Becker Contagion"
        );
    }

    #[test]
    fn test_classify_unmatched_falls_back() {
        let c = clip_with_text("clip_003", "unrelated footage", "");
        let result = ThreadSet::builtin().classify(&c);
        assert_eq!(result.matched, vec![FALLBACK_CATEGORY]);
        assert_eq!(result.primary(), FALLBACK_CATEGORY);
    }

    #[test]
    fn test_classify_earliest_declared_wins() {
        // Matches Coordinated Extraction (2nd) and Percival Echo (6th);
        // primary must be the earlier declaration, matches in declared order
        let c = clip_with_text(
            "clip_004",
            "the Percival Echo angle",
            "part of the Coordinated Extraction plan",
        );
        let result = ThreadSet::builtin().classify(&c);
        assert_eq!(result.matched, vec!["Coordinated Extraction", "Percival Echo"]);
        assert_eq!(result.primary(), "Coordinated Extraction");
    }

    #[test]
    fn test_classify_alternation_pattern() {
        for word in ["Unprofessionalism", "misconduct", "CORRUPTION", "Giglio"] {
            let c = clip_with_text("clip_005", &format!("notes on {}", word), "");
            assert_eq!(
                ThreadSet::builtin().classify(&c).primary(),
                "Police Conduct",
                "'{}' should match Police Conduct",
                word
            );
        }
    }

    #[test]
    fn test_classify_uses_significance_and_description() {
        let from_significance = Clip {
            id: "clip_006".to_string(),
            significance: Some("Scapegoat Gambit evidence".to_string()),
            ..Clip::default()
        };
        assert_eq!(
            ThreadSet::builtin().classify(&from_significance).primary(),
            "Scapegoat Gambit"
        );

        // Transcript text is not part of the subject
        let from_transcript = Clip {
            id: "clip_007".to_string(),
            transcript: Some("Scapegoat Gambit mention".to_string()),
            ..Clip::default()
        };
        assert_eq!(
            ThreadSet::builtin().classify(&from_transcript).primary(),
            FALLBACK_CATEGORY
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        let c = clip_with_text("clip_008", "Becker Contagion and Misconduct", "");
        let first = ThreadSet::builtin().classify(&c);
        let second = ThreadSet::builtin().classify(&c);
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_missing_fields_never_fail() {
        let bare = Clip {
            id: "clip_009".to_string(),
            ..Clip::default()
        };
        let result = ThreadSet::builtin().classify(&bare);
        assert_eq!(result.matched, vec![FALLBACK_CATEGORY]);
    }

    #[test]
    fn test_toml_table_preserves_order() {
        let set = ThreadSet::from_toml_str(
            r#"
            [[thread]]
            name = "Beta"
            pattern = "beta"
            description = "Second letter"

            [[thread]]
            name = "Alpha"
            pattern = "alpha|first"
            "#,
        )
        .unwrap();

        let names: Vec<&str> = set.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha"]);
        assert_eq!(set.description_of("Beta"), "Second letter");
        assert_eq!(set.description_of("Alpha"), "");

        let c = clip_with_text("clip_010", "the first beta", "");
        // Both match; Beta is declared earlier
        assert_eq!(set.classify(&c).primary(), "Beta");
    }

    #[test]
    fn test_toml_table_rejects_bad_pattern() {
        let result = ThreadSet::from_toml_str(
            r#"
            [[thread]]
            name = "Broken"
            pattern = "("
            "#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_toml_table_rejects_empty_and_duplicates() {
        assert!(matches!(
            ThreadSet::from_toml_str(""),
            Err(Error::Config(_))
        ));

        let dup = r#"
            [[thread]]
            name = "Twice"
            pattern = "a"

            [[thread]]
            name = "Twice"
            pattern = "b"
        "#;
        assert!(matches!(ThreadSet::from_toml_str(dup), Err(Error::Config(_))));
    }

    #[test]
    fn test_toml_table_rejects_reserved_name() {
        let reserved = format!(
            r#"
            [[thread]]
            name = "{}"
            pattern = "anything"
            "#,
            FALLBACK_CATEGORY
        );
        assert!(matches!(
            ThreadSet::from_toml_str(&reserved),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_description_of_fallback_is_empty() {
        assert_eq!(ThreadSet::builtin().description_of(FALLBACK_CATEGORY), "");
    }
}
