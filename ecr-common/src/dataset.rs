//! Run library: named clip collections and run selection
//!
//! A dataset is either a single flat clip list or an archive of named
//! processing runs (directory names like `run_2025-11-20_1430`). Runs are
//! presented newest-first, with any "Latest" run pinned to the top; the
//! first run in that order is the default selection.

use std::cmp::Ordering;

use crate::clip::Clip;
use crate::error::{Error, Result};

/// Run name used when a flat clip list is loaded without run structure
pub const FLAT_RUN_NAME: &str = "clips";

/// One named processing run and its clips
#[derive(Debug, Clone)]
pub struct ClipRun {
    pub name: String,
    pub clips: Vec<Clip>,
}

/// Ordered, immutable set of runs loaded at startup
#[derive(Debug, Clone)]
pub struct RunLibrary {
    runs: Vec<ClipRun>,
}

/// Run ordering: names containing "Latest" first, the rest descending
/// lexicographically (newest `run_YYYY-MM-DD_HHMM` name first).
fn run_order(a: &str, b: &str) -> Ordering {
    match (a.contains("Latest"), b.contains("Latest")) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => b.cmp(a),
    }
}

impl RunLibrary {
    /// Build a library from named runs, sorting them into display order
    pub fn new(mut runs: Vec<ClipRun>) -> Self {
        runs.sort_by(|a, b| run_order(&a.name, &b.name));
        Self { runs }
    }

    /// Wrap a flat clip list as a single-run library
    pub fn from_flat(clips: Vec<Clip>) -> Self {
        Self {
            runs: vec![ClipRun {
                name: FLAT_RUN_NAME.to_string(),
                clips,
            }],
        }
    }

    /// Run names in display order
    pub fn run_names(&self) -> Vec<&str> {
        self.runs.iter().map(|r| r.name.as_str()).collect()
    }

    /// The run shown when no explicit selection is made
    pub fn default_run(&self) -> Option<&str> {
        self.runs.first().map(|r| r.name.as_str())
    }

    /// Clips of a named run
    pub fn get(&self, name: &str) -> Result<&[Clip]> {
        self.runs
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.clips.as_slice())
            .ok_or_else(|| Error::NotFound(format!("run '{}'", name)))
    }

    /// True when the dataset had no run structure (selector is hidden)
    pub fn is_single_run(&self) -> bool {
        self.runs.len() == 1
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
