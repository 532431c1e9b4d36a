//! # ECR Common Library
//!
//! Shared code for the Evidence Clip Review dashboard:
//! - Clip data model
//! - Thread table and classifier
//! - Grouping and ordering engine
//! - Summary statistics
//! - Run library (named clip collections)
//! - Configuration loading
//! - Duration display formatting

pub mod clip;
pub mod config;
pub mod dataset;
pub mod error;
pub mod grouping;
pub mod human_time;
pub mod stats;
pub mod threads;

pub use clip::Clip;
pub use dataset::{ClipRun, RunLibrary};
pub use error::{Error, Result};
pub use grouping::{group_clips, ThreadGroup};
pub use threads::{Classification, ThreadDef, ThreadSet, FALLBACK_CATEGORY};
