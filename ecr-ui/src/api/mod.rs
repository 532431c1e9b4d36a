//! HTTP API handlers for ecr-ui

pub mod buildinfo;
pub mod clips;
pub mod groups;
pub mod health;
pub mod runs;
pub mod select;
pub mod stats;
pub mod ui;

pub use buildinfo::get_build_info;
pub use clips::get_clip_detail;
pub use groups::get_groups;
pub use health::health_routes;
pub use runs::list_runs;
pub use stats::get_stats;
pub use ui::{serve_app_js, serve_index};
