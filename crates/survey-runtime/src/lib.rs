//! Runtime layer for Tourist Insights.
//!
//! Owns the lifecycle of analysis snapshots: loading datasets on demand,
//! caching the current snapshot and replacing it atomically when a new
//! dataset arrives.

pub mod dataset_manager;

pub use survey_core as core;
pub use survey_data as data;
