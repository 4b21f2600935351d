// src/report/mod.rs
// =============================================================================
// This module turns the collected issues into reports.
//
// Submodules:
// - markdown: The human-readable report (written to disk and stdout)
// - json: Optional machine-readable copy
// - summary: Counting and sorting shared by both
// =============================================================================

mod json;
mod markdown;
mod summary;

pub use json::{render_json, JsonReport};
pub use markdown::render_report;
pub use summary::IssueCounts;
