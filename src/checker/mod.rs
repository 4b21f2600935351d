// src/checker/mod.rs
// =============================================================================
// This module contains the URL probing logic.
//
// Submodules:
// - issue: The Issue type (what can go wrong with a URL)
// - http: Makes the requests and classifies each response
// =============================================================================

mod http;
mod issue;

// Re-export public items so callers can write `checker::check_urls()`
pub use http::{build_client, check_urls};
pub use issue::{Issue, IssueKind};
