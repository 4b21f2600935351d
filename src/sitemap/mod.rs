// src/sitemap/mod.rs
// =============================================================================
// This module turns a docs preview's sitemap.xml into the list of URLs to check.
//
// Submodules:
// - fetch: Downloads sitemap.xml and decides which failures are fatal
// - parse: Pulls <loc> entries out of the XML and filters them by origin
//
// The result is always sorted and deduplicated, so two runs against the same
// sitemap probe the same URLs in the same order.
// =============================================================================

mod fetch;
mod parse;

// Re-export the public API so callers can write `sitemap::load_sitemap()`
pub use fetch::{build_client, load_sitemap};
