// src/report/json.rs
// =============================================================================
// Machine-readable copy of the report, written when `--json-path` is given.
//
// Same content as the markdown: the counts plus every issue, sorted by URL.
// Issues serialize as flat objects tagged with "kind".
// =============================================================================

use serde::Serialize;

use super::summary::IssueCounts;
use crate::checker::Issue;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub base_url: &'a str,
    pub sitemap_url: &'a str,
    pub checked: usize,
    pub counts: IssueCounts,
    pub issues: Vec<&'a Issue>,
}

impl<'a> JsonReport<'a> {
    pub fn new(base_url: &'a str, sitemap_url: &'a str, checked: usize, issues: &'a [Issue]) -> Self {
        let mut sorted: Vec<&Issue> = issues.iter().collect();
        sorted.sort_by(|a, b| a.url().cmp(b.url()).then(a.kind().cmp(&b.kind())));

        JsonReport {
            base_url,
            sitemap_url,
            checked,
            counts: IssueCounts::from_issues(issues),
            issues: sorted,
        }
    }
}

pub fn render_json(report: &JsonReport<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
