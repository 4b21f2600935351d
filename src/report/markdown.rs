// src/report/markdown.rs
// =============================================================================
// Renders the markdown report that CI posts (and that we echo to stdout).
//
// Layout:
//   ## header with the preview URL
//   bullet list: sitemap URL, checked count, one count per issue kind
//   one table per issue kind that has at least one issue
//
// The output only depends on the *set* of issues: rows are sorted by URL, so
// the order in which probes finished never leaks into the report.
// =============================================================================

use super::summary::{sorted_of_kind, IssueCounts};
use crate::checker::{Issue, IssueKind};

/// Longest error message shown in the exceptions table, in characters
const MAX_ERROR_CHARS: usize = 240;

// Builds the full report as one string
//
// Parameters:
//   base: the preview URL the run was pointed at
//   sitemap_url: where the URL list came from
//   checked_count: how many URLs were probed
//   issues: every issue found, in any order
pub fn render_report(base: &str, sitemap_url: &str, checked_count: usize, issues: &[Issue]) -> String {
    let counts = IssueCounts::from_issues(issues);
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("## Docs route check for `{}`", base));
    lines.push(String::new());
    lines.push(format!("- Sitemap: `{}`", sitemap_url));
    lines.push(format!("- Total sitemap URLs checked: **{}**", checked_count));
    lines.push(format!("- Redirect loops (`?error=true`): **{}**", counts.redirect_error));
    lines.push(format!("- HTTP errors (>= 400): **{}**", counts.http_error));
    lines.push(format!("- Exceptions: **{}**", counts.exception));
    lines.push(String::new());

    push_status_table(
        &mut lines,
        "### Redirect loops (`?error=true`)",
        &sorted_of_kind(issues, IssueKind::RedirectError),
    );
    push_status_table(
        &mut lines,
        "### HTTP errors",
        &sorted_of_kind(issues, IssueKind::HttpError),
    );

    let exceptions = sorted_of_kind(issues, IssueKind::Exception);
    if !exceptions.is_empty() {
        lines.push("### Exceptions".to_string());
        lines.push(String::new());
        lines.push("| URL | Error |".to_string());
        lines.push("|---|---|".to_string());
        for issue in exceptions {
            let safe = one_line_truncated(issue.error().unwrap_or(""));
            lines.push(format!("| `{}` | `{}` |", issue.url(), safe));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

// Table for the two kinds that carry a status code
//
// Nothing at all is emitted when `issues` is empty.
fn push_status_table(lines: &mut Vec<String>, heading: &str, issues: &[&Issue]) {
    if issues.is_empty() {
        return;
    }

    lines.push(heading.to_string());
    lines.push(String::new());
    lines.push("| URL | Status | Location |".to_string());
    lines.push("|---|---:|---|".to_string());
    for issue in issues {
        let status = issue.status().map(|s| s.to_string()).unwrap_or_default();
        lines.push(format!(
            "| `{}` | {} | `{}` |",
            issue.url(),
            status,
            issue.location().unwrap_or("")
        ));
    }
    lines.push(String::new());
}

// Newlines would break the table row, and long errors drown the report
fn one_line_truncated(error: &str) -> String {
    error.replace('\n', " ").chars().take(MAX_ERROR_CHARS).collect()
}
