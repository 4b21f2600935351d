// src/report/summary.rs
// Per-kind issue counts, shared by the markdown and JSON reports.

use serde::Serialize;

use crate::checker::{Issue, IssueKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueCounts {
    pub redirect_error: usize,
    pub http_error: usize,
    pub exception: usize,
}

impl IssueCounts {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut counts = IssueCounts::default();
        for issue in issues {
            match issue.kind() {
                IssueKind::RedirectError => counts.redirect_error += 1,
                IssueKind::HttpError => counts.http_error += 1,
                IssueKind::Exception => counts.exception += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.redirect_error + self.http_error + self.exception
    }
}

// Issues of one kind, sorted by URL
//
// sort_by is stable, so two issues for the same URL keep their input order.
pub fn sorted_of_kind(issues: &[Issue], kind: IssueKind) -> Vec<&Issue> {
    let mut selected: Vec<&Issue> = issues.iter().filter(|i| i.kind() == kind).collect();
    selected.sort_by(|a, b| a.url().cmp(b.url()));
    selected
}
