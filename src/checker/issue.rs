// src/checker/issue.rs
// =============================================================================
// The one domain type of this tool: a problem found while probing a URL.
//
// Each kind carries exactly the fields that make sense for it, so it is
// impossible to build an exception that has a status code, or an HTTP error
// that has an error message.
//
// Rust concepts:
// - Enums with data: each variant is its own little struct
// - serde tagging: variants serialize as flat JSON objects with a "kind" field
// =============================================================================

use serde::Serialize;
use std::fmt;

// The three kinds of issue, without any data attached
//
// Used for counting and grouping in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueKind {
    /// Redirect into the platform's `?error=true` crash page
    RedirectError,
    /// Status code >= 400
    HttpError,
    /// The request itself failed (connect, timeout, TLS, ...)
    Exception,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::RedirectError => "redirect_error",
            IssueKind::HttpError => "http_error",
            IssueKind::Exception => "exception",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// A single URL that failed its check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    RedirectError {
        url: String,
        status: u16,
        location: String,
    },
    HttpError {
        url: String,
        status: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },
    Exception {
        url: String,
        error: String,
    },
}

impl Issue {
    pub fn kind(&self) -> IssueKind {
        match self {
            Issue::RedirectError { .. } => IssueKind::RedirectError,
            Issue::HttpError { .. } => IssueKind::HttpError,
            Issue::Exception { .. } => IssueKind::Exception,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Issue::RedirectError { url, .. }
            | Issue::HttpError { url, .. }
            | Issue::Exception { url, .. } => url,
        }
    }

    /// HTTP status, absent for exceptions
    pub fn status(&self) -> Option<u16> {
        match self {
            Issue::RedirectError { status, .. } | Issue::HttpError { status, .. } => Some(*status),
            Issue::Exception { .. } => None,
        }
    }

    /// `Location` header of the response, when there was one
    pub fn location(&self) -> Option<&str> {
        match self {
            Issue::RedirectError { location, .. } => Some(location),
            Issue::HttpError { location, .. } => location.as_deref(),
            Issue::Exception { .. } => None,
        }
    }

    /// Diagnostic text, only present for exceptions
    pub fn error(&self) -> Option<&str> {
        match self {
            Issue::Exception { error, .. } => Some(error),
            _ => None,
        }
    }
}
