// src/checker/http.rs
// =============================================================================
// This module probes every sitemap URL with a single GET request.
//
// Key functionality:
// - Redirects are NOT followed: we want to see the redirect itself
// - A redirect whose Location contains `error=true` is the hosting platform's
//   crash-page pattern, and is reported even though the status is only 3xx
// - Any status >= 400 is an HTTP error
// - Network failures become `exception` issues instead of aborting the run
// - Runs up to N checks concurrently on one shared client
//
// There are no retries. One failed attempt is the answer for that URL.
// =============================================================================

use futures::future;
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use reqwest::header::LOCATION;
use reqwest::{redirect, Client};
use std::error::Error as StdError;
use tracing::{debug, warn};

use super::issue::Issue;
use crate::config::{Settings, REDIRECT_ERROR_MARKER};

// Builds the client shared by every probe
//
// The client keeps a connection pool internally and is cheap to clone,
// so all concurrent probes reuse the same connections.
pub fn build_client(settings: &Settings) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(settings.probe_timeout)
        .redirect(redirect::Policy::none())
        .user_agent(settings.user_agent.as_str())
        .build()
}

// Checks all URLs, at most `workers` at a time
//
// Returns only the URLs that failed, in completion order (not input order).
// Every URL is probed exactly once and the future resolves only after all
// probes have finished.
pub async fn check_urls(client: &Client, urls: &[String], workers: usize) -> Vec<Issue> {
    let futures = urls.iter().map(|url| {
        let client = client.clone(); // Clone the handle, not the pool
        let url = url.clone();
        async move { check_single_url(&client, url).await }
    });

    stream::iter(futures)
        .buffer_unordered(workers.max(1))
        .filter_map(future::ready) // Drop the passes (None)
        .collect()
        .await
}

// Probes one URL and classifies the outcome
//
// Returns None when the URL passed.
pub async fn check_single_url(client: &Client, url: String) -> Option<Issue> {
    match client.get(&url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let location = response
                .headers()
                .get(LOCATION)
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .filter(|value| !value.is_empty());
            debug!(url = %url, status, "probed");

            let issue = classify_response(url, status, location);
            if let Some(issue) = &issue {
                warn!(
                    url = issue.url(),
                    kind = %issue.kind(),
                    status,
                    location = issue.location().unwrap_or(""),
                    "route check failed"
                );
            }
            issue
        }
        Err(e) => {
            let error = describe_error(&e);
            warn!(url = %url, error = %error, "request failed");
            Some(Issue::Exception { url, error })
        }
    }
}

// Turns a status code and Location header into an issue (or a pass)
//
// Checked in this order:
// 1. redirect + Location contains `error=true`  -> redirect_error
// 2. status >= 400                              -> http_error
// 3. anything else (2xx, ordinary 3xx)          -> pass
pub fn classify_response(url: String, status: u16, location: Option<String>) -> Option<Issue> {
    let is_redirect = matches!(status, 301 | 302 | 303 | 307 | 308);

    match location {
        Some(location) if is_redirect && location.contains(REDIRECT_ERROR_MARKER) => {
            Some(Issue::RedirectError {
                url,
                status,
                location,
            })
        }
        location if status >= 400 => Some(Issue::HttpError {
            url,
            status,
            location,
        }),
        _ => None,
    }
}

// Formats a request failure as "<Kind>: <message>"
//
// reqwest has one error type, so the "kind" is derived from what the
// error says about itself.
fn describe_error(error: &reqwest::Error) -> String {
    let kind = if error.is_timeout() {
        "TimeoutError"
    } else if error.is_connect() {
        "ConnectError"
    } else if error.is_redirect() {
        "RedirectError"
    } else if error.is_body() {
        "BodyError"
    } else if error.is_decode() {
        "DecodeError"
    } else if error.is_builder() {
        "BuilderError"
    } else if error.is_request() {
        "RequestError"
    } else {
        "HttpClientError"
    };

    format!("{}: {}", kind, with_causes(error))
}

// Display text of `error` plus every cause in its source chain
//
// Some layers already print their cause inline (reqwest and hyper do), so a
// cause is only appended when its text is not in the message yet.
fn with_causes(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why buffer_unordered instead of spawning a task per URL?
//    - It caps in-flight requests at `workers` without a semaphore
//    - Results come back as soon as each request finishes
//    - Nothing is cancelled: the stream is drained to the end
//
// 2. Why is there no lock around the results?
//    - Each probe returns its own Option<Issue>
//    - collect() gathers them once the stream is done
//    - The only thing the probes share is the client, which is thread-safe
// -----------------------------------------------------------------------------
