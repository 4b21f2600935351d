// src/config.rs
// =============================================================================
// Fixed settings for a docs route check run.
//
// None of these are exposed on the command line. The worker count, timeouts
// and user agent are fixed here and handed to the sitemap loader and prober.
// =============================================================================

use std::time::Duration;

/// Report file written when `--report-path` is not given.
pub const DEFAULT_REPORT_PATH: &str = "docs-route-check-report.md";

/// Substring the hosting platform puts in the target of a crash redirect.
pub const REDIRECT_ERROR_MARKER: &str = "error=true";

// Settings shared by every stage of a run
#[derive(Debug, Clone)]
pub struct Settings {
    /// How many URL probes may be in flight at once
    pub workers: usize,
    /// Timeout for each probe request
    pub probe_timeout: Duration,
    /// Timeout for the sitemap.xml request
    pub sitemap_timeout: Duration,
    /// User-Agent sent on every request
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            workers: 25,
            probe_timeout: Duration::from_secs(15),
            sitemap_timeout: Duration::from_secs(30),
            user_agent: format!("docs-route-check/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.workers, 25);
        assert_eq!(settings.probe_timeout, Duration::from_secs(15));
        assert_eq!(settings.sitemap_timeout, Duration::from_secs(30));
        assert!(settings.user_agent.starts_with("docs-route-check/"));
    }
}
