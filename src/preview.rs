// src/preview.rs
// =============================================================================
// The docs preview base URL given on the command line.
//
// Everything else in a run is derived from this value:
// - the sitemap location ({base}/sitemap.xml)
// - the origin that sitemap entries must share to be checked
//
// A bad value here is the only thing that makes the tool exit with code 2.
// =============================================================================

use thiserror::Error;
use url::Url;

// Why a preview URL was rejected
#[derive(Debug, Error)]
pub enum BaseUrlError {
    #[error("preview_url must start with http(s): {0}")]
    NotHttp(String),

    #[error("preview_url is not a valid URL: {url} ({source})")]
    Invalid {
        url: String,
        source: url::ParseError,
    },
}

/// A validated preview base URL, kept without any trailing slash.
#[derive(Debug, Clone)]
pub struct PreviewUrl {
    base: String,
    parsed: Url,
}

impl PreviewUrl {
    /// Trims whitespace and trailing slashes, then checks the value is an
    /// absolute http or https URL.
    pub fn parse(raw: &str) -> Result<Self, BaseUrlError> {
        let trimmed = raw.trim();
        if !trimmed.starts_with("http") {
            return Err(BaseUrlError::NotHttp(trimmed.to_string()));
        }

        let base = trimmed.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base).map_err(|source| BaseUrlError::Invalid {
            url: base.clone(),
            source,
        })?;

        // "httpfoo://..." starts with "http" but is not something we can fetch
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BaseUrlError::NotHttp(trimmed.to_string()));
        }

        Ok(PreviewUrl { base, parsed })
    }

    /// The base URL exactly as it appears in the report
    pub fn as_str(&self) -> &str {
        &self.base
    }

    pub fn url(&self) -> &Url {
        &self.parsed
    }

    pub fn sitemap_url(&self) -> String {
        format!("{}/sitemap.xml", self.base)
    }
}
