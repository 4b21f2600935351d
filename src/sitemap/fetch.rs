// src/sitemap/fetch.rs
// =============================================================================
// Downloads {base}/sitemap.xml and turns it into the list of URLs to probe.
//
// Every failure in here is fatal for the run: if we can't get a trustworthy
// list of pages there is nothing meaningful to report, and an empty list must
// not be mistaken for "everything passed".
// =============================================================================

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;

use super::parse::{extract_locs, same_origin_urls, XmlError};
use crate::config::Settings;
use crate::preview::PreviewUrl;

// Why the sitemap could not produce a list of URLs
//
// The messages are what ends up on stderr, so they name the sitemap URL.
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Failed to fetch sitemap at {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Sitemap fetch failed: {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to parse sitemap XML from {url}: {source}")]
    Parse { url: String, source: XmlError },

    #[error("No URLs to check after filtering from sitemap: {url}")]
    Empty { url: String },
}

// Builds the client used for the sitemap request
//
// Unlike the probe client this one follows redirects, so a preview that
// serves sitemap.xml behind a redirect still works.
pub fn build_client(settings: &Settings) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(settings.user_agent.as_str())
        .build()
}

// Fetches and parses the sitemap for `preview`
//
// Returns the deduplicated, same-origin, sorted URL list.
pub async fn load_sitemap(
    client: &Client,
    preview: &PreviewUrl,
    settings: &Settings,
) -> Result<Vec<String>, SitemapError> {
    let url = preview.sitemap_url();
    info!(sitemap = %url, "fetching sitemap");

    let response = client
        .get(&url)
        .timeout(settings.sitemap_timeout)
        .send()
        .await
        .map_err(|source| SitemapError::Fetch {
            url: url.clone(),
            source,
        })?;

    // Only a plain 200 counts; a 204 or 206 is not a sitemap we can trust
    if response.status() != StatusCode::OK {
        return Err(SitemapError::Status {
            url,
            status: response.status().as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| SitemapError::Fetch {
        url: url.clone(),
        source,
    })?;

    let locs = extract_locs(&body).map_err(|source| SitemapError::Parse {
        url: url.clone(),
        source,
    })?;
    let found = locs.len();

    let urls = same_origin_urls(preview.url(), locs);
    info!(found, kept = urls.len(), "parsed sitemap");

    if urls.is_empty() {
        return Err(SitemapError::Empty { url });
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn load(server: &MockServer) -> Result<Vec<String>, SitemapError> {
        let settings = Settings::default();
        let client = build_client(&settings).unwrap();
        let preview = PreviewUrl::parse(&server.uri()).unwrap();
        load_sitemap(&client, &preview, &settings).await
    }

    #[tokio::test]
    async fn test_load_filters_and_sorts() {
        let server = MockServer::start().await;
        let base = server.uri();
        let body = format!(
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                 <url><loc>{base}/b</loc></url>
                 <url><loc>{base}/a</loc></url>
                 <url><loc>{base}/a</loc></url>
                 <url><loc>https://elsewhere.example.com/c</loc></url>
               </urlset>"#
        );
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .and(header("user-agent", Settings::default().user_agent.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let urls = load(&server).await.unwrap();
        assert_eq!(urls, vec![format!("{base}/a"), format!("{base}/b")]);
    }

    #[tokio::test]
    async fn test_non_200_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        match load(&server).await {
            Err(SitemapError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bad_xml_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<urlset><url></urlset>"))
            .mount(&server)
            .await;

        assert!(matches!(
            load(&server).await,
            Err(SitemapError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_only_foreign_urls_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<urlset><url><loc>https://elsewhere.example.com/</loc></url></urlset>",
            ))
            .mount(&server)
            .await;

        let err = load(&server).await.unwrap_err();
        assert!(matches!(err, SitemapError::Empty { .. }));
        assert!(err.to_string().starts_with("No URLs to check"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fatal() {
        // Bind then drop a listener so the port is (almost certainly) closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let settings = Settings::default();
        let client = build_client(&settings).unwrap();
        let preview = PreviewUrl::parse(&format!("http://{addr}")).unwrap();

        assert!(matches!(
            load_sitemap(&client, &preview, &settings).await,
            Err(SitemapError::Fetch { .. })
        ));
    }
}
