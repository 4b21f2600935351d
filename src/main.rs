// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate the preview URL
// 3. Load the sitemap and pick out the URLs to check
// 4. Probe every URL concurrently
// 5. Write the markdown report, echo it to stdout
// 6. Exit with proper code (0 = all pass, 1 = issues or sitemap failure,
//    2 = bad --preview-url)
//
// Logs go to stderr through `tracing` (set RUST_LOG to change the level);
// stdout only ever carries the report.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - probing and classifying URLs
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - fixed run settings
mod preview; // src/preview.rs - the validated base URL
mod report; // src/report/ - markdown and JSON output
mod sitemap; // src/sitemap/ - fetching and parsing sitemap.xml

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use config::Settings;
use preview::PreviewUrl;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            // Anything unexpected (client setup, writing the report) fails the gate
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so the report on stdout can be piped as-is
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docs_route_check=info")),
        )
        .init();
}

// The main application logic
// Returns:
//   Ok(0) = every URL passed
//   Ok(1) = issues found, or the sitemap could not be used
//   Ok(2) = invalid --preview-url
//   Err = unexpected error (treated as exit code 1)
async fn run(cli: Cli) -> Result<i32> {
    let preview = match PreviewUrl::parse(&cli.preview_url) {
        Ok(preview) => preview,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(2);
        }
    };

    let settings = Settings::default();
    let sitemap_url = preview.sitemap_url();

    let sitemap_client =
        sitemap::build_client(&settings).context("failed to build HTTP client")?;
    let urls = match sitemap::load_sitemap(&sitemap_client, &preview, &settings).await {
        Ok(urls) => urls,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(1);
        }
    };

    info!(
        count = urls.len(),
        workers = settings.workers,
        "checking sitemap URLs"
    );

    let probe_client = checker::build_client(&settings).context("failed to build HTTP client")?;
    let issues = checker::check_urls(&probe_client, &urls, settings.workers).await;

    let markdown = report::render_report(preview.as_str(), &sitemap_url, urls.len(), &issues);
    std::fs::write(&cli.report_path, &markdown).with_context(|| {
        format!("failed to write report to {}", cli.report_path.display())
    })?;
    println!("{}", markdown);

    if let Some(json_path) = &cli.json_path {
        let json_report = report::JsonReport::new(preview.as_str(), &sitemap_url, urls.len(), &issues);
        let json = report::render_json(&json_report).context("failed to serialize JSON report")?;
        std::fs::write(json_path, json)
            .with_context(|| format!("failed to write JSON report to {}", json_path.display()))?;
    }

    let counts = report::IssueCounts::from_issues(&issues);
    info!(
        checked = urls.len(),
        redirect_errors = counts.redirect_error,
        http_errors = counts.http_error,
        exceptions = counts.exception,
        "route check finished"
    );

    if counts.total() > 0 {
        Ok(1) // Exit code 1 = at least one URL failed
    } else {
        Ok(0) // Exit code 0 = all good
    }
}
