// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is only one thing to do, so there are no subcommands:
//
//   docs-route-check --preview-url https://my-docs.example.com
//
// The worker count, timeouts and user agent are deliberately not flags.
// See src/config.rs.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_REPORT_PATH;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "docs-route-check",
    version,
    about = "Check that every URL in a docs preview's sitemap is reachable",
    long_about = "docs-route-check fetches {preview-url}/sitemap.xml and requests every same-origin \
                  URL in it without following redirects. Pages that return HTTP >= 400, fail to \
                  load, or redirect to a URL containing `error=true` are reported. \
                  Exit codes: 0 = all pass, 1 = issues found or sitemap unusable, \
                  2 = invalid --preview-url."
)]
pub struct Cli {
    /// Docs preview base URL (e.g., https://my-site.docs.example.com)
    ///
    /// Must start with http:// or https://. Trailing slashes are ignored.
    #[arg(long)]
    pub preview_url: String,

    /// Where to write the markdown report
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub report_path: PathBuf,

    /// Also write the issues as JSON to this path
    #[arg(long)]
    pub json_path: Option<PathBuf>,
}
