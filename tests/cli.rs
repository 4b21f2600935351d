use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cmd() -> Command {
    Command::cargo_bin("docs-route-check").unwrap()
}

async fn serve(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

fn sitemap(base: &str, pages: &[&str]) -> String {
    let entries: String = pages
        .iter()
        .map(|p| format!("<url><loc>{base}{p}</loc></url>"))
        .collect();
    format!(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{entries}</urlset>"#)
}

// assert_cmd blocks, so run it off the async runtime that drives wiremock
async fn run_blocking(mut command: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || command.assert())
        .await
        .unwrap()
}

#[test]
fn rejects_non_http_preview_url() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("report.md");

    cmd()
        .args(["--preview-url", "docs.example.com", "--report-path"])
        .arg(&report)
        .assert()
        .code(2)
        .stderr(contains("must start with http"));

    assert!(!report.exists());
}

#[test]
fn missing_preview_url_is_a_usage_error() {
    cmd().assert().code(2);
}

#[tokio::test(flavor = "multi_thread")]
async fn reports_every_kind_of_failure() {
    let server = MockServer::start().await;
    let base = server.uri();

    serve(
        &server,
        "/sitemap.xml",
        ResponseTemplate::new(200).set_body_string(sitemap(&base, &["/a", "/b", "/c", "/a"])),
    )
    .await;
    serve(&server, "/a", ResponseTemplate::new(200)).await;
    serve(
        &server,
        "/b",
        ResponseTemplate::new(302).insert_header("location", format!("{base}/?error=true").as_str()),
    )
    .await;
    serve(&server, "/c", ResponseTemplate::new(404)).await;

    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("report.md");
    let json_path = dir.path().join("report.json");

    let mut command = cmd();
    command
        .arg("--preview-url")
        .arg(format!("{base}/"))
        .arg("--report-path")
        .arg(&report_path)
        .arg("--json-path")
        .arg(&json_path);

    let assert = run_blocking(command).await;
    assert
        .code(1)
        .stdout(contains("- Total sitemap URLs checked: **3**"))
        .stdout(contains("- Redirect loops (`?error=true`): **1**"))
        .stdout(contains("- HTTP errors (>= 400): **1**"))
        .stdout(contains("- Exceptions: **0**"));

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.starts_with(&format!("## Docs route check for `{base}`")));
    assert!(report.contains(&format!("| `{base}/b` | 302 | `{base}/?error=true` |")));
    assert!(report.contains(&format!("| `{base}/c` | 404 | `` |")));
    assert!(!report.contains("### Exceptions"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["checked"], 3);
    assert_eq!(json["issues"].as_array().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn stdout_matches_report_file_on_clean_run() {
    let server = MockServer::start().await;
    let base = server.uri();

    serve(
        &server,
        "/sitemap.xml",
        ResponseTemplate::new(200).set_body_string(sitemap(&base, &["/", "/guide"])),
    )
    .await;
    serve(&server, "/", ResponseTemplate::new(200)).await;
    serve(
        &server,
        "/guide",
        ResponseTemplate::new(307).insert_header("location", format!("{base}/guide/intro").as_str()),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("report.md");

    let mut command = cmd();
    command
        .arg("--preview-url")
        .arg(&base)
        .arg("--report-path")
        .arg(&report_path);

    let output = run_blocking(command).await.code(0).get_output().clone();
    let report = std::fs::read_to_string(&report_path).unwrap();

    // println! adds one trailing newline to the echoed copy
    assert_eq!(String::from_utf8(output.stdout).unwrap(), format!("{report}\n"));
    assert!(report.contains("- Total sitemap URLs checked: **2**"));
}

#[tokio::test(flavor = "multi_thread")]
async fn sitemap_failure_writes_no_report() {
    let server = MockServer::start().await;
    serve(&server, "/sitemap.xml", ResponseTemplate::new(503)).await;

    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("report.md");

    let mut command = cmd();
    command
        .arg("--preview-url")
        .arg(server.uri())
        .arg("--report-path")
        .arg(&report_path);

    run_blocking(command)
        .await
        .code(1)
        .stderr(contains("returned HTTP 503"));

    assert!(!report_path.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_sitemap_is_a_failure() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/sitemap.xml",
        ResponseTemplate::new(200).set_body_string(sitemap("https://elsewhere.example.com", &["/a"])),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("report.md");

    let mut command = cmd();
    command
        .arg("--preview-url")
        .arg(server.uri())
        .arg("--report-path")
        .arg(&report_path);

    run_blocking(command)
        .await
        .code(1)
        .stderr(contains("No URLs to check after filtering"));

    assert!(!report_path.exists());
}
