// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Print a usage line if no URL was given
// 3. Crawl the URL and download its images
// 4. Print a summary (or JSON report)
//
// The process always exits with code 0: a failed crawl is reported as
// "Error: ..." on stdout.
// =============================================================================

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method

use spider::cli::{Cli, USAGE};
use spider::crawl::{CrawlReport, Crawler, FailureStage};
use spider::logging;

// The #[tokio::main] attribute transforms our async main into a real main function
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // A second logger can't be installed; that's not worth failing over
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: logger already initialized: {}", e);
    }

    let mut stdout = io::stdout();
    if let Err(e) = run(cli, &mut stdout).await {
        // Errors go to stdout and don't change the exit code
        println!("Error: {:#}", e);
    }
}

// This is the main application logic
//
// Output is written to `out` so tests can capture it.
async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let url = match cli.url.as_deref() {
        Some(url) => url,
        None => {
            writeln!(out, "{}", USAGE)?;
            return Ok(());
        }
    };

    let config = cli.crawl_config();
    let crawler = Crawler::new(config).context("failed to build HTTP client")?;

    if !cli.json {
        writeln!(out, "🔍 Crawling: {}", url)?;
        if crawler.config().recursive {
            writeln!(out, "📊 Max depth: {}", crawler.config().max_depth)?;
        }
    }

    let report = crawler.crawl(url).await?;

    print_report(&report, cli.json, out)
}

// Prints the report either as a summary or as JSON
fn print_report(report: &CrawlReport, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        writeln!(out, "{}", json_output)?;
        return Ok(());
    }

    for failure in &report.failures {
        writeln!(out, "   ❌ {}", failure.message)?;
    }

    writeln!(out)?;
    writeln!(out, "📊 Summary:")?;
    writeln!(out, "   📄 Pages crawled: {}", report.pages.len())?;
    writeln!(out, "   🖼️  Images saved: {}", report.images.len())?;
    writeln!(out, "   🚫 Images filtered out: {}", report.filtered_images)?;
    writeln!(
        out,
        "   ⚠️  Failures: {} image(s), {} page(s)",
        report.failure_count(FailureStage::Image),
        report.failure_count(FailureStage::Page)
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[tokio::test]
    async fn test_usage_without_url() {
        // No server at all: any network activity would have nowhere to go
        let mut out = Vec::new();
        run(parse(&["spider", "-r"]), &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap().trim(), USAGE);
    }

    #[tokio::test]
    async fn test_run_prints_summary() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .respond_with(status_code(200).body(r#"<img src="a.jpg"><img src="b.svg">"#)),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/a.jpg"))
                .respond_with(status_code(200).body("IMGDATA")),
        );
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_str().unwrap();
        let url = server.url_str("/");

        let mut out = Vec::new();
        run(parse(&["spider", "-p", path, url.as_str()]), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Images saved: 1"));
        assert!(text.contains("Images filtered out: 1"));
        assert_eq!(std::fs::read_to_string(dir.path().join("a.jpg")).unwrap(), "IMGDATA");
    }

    #[tokio::test]
    async fn test_run_json_report() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .respond_with(status_code(200).body("<p>no images</p>")),
        );
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_str().unwrap();
        let url = server.url_str("/");

        let mut out = Vec::new();
        run(parse(&["spider", "--json", "-p", path, url.as_str()]), &mut out)
            .await
            .unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["pages"][0], url.as_str());
        assert_eq!(report["images"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_run_seed_failure_is_an_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .respond_with(status_code(404)),
        );
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_str().unwrap();
        let url = server.url_str("/");

        let mut out = Vec::new();
        let result = run(parse(&["spider", "-p", path, url.as_str()]), &mut out).await;

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("404"));
    }
}
