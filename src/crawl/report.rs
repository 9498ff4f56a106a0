// src/crawl/report.rs
// =============================================================================
// The outcome of a crawl.
//
// A crawl is best-effort: a broken image or an unreachable linked page is
// logged and recorded here, but never stops the crawl. The report lets the
// caller (or a test) see exactly what happened without scraping log output.
//
// #[derive(Serialize)] lets main.rs print it as JSON with --json.
// =============================================================================

use std::path::PathBuf;

use serde::Serialize;

/// Where in the crawl a non-fatal failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// A linked page could not be fetched or parsed
    Page,
    /// An image could not be downloaded or written
    Image,
}

/// A failure that was contained instead of aborting the crawl.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlFailure {
    pub url: String,
    pub stage: FailureStage,
    pub message: String,
}

/// An image that made it to disk.
#[derive(Debug, Clone, Serialize)]
pub struct SavedImage {
    pub url: String,
    pub path: PathBuf,
}

/// Everything a finished crawl did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    /// Pages fetched and parsed, in crawl order
    pub pages: Vec<String>,
    /// Images written to disk, in crawl order
    pub images: Vec<SavedImage>,
    /// Image references whose extension wasn't on the allowlist
    pub filtered_images: usize,
    /// Pages not fetched again because they were already crawled
    pub skipped_pages: usize,
    pub failures: Vec<CrawlFailure>,
}

impl CrawlReport {
    pub fn record_failure(&mut self, url: &str, stage: FailureStage, message: impl ToString) {
        self.failures.push(CrawlFailure {
            url: url.to_string(),
            stage,
            message: message.to_string(),
        });
    }

    /// Number of contained failures of the given kind
    pub fn failure_count(&self, stage: FailureStage) -> usize {
        self.failures.iter().filter(|f| f.stage == stage).count()
    }

    /// True if nothing went wrong anywhere in the crawl
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_counts() {
        let mut report = CrawlReport::default();
        assert!(report.is_clean());

        report.record_failure("https://example.com/a.png", FailureStage::Image, "timeout");
        report.record_failure("https://example.com/b.png", FailureStage::Image, "timeout");
        report.record_failure("https://example.com/next", FailureStage::Page, "HTTP 404");

        assert!(!report.is_clean());
        assert_eq!(report.failure_count(FailureStage::Image), 2);
        assert_eq!(report.failure_count(FailureStage::Page), 1);
    }

    #[test]
    fn test_report_json_shape() {
        let mut report = CrawlReport::default();
        report.pages.push("https://example.com/".to_string());
        report.images.push(SavedImage {
            url: "https://example.com/a.png".to_string(),
            path: PathBuf::from("data/a.png"),
        });
        report.record_failure("https://example.com/next", FailureStage::Page, "HTTP 500");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pages"][0], "https://example.com/");
        assert_eq!(json["images"][0]["path"], "data/a.png");
        assert_eq!(json["failures"][0]["stage"], "page");
        assert_eq!(json["filtered_images"], 0);
    }
}
