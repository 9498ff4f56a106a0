// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   spider [-r] [-l <depth>] [-p <path>] <URL>
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The URL is declared optional on purpose: when it's missing we print a
// short usage line and exit normally instead of letting clap fail.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{
    CrawlConfig, ExtensionFilter, ResolveMode, DEFAULT_DEPTH, DEFAULT_EXTENSIONS,
    DEFAULT_OUTPUT_DIR,
};

/// Printed when no URL is given
pub const USAGE: &str = "Usage: spider [-rlp] URL";

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "spider",
    version,
    about = "Download the images of a web page, optionally following its links",
    long_about = "spider fetches a page, downloads every <img> whose URL ends in an allowed \
                  extension and, with -r, follows <a> links up to a depth limit."
)]
pub struct Cli {
    /// Page to start from (e.g., https://example.com/)
    pub url: Option<String>,

    /// Recursively download images from linked pages
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Maximum depth level of the recursive download
    #[arg(short = 'l', long = "level", default_value_t = DEFAULT_DEPTH)]
    pub level: u32,

    /// Directory where the downloaded files are saved
    #[arg(short = 'p', long = "path", default_value = DEFAULT_OUTPUT_DIR)]
    pub path: PathBuf,

    /// Comma-separated list of image extensions to download
    #[arg(long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Match extensions case-insensitively (".JPG" counts as ".jpg")
    #[arg(long)]
    pub ignore_case: bool,

    /// Resolve relative links like a browser instead of appending them to the page URL
    #[arg(long)]
    pub join_urls: bool,

    /// Save images under <path>/<domain>/ instead of <path>/
    #[arg(long)]
    pub by_domain: bool,

    /// Fetch pages and images again every time they are reached
    #[arg(long)]
    pub revisit: bool,

    /// Per-request timeout in seconds (default: wait forever)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the crawl report as JSON
    #[arg(long)]
    pub json: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    // Turns the parsed flags into a CrawlConfig
    pub fn crawl_config(&self) -> CrawlConfig {
        let extensions = if self.extensions.is_empty() {
            ExtensionFilter::new(DEFAULT_EXTENSIONS, !self.ignore_case)
        } else {
            ExtensionFilter::new(self.extensions.iter().cloned(), !self.ignore_case)
        };

        CrawlConfig {
            recursive: self.recursive,
            max_depth: self.level,
            output_dir: self.path.clone(),
            extensions,
            resolve_mode: if self.join_urls {
                ResolveMode::Join
            } else {
                ResolveMode::Concat
            },
            by_domain: self.by_domain,
            dedupe: !self.revisit,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["spider", "https://example.com"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://example.com"));

        let config = cli.crawl_config();
        assert!(!config.recursive);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.output_dir, PathBuf::from("./data/"));
        assert!(config.dedupe);
        assert!(config.timeout.is_none());
        assert_eq!(config.resolve_mode, ResolveMode::Concat);
    }

    #[test]
    fn test_short_flags() {
        let cli =
            Cli::try_parse_from(["spider", "-r", "-l", "2", "-p", "/tmp/out", "https://example.com"])
                .unwrap();
        let config = cli.crawl_config();
        assert!(config.recursive);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_url_is_optional() {
        let cli = Cli::try_parse_from(["spider"]).unwrap();
        assert!(cli.url.is_none());
    }

    #[test]
    fn test_extra_flags() {
        let cli = Cli::try_parse_from([
            "spider",
            "--ext",
            "png,webp",
            "--ignore-case",
            "--join-urls",
            "--by-domain",
            "--revisit",
            "--timeout",
            "30",
            "-vv",
            "https://example.com",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let config = cli.crawl_config();
        assert!(config.extensions.matches("https://example.com/a.WEBP"));
        assert!(!config.extensions.matches("https://example.com/a.jpg"));
        assert_eq!(config.resolve_mode, ResolveMode::Join);
        assert!(config.by_domain);
        assert!(!config.dedupe);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_negative_level_rejected() {
        assert!(Cli::try_parse_from(["spider", "-l", "-1", "https://example.com"]).is_err());
    }
}
