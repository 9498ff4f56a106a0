// src/config.rs
// =============================================================================
// Crawl configuration and its defaults.
//
// Everything the crawler needs to know besides the seed URL lives in
// CrawlConfig. The CLI builds one (see cli.rs), tests build their own.
//
// Rust concepts:
// - impl Default: gives a struct a sensible "zero" value
// - Option<T>: for settings that may be absent (like the timeout)
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Default maximum recursion depth (`-l`)
pub const DEFAULT_DEPTH: u32 = 5;

/// Default output directory (`-p`)
pub const DEFAULT_OUTPUT_DIR: &str = "./data/";

/// Image extensions downloaded unless overridden with `--ext`
pub const DEFAULT_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".bmp"];

/// User-Agent header sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("spider/", env!("CARGO_PKG_VERSION"));

/// How relative references found in a page are turned into absolute URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Glue the reference onto the page URL as-is.
    #[default]
    Concat,
    /// Resolve like a browser does (RFC 3986), via `Url::join`.
    Join,
}

/// Decides which image URLs are worth downloading, by file extension.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
    case_sensitive: bool,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext: String = ext.into();
                normalize_extension(&ext, case_sensitive)
            })
            .filter(|ext| ext.len() > 1)
            .collect();

        Self {
            extensions,
            case_sensitive,
        }
    }

    /// Returns true if the path of `url` ends with one of the allowed extensions.
    ///
    /// Query strings and fragments are ignored, so `a.png?v=2` matches `.png`.
    pub fn matches(&self, url: &str) -> bool {
        let path = url_path(url);
        let path = if self.case_sensitive {
            path
        } else {
            path.to_lowercase()
        };

        self.extensions.iter().any(|ext| path.ends_with(ext.as_str()))
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS, true)
    }
}

// "png" and ".png" both mean ".png"
fn normalize_extension(ext: &str, case_sensitive: bool) -> String {
    let ext = ext.trim();
    let ext = if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    };

    if case_sensitive {
        ext
    } else {
        ext.to_lowercase()
    }
}

// The path part of a URL. Falls back to cutting off query/fragment by hand
// when the string doesn't parse (naive concatenation can produce odd URLs).
fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(&['?', '#'][..])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Everything that controls a crawl apart from the seed URL.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Follow `<a href>` links into other pages
    pub recursive: bool,
    /// How many link hops may be followed from the seed page
    pub max_depth: u32,
    /// Root directory images are written into
    pub output_dir: PathBuf,
    /// Which image URLs get downloaded
    pub extensions: ExtensionFilter,
    pub resolve_mode: ResolveMode,
    /// Write images under `<output_dir>/<domain>/` instead of `<output_dir>/`
    pub by_domain: bool,
    /// Skip pages and images already handled in this run
    pub dedupe: bool,
    /// Per-request timeout; `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            max_depth: DEFAULT_DEPTH,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extensions: ExtensionFilter::default(),
            resolve_mode: ResolveMode::default(),
            by_domain: false,
            dedupe: true,
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CrawlConfig::default();
        assert!(!config.recursive);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.output_dir, PathBuf::from("./data/"));
        assert_eq!(config.resolve_mode, ResolveMode::Concat);
        assert!(config.dedupe);
        assert!(config.timeout.is_none());
        assert!(config.extensions.is_case_sensitive());
    }

    #[test]
    fn test_default_extensions_match() {
        let filter = ExtensionFilter::default();
        for url in [
            "https://example.com/a.jpg",
            "https://example.com/b.jpeg",
            "https://example.com/c.png",
            "https://example.com/d.gif",
            "https://example.com/e.bmp",
        ] {
            assert!(filter.matches(url), "{} should match", url);
        }
    }

    #[test]
    fn test_skip_other_extensions() {
        let filter = ExtensionFilter::default();
        assert!(!filter.matches("https://example.com/logo.svg"));
        assert!(!filter.matches("https://example.com/page.html"));
        assert!(!filter.matches("https://example.com/"));
    }

    #[test]
    fn test_extension_must_be_a_suffix() {
        let filter = ExtensionFilter::default();
        assert!(!filter.matches("https://example.com/a.jpg/page"));
        assert!(!filter.matches("https://img.png.example.com/index.html"));
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let filter = ExtensionFilter::default();
        assert!(filter.matches("https://example.com/a.png?size=large"));
        assert!(filter.matches("https://example.com/a.png#top"));
        assert!(filter.matches("not a url/a.png?x=1"));
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let filter = ExtensionFilter::default();
        assert!(!filter.matches("https://example.com/PHOTO.JPG"));

        let relaxed = ExtensionFilter::new(DEFAULT_EXTENSIONS, false);
        assert!(relaxed.matches("https://example.com/PHOTO.JPG"));
    }

    #[test]
    fn test_custom_extensions_without_dot() {
        let filter = ExtensionFilter::new(["webp", ".svg", ""], true);
        assert_eq!(filter.extensions(), &[".webp".to_string(), ".svg".to_string()]);
        assert!(filter.matches("https://example.com/a.webp"));
        assert!(!filter.matches("https://example.com/a.jpg"));
    }
}
