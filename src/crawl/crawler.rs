// src/crawl/crawler.rs
// =============================================================================
// This module implements the depth-first image crawl.
//
// How it works:
// 1. Fetch the page and collect its <img src> / <a href> references
// 2. For each image: resolve it, check the extension, download it
// 3. For each link (only with --recursive and depth left): resolve it and
//    crawl that page with depth - 1
// 4. Failures on one image or one linked page are logged and recorded in
//    the report; the crawl carries on with the next reference
//
// Only the seed page can make the whole crawl fail.
//
// Visited tracking:
// - Each page URL is remembered together with the depth it was crawled at
// - A page reached again with the same or less depth left is skipped, so
//   link cycles terminate and nothing reachable is lost
// - An image already saved into the same directory is not downloaded twice
// - Both checks are switched off by CrawlConfig::dedupe = false (--revisit)
//
// Rust concepts:
// - Recursion in async code needs a boxed future (BoxFuture)
// - &mut borrows: the crawl state is threaded through every call
// =============================================================================

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt}; // FutureExt gives us .boxed()
use reqwest::Client;

use crate::config::{CrawlConfig, DEFAULT_USER_AGENT};
use crate::crawl::page::{extract_references, fetch_page, ReferenceKind};
use crate::crawl::report::{CrawlReport, FailureStage, SavedImage};
use crate::error::{error_chain, FetchError};
use crate::persist::save_image;
use crate::resolve::{domain_of, resolve_with};

// Mutable state shared by every page of one crawl
#[derive(Debug, Default)]
struct CrawlState {
    // page URL -> largest remaining depth it was crawled with
    visited: HashMap<String, u32>,
    // (image URL, target directory) pairs already attempted
    images: HashSet<(String, PathBuf)>,
    report: CrawlReport,
}

/// Crawls pages and downloads their images according to a [`CrawlConfig`].
pub struct Crawler {
    client: Client,
    config: CrawlConfig,
}

impl Crawler {
    /// Builds a crawler with its own HTTP client.
    ///
    /// Fails only if the HTTP client can't be constructed (e.g. TLS backend
    /// initialization).
    pub fn new(config: CrawlConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls `url` with the configured depth.
    ///
    /// Returns an error only if the seed page itself can't be fetched or
    /// parsed. Everything below it is best-effort; see
    /// [`CrawlReport::failures`].
    pub async fn crawl(&self, url: &str) -> Result<CrawlReport, FetchError> {
        let mut state = CrawlState::default();
        self.crawl_page(url.to_string(), self.config.max_depth, &mut state)
            .await?;
        Ok(state.report)
    }

    // Crawls one page and everything reachable from it within `depth` hops
    //
    // Async functions can't call themselves directly (the future would have
    // infinite size), so this returns a boxed future instead.
    fn crawl_page<'a>(
        &'a self,
        url: String,
        depth: u32,
        state: &'a mut CrawlState,
    ) -> BoxFuture<'a, Result<(), FetchError>> {
        async move {
            if self.config.dedupe {
                if let Some(&seen_depth) = state.visited.get(&url) {
                    if seen_depth >= depth {
                        log::debug!("Already crawled {} with depth {}", url, seen_depth);
                        state.report.skipped_pages += 1;
                        return Ok(());
                    }
                }
                state.visited.insert(url.clone(), depth);
            }

            log::info!("Crawling [depth {}]: {}", depth, url);

            let html = fetch_page(&self.client, &url).await?;
            let references = extract_references(&html);
            state.report.pages.push(url.clone());

            let image_dir = self.image_dir(&url);
            let follow_links = self.config.recursive && depth > 0;

            for reference in references {
                match reference.kind {
                    ReferenceKind::Image => {
                        let image_url =
                            resolve_with(&reference.value, &url, self.config.resolve_mode);
                        self.handle_image(image_url, &image_dir, state).await;
                    }
                    ReferenceKind::Link if follow_links => {
                        let link = resolve_with(&reference.value, &url, self.config.resolve_mode);
                        if let Err(e) = self.crawl_page(link.clone(), depth - 1, state).await {
                            let message = error_chain(&e);
                            log::warn!("Error downloading images from {}: {}", link, message);
                            log::debug!("Link {:?} found on {}", reference.value, url);
                            state.report.record_failure(&link, FailureStage::Page, message);
                        }
                    }
                    ReferenceKind::Link => {}
                }
            }

            Ok(())
        }
        .boxed()
    }

    // Filters, de-duplicates and saves one image; failures stay here
    async fn handle_image(&self, image_url: String, image_dir: &Path, state: &mut CrawlState) {
        if !self.config.extensions.matches(&image_url) {
            log::debug!("Skipping {} (extension not allowed)", image_url);
            state.report.filtered_images += 1;
            return;
        }

        // Keyed on the directory too, so --by-domain gives every domain its copy
        let key = (image_url.clone(), image_dir.to_path_buf());
        if self.config.dedupe && !state.images.insert(key) {
            log::debug!("Already downloaded {} into {}", image_url, image_dir.display());
            return;
        }

        match save_image(&self.client, &image_url, image_dir).await {
            Ok(path) => {
                log::info!("Saved {} -> {}", image_url, path.display());
                state.report.images.push(SavedImage {
                    url: image_url,
                    path,
                });
            }
            Err(e) => {
                let message = error_chain(&e);
                log::warn!("Error saving image: {}", message);
                state
                    .report
                    .record_failure(&image_url, FailureStage::Image, message);
            }
        }
    }

    // Where images found on `page_url` are written
    fn image_dir(&self, page_url: &str) -> PathBuf {
        if !self.config.by_domain {
            return self.config.output_dir.clone();
        }

        let domain = domain_of(page_url);
        if domain.is_empty() {
            self.config.output_dir.clone()
        } else {
            self.config.output_dir.join(domain)
        }
    }
}

/// One-shot crawl with default settings apart from recursion, depth and
/// output directory.
pub async fn crawl(
    url: &str,
    recursive: bool,
    depth: u32,
    output_dir: impl Into<PathBuf>,
) -> Result<CrawlReport, FetchError> {
    let config = CrawlConfig {
        recursive,
        max_depth: depth,
        output_dir: output_dir.into(),
        ..CrawlConfig::default()
    };

    let crawler = Crawler::new(config).map_err(|source| FetchError::NetworkError {
        url: url.to_string(),
        source,
    })?;
    crawler.crawl(url).await
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why BoxFuture?
//    - An async fn compiles to a state machine that stores everything it awaits
//    - If it awaits itself, the state machine would contain itself: infinite size
//    - Box::pin (what .boxed() does) puts the inner future on the heap instead
//
// 2. Why is `state` a &mut instead of a field on Crawler?
//    - Crawler is shared (&self) and reusable for several crawls
//    - Each crawl gets its own fresh state, owned by crawl()
//
// 3. What does `..CrawlConfig::default()` mean?
//    - Struct update syntax: "take the remaining fields from this value"
//
// 4. Depth-first vs breadth-first:
//    - We finish a linked page (and everything below it) before moving on to
//      the next reference on the current page
// -----------------------------------------------------------------------------
