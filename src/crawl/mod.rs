// src/crawl/mod.rs
// =============================================================================
// This module handles crawling pages for images.
//
// Features:
// - Depth-first crawling starting from a seed URL
// - Optional recursion into linked pages, with a depth limit
// - Extension allowlist for which images get downloaded
// - Best-effort: one broken image or page never stops the crawl
//
// Rust concepts:
// - Async programming: network requests are awaited one after another
// - Collections: HashMap/HashSet for tracking what we've already visited
// =============================================================================

mod crawler;
mod page;
mod report;

// Re-export the public crawling API
pub use crawler::{crawl, Crawler};
pub use page::{extract_references, PageReference, ReferenceKind};
pub use report::{CrawlFailure, CrawlReport, FailureStage, SavedImage};
