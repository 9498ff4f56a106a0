// src/lib.rs
// =============================================================================
// Library root for the spider crawler.
//
// main.rs is a thin wrapper around this: it parses the command line, builds
// a CrawlConfig and runs a Crawler. Keeping the logic here lets it be used
// (and tested) without going through the binary.
//
// Modules:
// - cli: command-line parsing (clap)
// - config: CrawlConfig and defaults
// - crawl: the recursive crawler and its report
// - error: FetchError / SaveError
// - logging: env_logger setup
// - persist: saving images to disk
// - resolve: turning page references into absolute URLs
// =============================================================================

pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod logging;
pub mod persist;
pub mod resolve;

pub use config::{CrawlConfig, ExtensionFilter, ResolveMode};
pub use crawl::{crawl, CrawlReport, Crawler};
pub use error::{error_chain, FetchError, SaveError};
