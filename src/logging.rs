// src/logging.rs
// =============================================================================
// Logger setup.
//
// We log through the `log` facade (log::info!, log::warn!, ...) and use
// `env_logger` as the backend, which prints to stderr. That keeps stdout
// free for the crawl summary and JSON output.
//
// Each -v on the command line raises our own level. RUST_LOG directives are
// applied on top of those defaults, so they win for any module they name.
// =============================================================================

use std::env;

use env_logger::Builder;
use log::LevelFilter;

// Maps the number of -v flags to a log level for this crate
//   0 -> warn, 1 -> info, 2 -> debug, 3+ -> trace
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes the global logger.
///
/// Uses `try_init()`, so calling this twice (e.g. from tests) returns an error
/// instead of panicking.
pub fn init(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let rust_log = env::var("RUST_LOG").ok();
    let mut builder = builder(verbosity, rust_log.as_deref());
    if let Ok(style) = env::var("RUST_LOG_STYLE") {
        builder.parse_write_style(&style);
    }

    builder.try_init()
}

// Default filters first, then the RUST_LOG directives (if any)
fn builder(verbosity: u8, rust_log: Option<&str>) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Warn);
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Warn);
    builder.filter_module(env!("CARGO_CRATE_NAME"), level_for(verbosity));

    if let Some(filters) = rust_log {
        builder.parse_filters(filters);
    }
    builder.format_timestamp(None);
    builder
}
