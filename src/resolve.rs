// src/resolve.rs
// =============================================================================
// This module turns references found in a page into fetchable URLs.
//
// Two jobs:
// - resolve(): make an <img src> or <a href> value absolute
// - domain_of(): get a clean host name for naming output folders
//
// By default resolution is a plain string join (page URL + reference).
// ResolveMode::Join switches to browser-style resolution through the
// `url` crate.
//
// Rust concepts:
// - &str vs String: we borrow inputs, return new owned strings
// - match on Result: to fall back when parsing fails
// =============================================================================

use url::Url;

use crate::config::ResolveMode;

// Resolves a possibly-relative reference to an absolute URL
//
// Parameters:
//   reference: the src/href value from the page
//   page_url: the URL of the page the reference was found on
//
// Examples (Concat mode):
//   reference = "https://cdn.com/a.png" -> "https://cdn.com/a.png" (unchanged)
//   reference = "a.png", page_url = "https://example.com/" -> "https://example.com/a.png"
//   reference = "/a.png", page_url = "https://example.com/" -> "https://example.com//a.png"
pub fn resolve(reference: &str, page_url: &str) -> String {
    resolve_with(reference, page_url, ResolveMode::Concat)
}

/// Same as [`resolve`], with an explicit resolution mode.
pub fn resolve_with(reference: &str, page_url: &str, mode: ResolveMode) -> String {
    // Already absolute (has a scheme)? Then use it verbatim.
    if has_scheme(reference) {
        return reference.to_string();
    }

    match mode {
        ResolveMode::Concat => format!("{}{}", page_url, reference),
        ResolveMode::Join => match Url::parse(page_url).and_then(|base| base.join(reference)) {
            Ok(url) => url.to_string(),
            Err(e) => {
                log::debug!(
                    "Could not join {:?} onto {}: {}; falling back to concatenation",
                    reference,
                    page_url,
                    e
                );
                format!("{}{}", page_url, reference)
            }
        },
    }
}

// A reference "has a scheme" if it parses as an absolute URL on its own.
// "a.png", "/a.png" and "//cdn.com/a.png" don't; "https://..." and "data:..." do.
fn has_scheme(reference: &str) -> bool {
    Url::parse(reference).is_ok()
}

// Extracts the host from a URL, without a leading "www."
//
// Returns an empty string if the URL can't be parsed or has no host.
//
// Example:
//   "https://www.example.com/page" -> "example.com"
pub fn domain_of(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return String::new(),
    };

    let host = parsed.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}
