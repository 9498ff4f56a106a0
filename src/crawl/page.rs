// src/crawl/page.rs
// =============================================================================
// Fetching a single page and pulling image/link references out of it.
//
// How it works:
// 1. GET the page; anything other than 200 OK is an error
// 2. Decode the body as text, using the charset from Content-Type
// 3. Parse it into a DOM tree with `scraper`
// 4. Walk every node (parent first, then children left to right) and keep
//    <img src> and <a href> values, in the order they appear
//
// The parsed document is dropped before we return. scraper's Html type can't
// be sent between threads, so we hand back plain Strings instead.
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use scraper::Html;

use crate::error::FetchError;

/// What kind of element a reference was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `<img src="...">`
    Image,
    /// `<a href="...">`
    Link,
}

/// One `src` or `href` value found in a page, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReference {
    pub kind: ReferenceKind,
    pub value: String,
}

// Fetches a web page and returns its HTML content
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let network_error = |source| FetchError::NetworkError {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(network_error)?;

    if response.status() != StatusCode::OK {
        return Err(FetchError::BadStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    // An image or other binary payload linked with <a href> isn't a page
    if let Some(content_type) = declared_non_text_type(&response) {
        return Err(FetchError::ParseError {
            url: url.to_string(),
            reason: format!("not an HTML document ({})", content_type),
        });
    }

    // text() honors the declared charset and replaces undecodable bytes
    response.text().await.map_err(network_error)
}

// Returns the Content-Type when the server explicitly says the body isn't text.
// A missing header is treated as HTML.
fn declared_non_text_type(response: &reqwest::Response) -> Option<String> {
    let value = response.headers().get(CONTENT_TYPE)?.to_str().ok()?;
    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();

    let is_text = mime.is_empty()
        || mime.starts_with("text/")
        || mime.ends_with("+xml")
        || mime == "application/xml";
    (!is_text).then_some(mime)
}

// Extracts image and link references from HTML, in document order
//
// Example:
//   html = r#"<img src="a.png"><a href="/next">next</a>"#
//   result = [Image("a.png"), Link("/next")]
pub fn extract_references(html: &str) -> Vec<PageReference> {
    let document = Html::parse_document(html);

    // html5ever recovers from bad markup on its own; we only note it
    if !document.errors.is_empty() {
        log::debug!("Parser recovered from {} markup error(s)", document.errors.len());
    }

    let mut references = Vec::new();

    // descendants() is a pre-order walk: a node, then its children in order
    for node in document.tree.root().descendants() {
        let element = match node.value().as_element() {
            Some(element) => element,
            None => continue,
        };

        let (kind, attribute) = match element.name() {
            "img" => (ReferenceKind::Image, "src"),
            "a" => (ReferenceKind::Link, "href"),
            _ => continue,
        };

        if let Some(value) = element.attr(attribute) {
            references.push(PageReference {
                kind,
                value: value.to_string(),
            });
        }
    }

    references
}
