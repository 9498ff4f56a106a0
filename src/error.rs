// src/error.rs
// =============================================================================
// Error types for crawling pages and saving images.
//
// Two families:
// - FetchError: something went wrong fetching or parsing a *page*
// - SaveError: something went wrong fetching or writing an *image*
//
// We use the `thiserror` crate to derive Display and Error for us.
// The application layer (main.rs) wraps these in anyhow::Error.
//
// Rust concepts:
// - Enums with named fields: each variant carries its own context
// - #[source]: links an error to the lower-level error that caused it
//
// Display only describes the error itself. The cause is reachable through
// source(); error_chain() (or anyhow's {:#}) prints the whole chain once.
// =============================================================================

use std::error::Error as StdError;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure to fetch or parse a single page.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // Variant names mirror the error taxonomy
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("failed to fetch {url}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with something other than 200 OK.
    #[error("failed to fetch {url}: HTTP {status}")]
    BadStatus { url: String, status: StatusCode },

    /// The body could not be turned into a document.
    #[error("failed to parse {url}: {reason}")]
    ParseError { url: String, reason: String },
}

impl FetchError {
    /// The page URL this error is about.
    pub fn url(&self) -> &str {
        match self {
            FetchError::NetworkError { url, .. }
            | FetchError::BadStatus { url, .. }
            | FetchError::ParseError { url, .. } => url,
        }
    }
}

/// Failure to download and persist a single image.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum SaveError {
    /// The image could not be fetched (or its body stream broke off).
    #[error("failed to download {url}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Creating the directory or writing the file failed.
    #[error("failed to write {}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Joins an error and all of its causes with ": "
//
// Example:
//   "failed to write /out/a.jpg: permission denied"
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_status_message() {
        let err = FetchError::BadStatus {
            url: "https://example.com".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.url(), "https://example.com");
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_write_error_mentions_path() {
        let err = SaveError::WriteError {
            path: PathBuf::from("/tmp/out/a.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/tmp/out/a.jpg"));
        assert!(!message.contains("denied"));
        assert_eq!(err.source().unwrap().to_string(), "denied");
    }

    #[test]
    fn test_cause_printed_once() {
        let err = SaveError::WriteError {
            path: PathBuf::from("/tmp/out/a.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(error_chain(&err), "failed to write /tmp/out/a.jpg: denied");

        let alternate = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(alternate.matches("denied").count(), 1);
    }
}
