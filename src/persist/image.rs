// src/persist/image.rs
// =============================================================================
// Downloads one image and writes it to the output directory.
//
// How it works:
// 1. Work out the file name (last "/" segment of the URL)
// 2. GET the image
// 3. Create the output directory (like `mkdir -p`)
// 4. Stream the body into <output_dir>/<file name>, replacing any old file
//
// Known quirks:
// - The status code is not enforced: an HTML error page gets saved as if it
//   were an image. We log a warning when that happens.
// - File names are not sanitized or de-duplicated, so two images called
//   "logo.png" from different pages overwrite each other.
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};

use futures::StreamExt; // gives us .next() on the body stream
use reqwest::Client;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::error::SaveError;

// Returns the file name an image URL is saved under: everything after the
// last '/'. None when that is empty (e.g. "https://example.com/").
pub fn file_name_for(image_url: &str) -> Option<&str> {
    image_url.rsplit('/').next().filter(|name| !name.is_empty())
}

/// Downloads `image_url` into `output_dir` and returns the written path.
///
/// # Errors
///
/// * [`SaveError::NetworkError`] if the request fails or the body stream breaks
/// * [`SaveError::WriteError`] if the directory or file can't be written, or
///   the URL has no file name
pub async fn save_image(
    client: &Client,
    image_url: &str,
    output_dir: &Path,
) -> Result<PathBuf, SaveError> {
    let file_name = file_name_for(image_url).ok_or_else(|| SaveError::WriteError {
        path: output_dir.to_path_buf(),
        source: io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no file name in {}", image_url),
        ),
    })?;

    let network_error = |source| SaveError::NetworkError {
        url: image_url.to_string(),
        source,
    };

    let response = client.get(image_url).send().await.map_err(network_error)?;

    if !response.status().is_success() {
        log::warn!(
            "{} answered HTTP {}, saving the body anyway",
            image_url,
            response.status()
        );
    }

    // Create the directory if it does not exist
    fs::create_dir_all(output_dir)
        .await
        .map_err(|source| SaveError::WriteError {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let file_path = output_dir.join(file_name);
    let write_error = |source| SaveError::WriteError {
        path: file_path.clone(),
        source,
    };

    // File::create truncates, so a second download fully replaces the first
    let mut file = File::create(&file_path).await.map_err(write_error)?;

    let mut body = response.bytes_stream();
    let mut written = 0usize;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(network_error)?;
        file.write_all(&chunk).await.map_err(write_error)?;
        written += chunk.len();
    }
    file.flush().await.map_err(write_error)?;

    log::debug!("Wrote {} bytes to {}", written, file_path.display());
    Ok(file_path)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why stream instead of response.bytes()?
//    - bytes() loads the whole image into memory first
//    - bytes_stream() hands us chunks as they arrive
//    - Each chunk goes straight to disk
//
// 2. What are those `|source| SaveError::...` closures?
//    - map_err() needs a function that converts one error into another
//    - Storing the closure in a variable lets us reuse it several times
//
// 3. Why tokio::fs instead of std::fs?
//    - std::fs blocks the thread while the OS does the work
//    - tokio::fs runs it on a background thread and lets us .await it
// -----------------------------------------------------------------------------
