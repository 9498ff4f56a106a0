// src/persist/mod.rs
// =============================================================================
// This module saves downloaded images to disk.
//
// Features:
// - Streams the image body straight into a file (no full buffering)
// - Creates the output directory on demand
// - Names the file after the last segment of the image URL
//
// Rust concepts:
// - tokio::fs: async versions of the std::fs functions
// - Streams: reading a response body chunk by chunk
// =============================================================================

mod image;

// Re-export so callers can write `persist::save_image()`
pub use image::{file_name_for, save_image};
