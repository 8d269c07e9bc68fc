use image::imageops::FilterType;

use crate::error::{GalleryError, Result};
use crate::state::data::ThumbnailPixels;

/// Decode downloaded image bytes and shrink them to fit a `size` x `size` box.
/// Images already smaller than the box keep their dimensions.
pub async fn generate_thumbnail(bytes: Vec<u8>, size: u32) -> Result<ThumbnailPixels> {
    // Spawn blocking task for CPU-bound work
    tokio::task::spawn_blocking(move || generate_thumbnail_blocking(&bytes, size))
        .await
        .map_err(|e| GalleryError::Decode(format!("thumbnail task failed: {e}")))?
}

/// Blocking version of thumbnail generation
pub fn generate_thumbnail_blocking(bytes: &[u8], size: u32) -> Result<ThumbnailPixels> {
    let img = image::load_from_memory(bytes)?;

    let img = if img.width() > size || img.height() > size {
        img.resize(size, size, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(ThumbnailPixels {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}
