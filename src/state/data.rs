//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the service layer and the UI layer.

use iced::widget::image::Handle;
use std::path::{Path, PathBuf};

/// An uploaded image as the service names it: its retrieval path
/// (e.g. "/uploads/cat.png") or an absolute URL.
pub type ImageRef = String;

/// The single local file queued for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDraft {
    /// Full path to the local file
    pub path: PathBuf,
    /// Filename only, sent as the multipart filename and shown in the form
    pub file_name: String,
}

impl UploadDraft {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        Self { path, file_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Decoded, downscaled pixels ready for the image widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailPixels {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major
    pub rgba: Vec<u8>,
}

impl ThumbnailPixels {
    /// Wrap the pixels in a widget handle. Each call mints a new handle id,
    /// so this happens once per thumbnail, not per frame.
    pub fn into_handle(self) -> Handle {
        Handle::from_rgba(self.width, self.height, self.rgba)
    }
}

/// What the grid knows about one reference's thumbnail
#[derive(Debug, Clone)]
pub enum Thumbnail {
    Loading,
    Ready(Handle),
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_file_name() {
        let draft = UploadDraft::new("/home/me/Pictures/cat.png");
        assert_eq!(draft.file_name, "cat.png");
        assert_eq!(draft.path(), Path::new("/home/me/Pictures/cat.png"));
    }

    #[test]
    fn test_draft_without_file_name() {
        let draft = UploadDraft::new("/");
        assert_eq!(draft.file_name, "upload");
    }
}
