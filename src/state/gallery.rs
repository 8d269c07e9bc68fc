use std::collections::{HashMap, HashSet};

use super::data::{ImageRef, Thumbnail, ThumbnailPixels, UploadDraft};
use crate::api::reference;
use crate::error::Result;

/// Shown when the image list could not be fetched and the server gave no detail
pub const LIST_FAILED: &str = "Could not load images.";
/// Shown when an upload failed and the server gave no detail
pub const UPLOAD_FAILED: &str = "Upload failed.";
/// Shown when the form is submitted without a file
pub const NO_FILE_SELECTED: &str = "Choose an image to upload first.";

/// An upload the page has committed to and wants sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub token: u64,
    pub draft: UploadDraft,
}

/// A delete the page has committed to and wants sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub reference: ImageRef,
    pub file_name: String,
}

/// The gallery page's state.
///
/// Every transition is synchronous; the caller performs the network request
/// a `begin_*` method hands back and reports the outcome to the matching
/// `finish_*` method. List and upload requests carry a token, and only the
/// completion of the most recently issued one is applied.
#[derive(Debug, Default)]
pub struct Gallery {
    images: Vec<ImageRef>,
    thumbnails: HashMap<ImageRef, Thumbnail>,
    draft: Option<UploadDraft>,
    uploading: bool,
    progress: u8,
    error: String,
    /// The error line currently holds a list failure
    list_failed: bool,
    list_token: u64,
    upload_token: u64,
    pending_deletes: HashSet<ImageRef>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== List ==========

    /// Start a list fetch and return its token.
    pub fn begin_list(&mut self) -> u64 {
        self.list_token += 1;
        self.list_token
    }

    /// Apply a list result. Returns the references whose thumbnails still
    /// need fetching.
    pub fn finish_list(&mut self, token: u64, result: Result<Vec<ImageRef>>) -> Vec<ImageRef> {
        if token != self.list_token {
            tracing::debug!(token, latest = self.list_token, "dropping superseded image list");
            return Vec::new();
        }

        let images = match result {
            Ok(images) => images,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch images");
                self.error = e.user_message(LIST_FAILED);
                self.list_failed = true;
                return Vec::new();
            }
        };

        tracing::info!(count = images.len(), "image list refreshed");
        if self.list_failed {
            self.error.clear();
            self.list_failed = false;
        }

        self.thumbnails.retain(|image, _| images.contains(image));
        let mut missing = Vec::new();
        for image in &images {
            // Failed slots get another attempt on every refresh
            if matches!(self.thumbnails.get(image), None | Some(Thumbnail::Failed)) {
                self.thumbnails.insert(image.clone(), Thumbnail::Loading);
                missing.push(image.clone());
            }
        }

        self.images = images;
        missing
    }

    // ========== Upload ==========

    /// Replace the upload draft with a newly picked file. Ignored while an
    /// upload is in flight, since success would discard the new pick.
    pub fn select_file(&mut self, draft: UploadDraft) -> bool {
        if self.uploading {
            return false;
        }
        tracing::debug!(file = %draft.file_name, "file selected");
        self.draft = Some(draft);
        true
    }

    /// Submit the form.
    ///
    /// Without a draft this only sets the error message. While another
    /// upload is in flight it does nothing.
    pub fn begin_upload(&mut self) -> Option<UploadRequest> {
        if self.uploading {
            return None;
        }
        let Some(draft) = self.draft.clone() else {
            self.error = NO_FILE_SELECTED.to_string();
            self.list_failed = false;
            return None;
        };

        self.upload_token += 1;
        self.uploading = true;
        self.error.clear();
        self.list_failed = false;
        self.progress = 0;

        Some(UploadRequest {
            token: self.upload_token,
            draft,
        })
    }

    /// Record upload progress. Late or foreign reports are ignored and the
    /// percentage never moves backwards.
    pub fn upload_progress(&mut self, token: u64, percent: u8) {
        if self.uploading && token == self.upload_token {
            self.progress = self.progress.max(percent.min(100));
        }
    }

    /// Apply an upload result. On success returns the token of the list
    /// fetch the caller must now issue.
    pub fn finish_upload(&mut self, token: u64, result: Result<()>) -> Option<u64> {
        if !self.uploading || token != self.upload_token {
            return None;
        }
        self.uploading = false;

        match result {
            Ok(()) => {
                tracing::info!("upload complete");
                self.draft = None;
                self.error.clear();
                Some(self.begin_list())
            }
            Err(e) => {
                tracing::warn!(error = %e, "upload failed");
                self.error = e.user_message(UPLOAD_FAILED);
                None
            }
        }
    }

    // ========== Delete ==========

    /// Start deleting a displayed image. Returns `None` when the reference
    /// is not displayed, already being deleted, or has no filename.
    pub fn begin_delete(&mut self, image: &str) -> Option<DeleteRequest> {
        if !self.images.iter().any(|i| i == image) || self.pending_deletes.contains(image) {
            return None;
        }
        let Some(file_name) = reference::file_name(image) else {
            tracing::warn!(reference = image, "cannot derive a filename to delete");
            return None;
        };

        self.pending_deletes.insert(image.to_string());
        Some(DeleteRequest {
            reference: image.to_string(),
            file_name,
        })
    }

    /// Apply a delete result. Success drops the reference locally without a
    /// re-fetch; failure is logged and leaves the gallery as it was.
    pub fn finish_delete(&mut self, image: &str, result: Result<()>) {
        self.pending_deletes.remove(image);

        match result {
            Ok(()) => {
                tracing::info!(reference = image, "image deleted");
                self.images.retain(|i| i != image);
                self.thumbnails.remove(image);
            }
            Err(e) => {
                tracing::error!(reference = image, error = %e, "failed to delete image");
            }
        }
    }

    // ========== Thumbnails ==========

    /// Store a fetched thumbnail. Results for references that have left the
    /// gallery are dropped.
    pub fn finish_thumbnail(&mut self, image: &str, result: Result<ThumbnailPixels>) {
        let Some(slot) = self.thumbnails.get_mut(image) else {
            return;
        };
        *slot = match result {
            Ok(pixels) => Thumbnail::Ready(pixels.into_handle()),
            Err(e) => {
                tracing::warn!(reference = image, error = %e, "failed to load thumbnail");
                Thumbnail::Failed
            }
        };
    }

    // ========== Accessors ==========

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn thumbnail(&self, image: &str) -> Option<&Thumbnail> {
        self.thumbnails.get(image)
    }

    pub fn draft(&self) -> Option<&UploadDraft> {
        self.draft.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Last error message, empty when there is none
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn is_deleting(&self, image: &str) -> bool {
        self.pending_deletes.contains(image)
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.uploading && self.draft.is_some()
    }
}
