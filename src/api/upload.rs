//! Multipart upload with byte-level progress
//!
//! The file is read into memory, split into chunks, and streamed as the
//! multipart body. Every chunk the transport pulls bumps the progress
//! percentage, which is forwarded over a channel alongside the final result.

use futures::channel::mpsc;
use futures::stream::{self, Stream, StreamExt};
use reqwest::multipart::{Form, Part};

use super::client::ApiClient;
use crate::error::{GalleryError, Result};
use crate::state::data::UploadDraft;

/// Multipart form field the service reads the file from
pub const FILE_FIELD: &str = "file";

/// Bytes handed to the transport per progress step
const CHUNK_SIZE: usize = 64 * 1024;

/// Everything an in-flight upload reports back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// Percentage of the body sent so far (0..=100)
    Progress(u8),
    Finished(Result<()>),
}

/// Map bytes sent to a whole percentage, rounded and clamped to 100.
/// A zero total counts as one byte so an empty file reports 0 then 100.
pub fn percent(sent: u64, total: u64) -> u8 {
    let total = total.max(1);
    let pct = (sent.saturating_mul(100) + total / 2) / total;
    pct.min(100) as u8
}

/// Read the draft and build the multipart form, reporting progress on `progress`.
pub async fn build_form(draft: &UploadDraft, progress: mpsc::UnboundedSender<u8>) -> Result<Form> {
    let bytes = tokio::fs::read(draft.path())
        .await
        .map_err(|e| GalleryError::File {
            path: draft.path().display().to_string(),
            reason: e.to_string(),
        })?;

    let total = bytes.len() as u64;
    let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();

    let mut sent = 0u64;
    let body = stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        // The receiver may be gone once the UI stops listening; that is fine.
        let _ = progress.unbounded_send(percent(sent, total));
        Ok::<_, std::io::Error>(chunk)
    });

    let part = Part::stream_with_length(reqwest::Body::wrap_stream(body), total)
        .file_name(draft.file_name.clone())
        .mime_str(mime_for(&draft.file_name))?;

    Ok(Form::new().part(FILE_FIELD, part))
}

/// Run one upload, yielding progress events and then exactly one `Finished`.
///
/// Progress events already queued when the request completes may trail the
/// `Finished` event; consumers drop them once the upload is no longer current.
pub fn upload_events(client: ApiClient, draft: UploadDraft) -> impl Stream<Item = UploadEvent> + Send + 'static {
    let (tx, rx) = mpsc::unbounded();
    let request = async move { UploadEvent::Finished(client.upload(&draft, tx).await) };

    stream::select(rx.map(UploadEvent::Progress), stream::once(request))
}

/// Content type for the file part, guessed from the extension.
fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
