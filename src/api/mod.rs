/// Gallery service access
///
/// - `client.rs` - HTTP calls (list, upload, delete, fetch image bytes)
/// - `reference.rs` - image reference resolution and filename derivation
/// - `upload.rs` - multipart body with progress reporting

pub mod client;
pub mod reference;
pub mod upload;

pub use client::ApiClient;
pub use upload::{upload_events, UploadEvent};
