use futures::channel::mpsc;
use reqwest::{Client, Response};
use url::Url;

use super::reference;
use super::upload;
use crate::config::Config;
use crate::error::{GalleryError, Result};
use crate::state::data::{ImageRef, UploadDraft};

/// HTTP client for the gallery service.
///
/// Cheap to clone; every clone shares one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(concat!("image-gallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GalleryError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base: config.base_url()?,
        })
    }

    /// Base address the service lives under
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET /api/images`: the current image references, in server order.
    pub async fn list_images(&self) -> Result<Vec<ImageRef>> {
        let url = reference::endpoint(&self.base, &["api", "images"])?;
        tracing::debug!(%url, "listing images");

        let response = check(self.http.get(url).send().await?).await?;
        let body = response.bytes().await?;
        let images: Vec<ImageRef> = serde_json::from_slice(&body)?;
        Ok(images)
    }

    /// `POST /api/upload` with the draft as multipart field `file`.
    ///
    /// Each chunk the transport takes reports a percentage on `progress`.
    pub async fn upload(&self, draft: &UploadDraft, progress: mpsc::UnboundedSender<u8>) -> Result<()> {
        let url = reference::endpoint(&self.base, &["api", "upload"])?;
        let form = upload::build_form(draft, progress).await?;
        tracing::debug!(%url, file = %draft.file_name, "uploading");

        check(self.http.post(url).multipart(form).send().await?).await?;
        Ok(())
    }

    /// `DELETE /api/images/{file_name}`
    pub async fn delete_image(&self, file_name: &str) -> Result<()> {
        let url = reference::endpoint(&self.base, &["api", "images", file_name])?;
        tracing::debug!(%url, "deleting image");

        check(self.http.delete(url).send().await?).await?;
        Ok(())
    }

    /// Download the raw bytes behind an image reference.
    pub async fn fetch_image(&self, image: &str) -> Result<Vec<u8>> {
        let url = reference::resolve(&self.base, image)?;
        let response = check(self.http.get(url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Turn a non-2xx response into a `Status` error carrying the body's `detail`.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    Err(GalleryError::from_status(status.as_u16(), &body))
}
