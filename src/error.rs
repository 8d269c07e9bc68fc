use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Every failure the gallery can run into.
///
/// Errors travel inside UI messages, so they carry rendered strings instead
/// of the underlying library errors and stay `Clone`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("server responded with {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("could not read {path}: {reason}")]
    File { path: String, reason: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type with default GalleryError
pub type Result<T, E = GalleryError> = std::result::Result<T, E>;

impl GalleryError {
    /// The string shown to the user: the server's `detail` when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GalleryError::Status { detail: Some(detail), .. } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Build a `Status` error from a failed response body.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        GalleryError::Status {
            status,
            detail: detail_from_body(body),
        }
    }
}

impl From<reqwest::Error> for GalleryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GalleryError::Decode(err.to_string())
        } else {
            GalleryError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for GalleryError {
    fn from(err: url::ParseError) -> Self {
        GalleryError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        GalleryError::Decode(err.to_string())
    }
}

impl From<image::ImageError> for GalleryError {
    fn from(err: image::ImageError) -> Self {
        GalleryError::Decode(err.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"detail": "..."}` and the validation shape
/// `{"detail": [{"msg": "..."}, ...]}`. Anything else yields `None`.
pub fn detail_from_body(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let message = match parsed.detail? {
        Value::String(message) => message,
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .filter(|msg| !msg.trim().is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };

    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        let body = br#"{"detail": "File too large"}"#;
        assert_eq!(detail_from_body(body), Some("File too large".to_string()));
    }

    #[test]
    fn test_detail_validation_list() {
        let body = br#"{"detail": [{"loc": ["body", "file"], "msg": "field required"}, {"msg": "bad type"}]}"#;
        assert_eq!(
            detail_from_body(body),
            Some("field required; bad type".to_string())
        );
    }

    #[test]
    fn test_detail_missing_or_unusable() {
        assert_eq!(detail_from_body(b"Internal Server Error"), None);
        assert_eq!(detail_from_body(br#"{"error": "nope"}"#), None);
        assert_eq!(detail_from_body(br#"{"detail": ""}"#), None);
        assert_eq!(detail_from_body(br#"{"detail": 42}"#), None);
        assert_eq!(detail_from_body(br#"{"detail": {"code": 7}}"#), None);
        assert_eq!(detail_from_body(br#"{"detail": null}"#), None);
        assert_eq!(detail_from_body(b""), None);
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = GalleryError::from_status(400, br#"{"detail": "X"}"#);
        assert_eq!(err.user_message("Upload failed."), "X");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = GalleryError::from_status(500, b"oops");
        assert_eq!(err.user_message("Upload failed."), "Upload failed.");

        let err = GalleryError::Transport("connection refused".into());
        assert_eq!(err.user_message("Upload failed."), "Upload failed.");
    }

    #[test]
    fn test_status_display() {
        let err = GalleryError::from_status(413, br#"{"detail": "too big"}"#);
        assert_eq!(err.to_string(), "server responded with 413: too big");

        let err = GalleryError::from_status(502, b"");
        assert_eq!(err.to_string(), "server responded with 502");
    }
}
